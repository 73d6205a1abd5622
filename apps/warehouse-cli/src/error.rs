//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Error Flow in the CLI                             │
//! │                                                                         │
//! │  ClientError ──┐                                                        │
//! │  ScanError ────┼──► CliError { code, message } ──► stderr + exit code   │
//! │  I/O, config ──┘                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;
use warehouse_client::ClientError;
use warehouse_core::{CoreError, ValidationError};
use warehouse_scan::ScanError;

/// Error returned from a command.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Category, also used for the exit code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input rejected before sending
    Validation,

    /// Bad or unreadable configuration
    Config,

    /// Service unreachable or timed out
    Network,

    /// Service answered with an error
    Service,

    /// Camera or scanner failure
    Scanner,

    /// Local file or terminal failure
    Io,
}

impl ErrorCode {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::Validation => 2,
            ErrorCode::Config => 3,
            ErrorCode::Network => 4,
            ErrorCode::Service => 5,
            ErrorCode::Scanner => 6,
            ErrorCode::Io => 7,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Io, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_code())
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Validation(_) => ErrorCode::Validation,
            e if e.is_config_error() => ErrorCode::Config,
            ClientError::Request(_) => ErrorCode::Network,
            ClientError::Status { .. } | ClientError::Decode(_) => ErrorCode::Service,
            _ => ErrorCode::Io,
        };
        if code == ErrorCode::Service || code == ErrorCode::Network {
            tracing::error!(error = %err, "Request failed");
        }
        CliError::new(code, err.user_message())
    }
}

impl From<ScanError> for CliError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Client(e) => e.into(),
            ScanError::Core(CoreError::Validation(e)) => e.into(),
            ScanError::Recognizer(e) => CliError::new(ErrorCode::Scanner, e.to_string()),
            other => CliError::new(ErrorCode::Scanner, other.to_string()),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::new(ErrorCode::Validation, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::io(err.to_string())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;
    use warehouse_scan::RecognizerError;

    #[test]
    fn test_client_error_mapping() {
        let err: CliError = ClientError::Status {
            operation: "delete zone",
            status: 409,
        }
        .into();
        assert_eq!(err.code, ErrorCode::Service);
        assert_eq!(err.message, "Failed to delete zone");

        let err: CliError = ClientError::Request("connection refused".into()).into();
        assert_eq!(err.code, ErrorCode::Network);

        let err: CliError = ClientError::InvalidUrl("ftp://x".into()).into();
        assert_eq!(err.code, ErrorCode::Config);
    }

    #[test]
    fn test_scan_error_mapping() {
        let err: CliError = ScanError::from(RecognizerError::CameraUnavailable("busy".into())).into();
        assert_eq!(err.code, ErrorCode::Scanner);

        let err: CliError = ScanError::from(ValidationError::MustBePositive {
            field: "quantity".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.to_string(), "[Validation] quantity must be positive");
    }
}
