//! # Client Error Types
//!
//! Error types for requests to the inventory service.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  Status                 │ │
//! │  │  InvalidUrl     │  │  (connect,      │  │  Decode                 │ │
//! │  │  ConfigLoad/Save│  │   timeout)      │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │   Validation    │  │   Local I/O     │                              │
//! │  │  (before send)  │  │  (export save)  │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried automatically: every failure goes back to the
//! user, who decides whether to try again.

use thiserror::Error;
use warehouse_core::ValidationError;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Inventory client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid service URL.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response (connect failure, timeout).
    #[error("Request failed: {0}")]
    Request(String),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The service answered with a non-success status.
    #[error("{operation} failed with HTTP {status}")]
    Status { operation: &'static str, status: u16 },

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Input rejected before sending.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Local file operation failed.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// Message suitable for a blocking alert.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { operation, .. } => format!("Failed to {}", operation),
            ClientError::Validation(e) => e.to_string(),
            ClientError::Request(e) => format!("Error: {}", e),
            other => other.to_string(),
        }
    }
}
