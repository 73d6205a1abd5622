//! # Scan Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scan Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Recognizer    │  │     Domain      │  │      Service            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │ CameraUnavailable│ │ InvalidTransition│ │  ClientError            │ │
//! │  │ Device          │  │ Validation      │  │  (create item)          │ │
//! │  │ Teardown        │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Workflow: NoPendingItem, SessionClosed                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Camera failures are not fatal: the workflow offers manual entry.
//! Teardown failures never leave the controller.

use thiserror::Error;
use warehouse_client::ClientError;
use warehouse_core::{CoreError, ValidationError};

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Failure reported by the recognition library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognizerError {
    /// No camera, permission denied, or the device is busy.
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    /// The library failed after the camera was acquired.
    #[error("Scanner device error: {0}")]
    Device(String),

    /// Releasing the camera failed.
    #[error("Scanner teardown failed: {0}")]
    Teardown(String),
}

/// Scan workflow error type.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Recognizer(#[from] RecognizerError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// Confirm or edit called with no confirmation form open.
    #[error("No scanned item is awaiting confirmation")]
    NoPendingItem,

    /// The scanner was closed while waiting for a code.
    #[error("Scanner session closed")]
    SessionClosed,
}

impl From<ValidationError> for ScanError {
    fn from(err: ValidationError) -> Self {
        ScanError::Core(CoreError::Validation(err))
    }
}

impl ScanError {
    /// Returns true when the camera could not be started and manual entry
    /// should be offered instead.
    pub fn is_camera_unavailable(&self) -> bool {
        matches!(
            self,
            ScanError::Recognizer(RecognizerError::CameraUnavailable(_) | RecognizerError::Device(_))
        )
    }

    /// Message suitable for the user.
    pub fn user_message(&self) -> String {
        match self {
            ScanError::Client(e) => e.user_message(),
            ScanError::Core(CoreError::Validation(e)) => e.to_string(),
            other => other.to_string(),
        }
    }
}
