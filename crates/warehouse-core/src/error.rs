//! # Error Types
//!
//! Domain-specific error types for warehouse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  warehouse-core errors (this file)                                     │
//! │  ├── CoreError        - Session transitions, wrapped validation        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  warehouse-client errors (separate crate)                              │
//! │  └── ClientError      - Inventory API failures                         │
//! │                                                                         │
//! │  warehouse-scan errors (separate crate)                                │
//! │  └── ScanError        - Recognizer + workflow failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ScanError → view message          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::session::ScanPhase;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The scan session cannot move from its current phase with this event.
    ///
    /// ## When This Occurs
    /// - `init_succeeded` after the session was already stopped
    /// - `begin_init` on a session that is still scanning
    #[error("Invalid scan session transition: {from:?} cannot handle {event}")]
    InvalidTransition { from: ScanPhase, event: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any request leaves the client, and to
/// produce the messages shown for manual barcode entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., barcode with unsupported characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
