//! # warehouse-core: Pure Domain Logic for the Warehouse Scanner
//!
//! This crate holds the domain model and every rule that can be expressed
//! without I/O: barcode validation, form field checks, and the scan session
//! state machine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Warehouse Scan Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View layer (browser / terminal)                 │   │
//! │  │   Scanner surface ──► Confirmation form ──► Zone/Box/Item lists │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ScanView events                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                warehouse-scan (controller + workflow)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ warehouse-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  session  │  │ validation│                  │   │
//! │  │   │ Zone, Box │  │ ScanPhase │  │  barcode  │                  │   │
//! │  │   │ Item, ... │  │ guards    │  │  fields   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CAMERA • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Zone, StorageBox, Item, PendingItem, ...)
//! - [`session`] - Scan session state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Barcode validator and form field rules
//!
//! ## Example Usage
//!
//! ```rust
//! use warehouse_core::validation::is_valid_barcode;
//!
//! assert!(is_valid_barcode("4006381333931"));
//! assert!(!is_valid_barcode("ab"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use session::{CandidateOutcome, ScanPhase, ScanSession, StopOutcome};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shortest accepted barcode, in characters, after trimming.
pub const MIN_BARCODE_LEN: usize = 3;

/// Longest accepted barcode, in characters, after trimming.
pub const MAX_BARCODE_LEN: usize = 50;

/// Quantity prefilled on every new item form.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Upper bound for a single item line.
///
/// Catches a barcode scanned into the quantity field; the server has no
/// limit of its own.
pub const MAX_ITEM_QUANTITY: i64 = 100_000;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a zone or box name.
pub const MAX_ENTITY_NAME_LEN: usize = 100;
