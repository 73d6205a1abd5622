//! # warehouse-scan: Scanner Controller and Scan Workflow
//!
//! Wires the external barcode recognizer to the inventory service.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Recognizer ──events──► ScannerController ──DetectedCode──►           │
//! │   (camera, decode)        (ScanSession guard,                           │
//! │                            overlay feedback)                            │
//! │                                                                         │
//! │        ──► ScanWorkflow ──► ProductLookup / ItemSubmitter               │
//! │                 │             (warehouse-client)                        │
//! │                 ▼                                                       │
//! │             ScanView (browser or terminal)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`recognizer`] - recognizer port, fixed configuration, event sink
//! - [`controller`] - `ScannerController` (one session at a time)
//! - [`overlay`] - per-frame tracking box and crosshair
//! - [`view`] - `ScanView` presentation callbacks
//! - [`workflow`] - `ScanWorkflow` (standalone and fill-field modes)
//! - [`error`] - `ScanError`, `RecognizerError`

pub mod controller;
pub mod error;
pub mod overlay;
pub mod recognizer;
pub mod view;
pub mod workflow;

pub use controller::{ScannerController, CAMERA_SWITCH_DELAY, DETECTION_DISPLAY_DELAY};
pub use error::{RecognizerError, ScanError, ScanResult};
pub use recognizer::{
    DrawingSurface, EventSink, FrameResult, Recognizer, RecognizerConfig, RecognizerEvent,
};
pub use view::{ScanView, ScannerStatus};
pub use workflow::{ScanContext, ScanOutcome, ScanWorkflow, SCANNER_REOPEN_DELAY};
