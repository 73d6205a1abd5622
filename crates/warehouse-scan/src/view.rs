//! # View Binding
//!
//! The workflow reports to the presentation layer through [`ScanView`]. A
//! browser host maps these calls to DOM updates; the CLI prints them.

use serde::Serialize;
use warehouse_core::{BoxId, ItemForm, PendingItem};

/// Scanner state shown next to the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ScannerStatus {
    Starting,
    Scanning,
    /// A code was accepted and is shown until the scanner closes.
    Detected(String),
    /// The camera could not be opened; manual entry is offered.
    CameraUnavailable(String),
    Stopped,
}

impl std::fmt::Display for ScannerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScannerStatus::Starting => write!(f, "Starting camera..."),
            ScannerStatus::Scanning => write!(f, "Point the camera at a barcode"),
            ScannerStatus::Detected(code) => write!(f, "Detected: {}", code),
            ScannerStatus::CameraUnavailable(reason) => {
                write!(f, "Camera unavailable ({}). Enter the barcode manually.", reason)
            }
            ScannerStatus::Stopped => write!(f, "Scanner closed"),
        }
    }
}

/// Presentation callbacks from the scan workflow.
pub trait ScanView: Send + Sync {
    fn scanner_status(&self, status: &ScannerStatus);

    /// Opens the quantity confirmation form.
    fn show_pending(&self, pending: &PendingItem);

    fn hide_pending(&self);

    /// Opens the item form with the barcode field filled in.
    fn show_item_form(&self, form: &ItemForm);

    fn show_manual_entry(&self);

    /// Inline, non-blocking notice.
    fn show_message(&self, message: &str);

    /// Blocking alert.
    fn show_alert(&self, message: &str);

    /// Reloads the box contents from the service.
    fn refresh_box(&self, box_id: BoxId);
}
