//! # Spreadsheet Exports
//!
//! The service renders `.xlsx` reports; the client downloads the payload and
//! names the file with the current date.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ClientError, ClientResult};
use warehouse_core::ValidationError;

/// Report to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Every item with its zone and box.
    All,
    /// Per-box summary.
    Boxes,
    /// Items added within an inclusive date range.
    ItemsByDate { start: NaiveDate, end: NaiveDate },
}

impl ExportKind {
    /// Date-range export, rejecting an inverted range.
    pub fn items_between(start: NaiveDate, end: NaiveDate) -> ClientResult<Self> {
        if start > end {
            return Err(ClientError::Validation(ValidationError::InvalidFormat {
                field: "date range".into(),
                reason: format!("start date {} is after end date {}", start, end),
            }));
        }
        Ok(ExportKind::ItemsByDate { start, end })
    }

    /// Endpoint path relative to the service base URL.
    pub(crate) fn path(&self) -> &'static str {
        match self {
            ExportKind::All => "api/export_excel_all",
            ExportKind::Boxes => "api/export_excel_boxes",
            ExportKind::ItemsByDate { .. } => "api/export_items_by_date",
        }
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ExportKind::ItemsByDate { start, end } => vec![
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
            ],
            _ => Vec::new(),
        }
    }

    pub(crate) fn operation(&self) -> &'static str {
        match self {
            ExportKind::All => "export all data",
            ExportKind::Boxes => "export box data",
            ExportKind::ItemsByDate { .. } => "export items by date",
        }
    }

    /// Local file name for a download made on `today`.
    pub fn file_name(&self, today: NaiveDate) -> String {
        match self {
            ExportKind::All => format!("warehouse_export_all_{}.xlsx", today.format("%Y-%m-%d")),
            ExportKind::Boxes => {
                format!("warehouse_export_boxes_{}.xlsx", today.format("%Y-%m-%d"))
            }
            ExportKind::ItemsByDate { start, end } => format!(
                "warehouse_export_items_{}_{}.xlsx",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

/// A downloaded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Writes the payload into `dir`, creating it if needed.
    pub fn save_to(&self, dir: &Path) -> ClientResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(?path, bytes = self.bytes.len(), "Export saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_file_names_are_date_stamped() {
        let today = date(2024, 3, 9);
        assert_eq!(
            ExportKind::All.file_name(today),
            "warehouse_export_all_2024-03-09.xlsx"
        );
        assert_eq!(
            ExportKind::Boxes.file_name(today),
            "warehouse_export_boxes_2024-03-09.xlsx"
        );
        let range = ExportKind::items_between(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(
            range.file_name(today),
            "warehouse_export_items_2024-01-01_2024-01-31.xlsx"
        );
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = ExportKind::items_between(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(ExportKind::items_between(date(2024, 2, 1), date(2024, 2, 1)).is_ok());
    }

    #[test]
    fn test_range_query() {
        let range = ExportKind::items_between(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(
            range.query(),
            vec![
                ("start_date", "2024-01-01".to_string()),
                ("end_date", "2024-01-31".to_string())
            ]
        );
        assert!(ExportKind::All.query().is_empty());
    }

    #[test]
    fn test_save_to_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let file = ExportFile {
            file_name: "warehouse_export_all_2024-03-09.xlsx".into(),
            bytes: vec![0x50, 0x4b, 0x03, 0x04],
        };
        let path = file.save_to(&target).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), vec![0x50, 0x4b, 0x03, 0x04]);
    }
}
