//! Spreadsheet downloads.

use std::path::Path;

use crate::cli::ExportReport;
use crate::error::CliResult;
use warehouse_client::{ExportKind, InventoryClient};

pub fn export_kind(report: ExportReport) -> CliResult<ExportKind> {
    Ok(match report {
        ExportReport::All => ExportKind::All,
        ExportReport::Boxes => ExportKind::Boxes,
        ExportReport::Items { from, to } => ExportKind::items_between(from, to)?,
    })
}

pub async fn run(client: &InventoryClient, report: ExportReport, dir: &Path) -> CliResult<()> {
    let kind = export_kind(report)?;
    let file = client.export(kind).await?;
    let path = file.save_to(dir)?;
    println!("Saved {}", path.display());
    Ok(())
}
