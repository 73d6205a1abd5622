//! Command-line interface definitions.
//!
//! # Commands
//!
//! - **scan**: scan barcodes into a box (keyboard-wedge scanner on stdin)
//! - **lookup**: check whether a barcode already has a line in a box
//! - **zone** / **box** / **item**: create, edit and delete records
//! - **export**: download spreadsheet reports
//! - **config**: show or create the config file

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use warehouse_core::{BoxId, ItemId, ZoneId};

#[derive(Parser, Debug)]
#[command(name = "warehouse", version, about = "Warehouse inventory scanner")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan barcodes into a box
    #[command(visible_alias = "s")]
    Scan {
        /// Target box
        #[arg(long = "box", value_name = "ID")]
        box_id: BoxId,

        /// Only capture the barcode into a new item form (no lookup)
        #[arg(long)]
        fill_field: bool,
    },

    /// Check whether a barcode already exists in a box
    Lookup { box_id: BoxId, barcode: String },

    /// Manage zones
    Zone {
        #[command(subcommand)]
        action: ZoneAction,
    },

    /// Manage boxes
    #[command(name = "box")]
    StorageBox {
        #[command(subcommand)]
        action: BoxAction,
    },

    /// Manage item lines
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Download a spreadsheet report
    Export {
        #[command(subcommand)]
        report: ExportReport,

        /// Directory to save into (defaults to the configured export dir)
        #[arg(long, global = true, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct NameArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Subcommand, Debug)]
pub enum ZoneAction {
    Add(NameArgs),
    Edit {
        id: ZoneId,
        #[command(flatten)]
        fields: NameArgs,
    },
    #[command(visible_alias = "rm")]
    Delete { id: ZoneId },
}

#[derive(Subcommand, Debug)]
pub enum BoxAction {
    Add {
        #[arg(long = "zone", value_name = "ID")]
        zone_id: ZoneId,
        #[command(flatten)]
        fields: NameArgs,
    },
    Edit {
        id: BoxId,
        #[command(flatten)]
        fields: NameArgs,
    },
    #[command(visible_alias = "rm")]
    Delete { id: BoxId },
}

#[derive(Subcommand, Debug)]
pub enum ItemAction {
    Add {
        #[arg(long = "box", value_name = "ID")]
        box_id: BoxId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        barcode: Option<String>,
        #[arg(long, default_value_t = 1)]
        qty: i64,
    },
    Edit {
        id: ItemId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        qty: i64,
    },
    #[command(visible_alias = "rm")]
    Delete { id: ItemId },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ExportReport {
    /// Every item with its zone and box
    All,
    /// Per-box summary
    Boxes,
    /// Items added within a date range (inclusive)
    Items {
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: NaiveDate,
        #[arg(long, value_name = "YYYY-MM-DD")]
        to: NaiveDate,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
