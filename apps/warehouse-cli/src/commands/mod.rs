//! # Commands
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (dispatch)
//! ├── scan.rs       ◄─── Scan loop, confirmation prompts
//! ├── inventory.rs  ◄─── Lookup, zone/box/item mutations
//! ├── export.rs     ◄─── Spreadsheet downloads
//! └── config.rs     ◄─── Config show/init
//! ```
//!
//! Every command except `config` loads the client config first and fails
//! early on a bad service URL.

pub mod config;
pub mod export;
pub mod inventory;
pub mod scan;

use std::path::PathBuf;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::error::CliResult;
use warehouse_client::{ClientConfig, InventoryClient};

/// Runs the parsed command.
pub async fn dispatch(cli: Cli) -> CliResult<()> {
    let config_path = cli.config;

    match cli.command {
        Commands::Config { action } => config::run(action, config_path),
        Commands::Scan { box_id, fill_field } => {
            let (_, client) = connect(config_path)?;
            scan::run(client, box_id, fill_field).await
        }
        Commands::Lookup { box_id, barcode } => {
            let (_, client) = connect(config_path)?;
            inventory::lookup(&client, box_id, &barcode).await
        }
        Commands::Zone { action } => {
            let (_, client) = connect(config_path)?;
            inventory::zone(&client, action).await
        }
        Commands::StorageBox { action } => {
            let (_, client) = connect(config_path)?;
            inventory::storage_box(&client, action).await
        }
        Commands::Item { action } => {
            let (_, client) = connect(config_path)?;
            inventory::item(&client, action).await
        }
        Commands::Export { report, out } => {
            let (config, client) = connect(config_path)?;
            let dir = out.unwrap_or_else(|| config.export.resolve_dir());
            export::run(&client, report, &dir).await
        }
    }
}

fn connect(config_path: Option<PathBuf>) -> CliResult<(ClientConfig, InventoryClient)> {
    let config = ClientConfig::load(config_path)?;
    let client = InventoryClient::from_config(&config)?;
    debug!(base = %client.base_url(), "Using inventory service");
    Ok((config, client))
}
