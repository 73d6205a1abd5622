//! # warehouse-client: Inventory Service Client
//!
//! Everything that talks to the inventory HTTP API: zone, box and item
//! mutations, the product lookup used by scanning, spreadsheet exports, and
//! the client configuration.
//!
//! ## Modules
//!
//! - [`client`] - `InventoryClient` (reqwest)
//! - [`ports`] - `ProductLookup` and `ItemSubmitter` traits used by scanning
//! - [`export`] - report kinds, file naming and saving
//! - [`config`] - `ClientConfig` (TOML + environment)
//! - [`error`] - `ClientError`
//!
//! ## Failure Policy
//!
//! Lookups degrade to "not found" and are only logged. Mutations and exports
//! return `ClientError` so the host can show a blocking alert. Nothing is
//! retried automatically.

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod ports;

pub use client::{InventoryClient, ProductCheck};
pub use config::{ApiSettings, ClientConfig, ExportSettings};
pub use error::{ClientError, ClientResult};
pub use export::{ExportFile, ExportKind};
pub use ports::{ItemSubmitter, ProductLookup};
