//! # Warehouse CLI
//!
//! Terminal host for the scanner workflow and the inventory service.
//!
//! ## Module Organization
//! ```text
//! warehouse_cli/
//! ├── lib.rs          ◄─── You are here (logging, runtime, run)
//! ├── cli.rs          ◄─── clap command definitions
//! ├── terminal.rs     ◄─── stdin lines, keyboard-wedge recognizer, view
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch
//! │   ├── scan.rs     ◄─── Scan loop
//! │   ├── inventory.rs◄─── Lookup and CRUD
//! │   ├── export.rs   ◄─── Spreadsheet downloads
//! │   └── config.rs   ◄─── Config file
//! └── error.rs        ◄─── CliError and exit codes
//! ```
//!
//! Command output goes to stdout; logs and alerts go to stderr.

pub mod cli;
pub mod commands;
pub mod error;
pub mod terminal;

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Runs the CLI and returns the process exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (RUST_LOG overrides the default filter)          │
/// │  2. Parse arguments                                                     │
/// │  3. Build a current-thread runtime                                      │
/// │  4. Dispatch the command                                                │
/// │  5. Shut the runtime down without waiting on the stdin reader           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    debug!(command = ?cli.command, "Parsed command");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(commands::dispatch(cli));
    // A blocking stdin read never finishes on its own.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "Command failed");
            eprintln!("{}", e.message);
            e.exit_code()
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=warehouse_scan=trace` - Trace the scanner only
/// - Default: INFO, debug for the warehouse crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,warehouse=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
