//! # Warehouse CLI Entry Point
//!
//! The actual setup is in lib.rs so commands can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    warehouse_cli::run()
}
