//! `config show` and `config init`.

use std::path::PathBuf;
use tracing::info;

use crate::cli::ConfigAction;
use crate::error::{CliError, CliResult, ErrorCode};
use warehouse_client::ClientConfig;

pub fn run(action: ConfigAction, config_path: Option<PathBuf>) -> CliResult<()> {
    let path = config_path
        .or_else(ClientConfig::default_config_path)
        .ok_or_else(|| CliError::new(ErrorCode::Config, "No config directory available"))?;

    match action {
        ConfigAction::Show => {
            let config = ClientConfig::load(Some(path.clone()))?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| CliError::new(ErrorCode::Config, e.to_string()))?;
            println!("# {}", path.display());
            print!("{}", rendered);
            Ok(())
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::new(
                    ErrorCode::Config,
                    format!("{} already exists (use --force to overwrite)", path.display()),
                ));
            }
            let written = ClientConfig::default().save(Some(path))?;
            info!(path = ?written, "Config initialized");
            println!("Wrote {}", written.display());
            Ok(())
        }
    }
}
