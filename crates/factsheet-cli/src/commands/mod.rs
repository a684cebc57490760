//! CLI command implementations.

pub mod batch;
pub mod config;
pub mod parse;

use std::path::Path;

use tracing::debug;

use factsheet_core::FactsheetConfig;

/// Resolve configuration: explicit `--config`, then the user config file, then defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FactsheetConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(FactsheetConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(FactsheetConfig::from_file(&default_path)?)
    } else {
        Ok(FactsheetConfig::default())
    }
}
