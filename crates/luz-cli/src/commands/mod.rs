//! CLI subcommands.

pub mod config;
pub mod inspect;
pub mod report;

use std::path::Path;

use luz_core::LuzConfig;

/// Load the configuration from an explicit path, or fall back to defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<LuzConfig> {
    match config_path {
        Some(path) => Ok(LuzConfig::from_file(Path::new(path))?),
        None => Ok(LuzConfig::default()),
    }
}
