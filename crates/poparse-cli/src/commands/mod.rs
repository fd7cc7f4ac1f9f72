//! Subcommand implementations.

pub mod batch;
pub mod clients;
pub mod config;
pub mod parse;

use std::path::{Path, PathBuf};

use tracing::debug;

use poparse_core::PoParseConfig;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("poparse")
        .join("config.json")
}

/// The file the `--config` flag points at, or the default location.
pub fn resolve_config_path(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration for a parse run.
///
/// An explicit `--config` file must exist. Without one, the default file is
/// used when present and built-in defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PoParseConfig> {
    if let Some(path) = config_path {
        return Ok(PoParseConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using configuration from {}", path.display());
        Ok(PoParseConfig::from_file(&path)?)
    } else {
        Ok(PoParseConfig::default())
    }
}
