//! `cortina config`: print the effective configuration or write it out.

use std::path::{Path, PathBuf};

use cortina_catalog::AppConfig;

use crate::error::CliResult;

/// The effective configuration as TOML.
pub fn show(config: &AppConfig) -> CliResult<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Writes the effective configuration to `path`.
pub fn write(config: &AppConfig, path: &Path) -> CliResult<PathBuf> {
    Ok(config.save(Some(path.to_path_buf()))?)
}
