//! TOML-backed `GameConfig` loading and atomic saving.

use std::fs;
use std::path::Path;

use crate::config::{ConfigError, GameConfig};

/// Parses and validates a TOML document. Missing keys fall back to defaults.
pub fn parse_config(text: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let config = parse_config(&text)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Writes through a temporary sibling file and renames it into place.
pub fn write_config(path: &Path, config: &GameConfig) -> Result<(), ConfigError> {
    let io_error = |source| ConfigError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let text = toml::to_string_pretty(config)?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, text).map_err(io_error)?;
    fs::rename(&tmp_path, path).map_err(io_error)?;
    Ok(())
}
