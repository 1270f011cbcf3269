use std::fs;

use super::error::ConfigError;
use super::load::{ensure_dirs, secure_file_permissions};
use super::paths::ConfigPaths;
use super::types::AppConfig;

/// Writes the concierge config as TOML, readable by the owner only since it
/// may carry an API key.
pub fn save_config(config: &AppConfig, paths: &ConfigPaths) -> Result<(), ConfigError> {
    ensure_dirs(paths)?;
    let rendered = toml::to_string_pretty(config)?;
    let target = &paths.config_file;
    fs::write(target, rendered)?;
    secure_file_permissions(target)?;
    log::debug!("wrote concierge config to {}", target.display());
    Ok(())
}
