//! Helper functions for settings operations.

use std::path::Path;

use crate::core::config::data::Config;

use super::error::SettingError;

pub fn load_config(path: &Path) -> Result<Config, SettingError> {
    Config::load_from_path(path).map_err(|e| SettingError::ConfigError(e.to_string()))
}

/// Load, apply `f`, and save only if `f` succeeded.
pub fn mutate_config<F>(path: &Path, f: F) -> Result<String, SettingError>
where
    F: FnOnce(&mut Config) -> Result<String, SettingError>,
{
    let mut config = load_config(path)?;
    let message = f(&mut config)?;
    config
        .save_to_path(path)
        .map_err(|e| SettingError::ConfigError(e.to_string()))?;
    Ok(message)
}

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Format a boolean value for display.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
