//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a handler that validates input and applies it
//! to a [`Config`]. Loading and saving happen once around the handler call.

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use std::path::Path;

use crate::core::config::data::Config;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the configuration value from the words after the key.
    ///
    /// Returns a success message to display.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the configuration value, returning a success message.
    fn unset(&self, config: &mut Config) -> String;

    /// Format the current value for display in `qchat set` output.
    fn format(&self, config: &Config) -> String;
}

/// `qchat set <key> <value...>`. With no key-value, prints every setting.
pub fn run_set(
    registry: &SettingRegistry,
    config_path: &Path,
    key: Option<&str>,
    args: &[String],
) -> Result<String, SettingError> {
    let Some(key) = key else {
        let config = helpers::load_config(config_path)?;
        return Ok(registry.describe(&config));
    };
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    helpers::mutate_config(config_path, |config| handler.set(args, config))
}

/// `qchat unset <key>`.
pub fn run_unset(
    registry: &SettingRegistry,
    config_path: &Path,
    key: &str,
) -> Result<String, SettingError> {
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    helpers::mutate_config(config_path, |config| Ok(handler.unset(config)))
}
