//! Handlers for each persisted configuration key.

use crate::core::app::Theme;
use crate::core::config::data::{Config, DEFAULT_BACKEND_URL};
use crate::core::providers::Provider;
use crate::utils::url::normalize_base_url;

use super::error::SettingError;
use super::helpers::{format_bool, parse_bool};
use super::SettingHandler;

fn joined(args: &[String]) -> Option<String> {
    let value = args.join(" ");
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub struct BackendUrlHandler;

impl SettingHandler for BackendUrlHandler {
    fn key(&self) -> &'static str {
        "backend-url"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = joined(args).ok_or(SettingError::MissingArgs {
            hint: "Specify a backend URL",
            example: "qchat set backend-url http://localhost:8000",
        })?;
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(SettingError::InvalidValue {
                key: "backend-url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        let url = normalize_base_url(&value);
        config.backend_url = Some(url.clone());
        Ok(format!("✅ Set backend-url to: {url}"))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.backend_url = None;
        "✅ Unset backend-url".to_string()
    }

    fn format(&self, config: &Config) -> String {
        match &config.backend_url {
            Some(url) => format!("  backend-url: {url}"),
            None => format!("  backend-url: (unset, using {DEFAULT_BACKEND_URL})"),
        }
    }
}

pub struct DefaultModelHandler;

impl SettingHandler for DefaultModelHandler {
    fn key(&self) -> &'static str {
        "default-model"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = joined(args).ok_or(SettingError::MissingArgs {
            hint: "Specify a model",
            example: "qchat set default-model OpenAI",
        })?;
        let provider = value.parse::<Provider>().map_err(|err| SettingError::InvalidValue {
            key: "default-model",
            reason: err.to_string(),
        })?;
        config.default_model = Some(provider.as_str().to_string());
        Ok(format!("✅ Set default-model to: {provider}"))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.default_model = None;
        "✅ Unset default-model".to_string()
    }

    fn format(&self, config: &Config) -> String {
        match &config.default_model {
            Some(model) => format!("  default-model: {model}"),
            None => format!("  default-model: (unset, using {})", Provider::default()),
        }
    }
}

pub struct ThemeHandler;

impl SettingHandler for ThemeHandler {
    fn key(&self) -> &'static str {
        "theme"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = joined(args).ok_or(SettingError::MissingArgs {
            hint: "Specify a theme",
            example: "qchat set theme dark",
        })?;
        let theme: Theme = value.parse().map_err(|_| SettingError::InvalidValue {
            key: "theme",
            reason: format!("'{value}' is not one of: light, dark"),
        })?;
        config.theme = Some(theme);
        Ok(format!("✅ Set theme to: {}", theme.as_str()))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.theme = None;
        "✅ Unset theme".to_string()
    }

    fn format(&self, config: &Config) -> String {
        match config.theme {
            Some(theme) => format!("  theme: {}", theme.as_str()),
            None => "  theme: (unset)".to_string(),
        }
    }
}

pub struct ReasoningHandler;

impl SettingHandler for ReasoningHandler {
    fn key(&self) -> &'static str {
        "reasoning"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = joined(args).ok_or(SettingError::MissingArgs {
            hint: "Specify on or off",
            example: "qchat set reasoning on",
        })?;
        let enabled = parse_bool(&value).ok_or(SettingError::InvalidBoolean(value))?;
        config.reasoning = Some(enabled);
        Ok(format!("✅ Set reasoning to: {}", format_bool(enabled)))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.reasoning = None;
        "✅ Unset reasoning".to_string()
    }

    fn format(&self, config: &Config) -> String {
        format!("  reasoning: {}", format_bool(config.reasoning_or_default()))
    }
}

pub struct RequestTimeoutHandler;

impl SettingHandler for RequestTimeoutHandler {
    fn key(&self) -> &'static str {
        "request-timeout"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = joined(args).ok_or(SettingError::MissingArgs {
            hint: "Specify a timeout in seconds (0 disables it)",
            example: "qchat set request-timeout 60",
        })?;
        let secs: u64 = value.parse().map_err(|_| SettingError::InvalidValue {
            key: "request-timeout",
            reason: format!("'{value}' is not a whole number of seconds"),
        })?;
        config.request_timeout_secs = Some(secs);
        Ok(format!("✅ Set request-timeout to: {secs}s"))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.request_timeout_secs = None;
        "✅ Unset request-timeout".to_string()
    }

    fn format(&self, config: &Config) -> String {
        match config.request_timeout() {
            Some(timeout) => format!("  request-timeout: {}s", timeout.as_secs()),
            None => "  request-timeout: (unset)".to_string(),
        }
    }
}
