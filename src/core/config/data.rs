use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::core::app::session::Theme;
use crate::core::providers::Provider;
use crate::utils::url::normalize_base_url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Deployment-time override for the backend base URL.
pub const BACKEND_URL_ENV: &str = "QCHAT_BACKEND_URL";

/// User preferences persisted between runs. The credential is deliberately
/// absent: it only ever lives in memory.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the chat backend (e.g., "http://localhost:8000")
    pub backend_url: Option<String>,
    /// Provider selected at startup (e.g., "Gemini")
    pub default_model: Option<String>,
    pub theme: Option<Theme>,
    /// Initial state of the reasoning toggle
    pub reasoning: Option<bool>,
    /// Per-request timeout. Unset means the transport default.
    pub request_timeout_secs: Option<u64>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// Resolve the backend base URL: explicit override, then the
    /// environment, then this file, then the built-in default.
    pub fn resolve_backend_url(&self, cli_override: Option<&str>) -> String {
        let env_value = std::env::var(BACKEND_URL_ENV).ok();
        self.resolve_backend_url_with(cli_override, env_value.as_deref())
    }

    pub(crate) fn resolve_backend_url_with(
        &self,
        cli_override: Option<&str>,
        env_value: Option<&str>,
    ) -> String {
        let chosen = [cli_override, env_value, self.backend_url.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL);
        normalize_base_url(chosen)
    }

    /// The configured startup provider, or the default when unset or unknown.
    pub fn default_provider(&self) -> Provider {
        match self.default_model.as_deref() {
            Some(name) => name.parse().unwrap_or_else(|err| {
                warn!(%err, "Ignoring invalid default-model in config");
                Provider::default()
            }),
            None => Provider::default(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn theme_or_default(&self) -> Theme {
        self.theme.unwrap_or_default()
    }

    pub fn reasoning_or_default(&self) -> bool {
        self.reasoning.unwrap_or(false)
    }
}
