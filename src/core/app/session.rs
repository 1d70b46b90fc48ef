use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::providers::{Provider, ProviderParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("invalid theme: {other} (expected light or dark)")),
        }
    }
}

/// Preferences read by the orchestrator every time a request is built.
///
/// Nothing here is cached by the request path; a change made while idle is
/// picked up by the very next send.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    selected_model: Provider,
    credential: String,
    reasoning_enabled: bool,
    theme: Theme,
}

impl SessionConfig {
    pub fn new(selected_model: Provider, reasoning_enabled: bool, theme: Theme) -> Self {
        Self {
            selected_model,
            credential: String::new(),
            reasoning_enabled,
            theme,
        }
    }

    pub fn selected_model(&self) -> Provider {
        self.selected_model
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Whitespace-only credentials count as missing.
    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    pub fn reasoning_enabled(&self) -> bool {
        self.reasoning_enabled
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_model(&mut self, model: Provider) {
        self.selected_model = model;
    }

    /// Select a provider by name. Unknown names leave the selection as is.
    pub fn set_model_by_name(&mut self, name: &str) -> Result<Provider, ProviderParseError> {
        let model = name.parse::<Provider>()?;
        self.selected_model = model;
        Ok(model)
    }

    /// Any text is accepted; the backend is the only judge of validity.
    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
    }

    pub fn set_reasoning(&mut self, enabled: bool) {
        self.reasoning_enabled = enabled;
    }

    pub fn toggle_reasoning(&mut self) -> bool {
        self.reasoning_enabled = !self.reasoning_enabled;
        self.reasoning_enabled
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("selected_model", &self.selected_model)
            .field("has_credential", &self.has_credential())
            .field("reasoning_enabled", &self.reasoning_enabled)
            .field("theme", &self.theme)
            .finish()
    }
}
