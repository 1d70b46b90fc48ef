//! The fixed set of model providers the backend proxies to.
//!
//! The client never talks to a provider directly; it only names one in each
//! chat request. The advisory text mirrors what the backend does upstream so
//! the user knows which model answers and where a key can be obtained.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Provider {
    OpenAI,
    #[default]
    Gemini,
    Anthropic,
    DeepSeek,
    Mistral,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::OpenAI,
        Provider::Gemini,
        Provider::Anthropic,
        Provider::DeepSeek,
        Provider::Mistral,
    ];

    /// Wire name sent in the `model` field of a chat request.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Gemini => "Gemini",
            Provider::Anthropic => "Anthropic",
            Provider::DeepSeek => "DeepSeek",
            Provider::Mistral => "Mistral",
        }
    }

    /// Upstream model the backend selects for this provider.
    pub fn upstream_model(self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-3.5-turbo",
            Provider::Gemini => "gemini-pro",
            Provider::Anthropic => "claude-2.0",
            Provider::DeepSeek => "deepseek-chat",
            Provider::Mistral => "mistral-medium",
        }
    }

    pub fn key_url(self) -> &'static str {
        match self {
            Provider::OpenAI => "platform.openai.com/api-keys",
            Provider::Gemini => "aistudio.google.com/app/apikey",
            Provider::Anthropic => "console.anthropic.com/settings/keys",
            Provider::DeepSeek => "platform.deepseek.com/api-key",
            Provider::Mistral => "console.mistral.ai/api-keys/",
        }
    }

    pub fn info(self) -> String {
        format!("Uses {}. Get key at {}", self.upstream_model(), self.key_url())
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.as_str()).collect()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a model name is not one of the supported providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderParseError {
    pub input: String,
}

impl fmt::Display for ProviderParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown model '{}'. Available models: {}",
            self.input,
            Provider::names().join(", ")
        )
    }
}

impl std::error::Error for ProviderParseError {}

impl FromStr for Provider {
    type Err = ProviderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ProviderParseError {
                input: trimmed.to_string(),
            })
    }
}

impl TryFrom<String> for Provider {
    type Error = ProviderParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Provider> for String {
    fn from(value: Provider) -> Self {
        value.as_str().to_string()
    }
}
