//! Wire payloads exchanged with the chat backend and the HTTP calls that
//! carry them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::core::providers::Provider;

pub mod backend;
pub mod error;

pub use backend::{post_chat, probe_backend};
pub use error::ChatFailure;

/// Body of `POST <base>/chat`.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: Provider,
    pub message: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

impl fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRequest")
            .field("model", &self.model)
            .field("message", &self.message)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Successful chat response. Only `reply` is read; other fields are ignored.
#[derive(Deserialize, Debug)]
pub struct ChatReply {
    pub reply: String,
}

/// Error response. `detail` is usually a string forwarded from the
/// provider, but validation failures carry structured values.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}
