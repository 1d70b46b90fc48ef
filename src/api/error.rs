use std::fmt;

use super::ErrorBody;

/// Why a backend call did not produce a usable reply.
///
/// Every variant maps to exactly one user-facing sentence; see
/// [`ChatFailure::user_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFailure {
    /// The request never got a response (refused, reset, timed out).
    Unreachable,

    /// The backend answered with an error body carrying `detail`.
    Api { detail: String },

    /// The backend answered with a non-success status and no usable detail.
    Server { status: u16 },

    /// The request could not be built, or the reply could not be understood.
    Request { message: String },
}

impl ChatFailure {
    pub fn user_message(&self) -> String {
        match self {
            ChatFailure::Unreachable => {
                "No response from server. Is the backend running?".to_string()
            }
            ChatFailure::Api { detail } => format!("API Error: {detail}"),
            ChatFailure::Server { status } => format!("Server error: {status}"),
            ChatFailure::Request { message } => format!("Request failed: {message}"),
        }
    }

    /// Content of the `system` entry appended to the transcript.
    pub fn transcript_text(&self) -> String {
        format!("Error: {}", self.user_message())
    }

    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatFailure::Unreachable => "unreachable",
            ChatFailure::Api { .. } => "api",
            ChatFailure::Server { .. } => "server",
            ChatFailure::Request { .. } => "request",
        }
    }

    /// Classify a transport error raised before any response was read.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ChatFailure::Request {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            ChatFailure::Request {
                message: "malformed reply from server".to_string(),
            }
        } else {
            ChatFailure::Unreachable
        }
    }

    /// Classify a non-success response from its status code and raw body.
    ///
    /// A non-empty string `detail` is used verbatim; an empty or missing one
    /// falls back to the status code. Structured details are rendered as
    /// compact JSON.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.detail);

        match detail {
            Some(serde_json::Value::String(text)) if !text.is_empty() => {
                ChatFailure::Api { detail: text }
            }
            Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => {
                ChatFailure::Server { status }
            }
            Some(other) => ChatFailure::Api {
                detail: other.to_string(),
            },
        }
    }
}

impl fmt::Display for ChatFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ChatFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_follow_taxonomy() {
        assert_eq!(
            ChatFailure::Unreachable.user_message(),
            "No response from server. Is the backend running?"
        );
        assert_eq!(
            ChatFailure::Api {
                detail: "invalid api key".into()
            }
            .user_message(),
            "API Error: invalid api key"
        );
        assert_eq!(
            ChatFailure::Server { status: 502 }.user_message(),
            "Server error: 502"
        );
        assert_eq!(
            ChatFailure::Request {
                message: "builder error".into()
            }
            .user_message(),
            "Request failed: builder error"
        );
    }

    #[test]
    fn transcript_text_is_prefixed() {
        let failure = ChatFailure::Api {
            detail: "invalid api key".into(),
        };
        assert_eq!(
            failure.transcript_text(),
            "Error: API Error: invalid api key"
        );
    }

    #[test]
    fn error_body_with_detail_is_api_error() {
        let failure = ChatFailure::from_error_body(401, r#"{"detail":"invalid api key"}"#);
        assert_eq!(
            failure,
            ChatFailure::Api {
                detail: "invalid api key".into()
            }
        );
    }

    #[test]
    fn error_body_without_detail_falls_back_to_status() {
        assert_eq!(
            ChatFailure::from_error_body(500, "Internal Server Error"),
            ChatFailure::Server { status: 500 }
        );
        assert_eq!(
            ChatFailure::from_error_body(503, r#"{"message":"down"}"#),
            ChatFailure::Server { status: 503 }
        );
        assert_eq!(
            ChatFailure::from_error_body(500, r#"{"detail":""}"#),
            ChatFailure::Server { status: 500 }
        );
        assert_eq!(
            ChatFailure::from_error_body(500, r#"{"detail":null}"#),
            ChatFailure::Server { status: 500 }
        );
    }

    #[test]
    fn whitespace_detail_is_kept_verbatim() {
        assert_eq!(
            ChatFailure::from_error_body(400, r#"{"detail":"  "}"#),
            ChatFailure::Api {
                detail: "  ".into()
            }
        );
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let body = r#"{"detail":[{"loc":["body","apiKey"],"msg":"field required"}]}"#;
        match ChatFailure::from_error_body(422, body) {
            ChatFailure::Api { detail } => {
                assert!(detail.starts_with('['));
                assert!(detail.contains("field required"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
