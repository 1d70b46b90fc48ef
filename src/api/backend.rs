use tracing::debug;

use super::{ChatFailure, ChatReply, ChatRequest};
use crate::utils::url::construct_api_url;

/// Issue the liveness request, `GET <base>/`.
///
/// Any success status counts as online. Status codes are otherwise not
/// distinguished: a non-success answer is reported the same way as an
/// unreachable backend would be by the caller.
pub async fn probe_backend(client: &reqwest::Client, base_url: &str) -> Result<(), ChatFailure> {
    let url = construct_api_url(base_url, "");
    debug!(%url, "Probing backend");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(ChatFailure::from_transport)?;

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ChatFailure::Server {
            status: status.as_u16(),
        })
    }
}

/// Send one chat turn and return the reply text.
pub async fn post_chat(
    client: &reqwest::Client,
    base_url: &str,
    request: &ChatRequest,
) -> Result<String, ChatFailure> {
    let url = construct_api_url(base_url, "chat");

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await
        .map_err(ChatFailure::from_transport)?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "Backend returned an error status");
        return Err(ChatFailure::from_error_body(status.as_u16(), &error_text));
    }

    let body = response
        .text()
        .await
        .map_err(ChatFailure::from_transport)?;
    parse_reply(&body)
}

fn parse_reply(body: &str) -> Result<String, ChatFailure> {
    serde_json::from_str::<ChatReply>(body)
        .map(|parsed| parsed.reply)
        .map_err(|_| ChatFailure::Request {
            message: "malformed reply from server".to_string(),
        })
}
