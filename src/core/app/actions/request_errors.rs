use tracing::warn;

use super::{App, AppCommand};
use crate::api::ChatFailure;
use crate::core::message::Message;

/// Settle a failed request: the error goes into the transcript as a
/// `system` entry and into `last_error`. The user's message stays.
pub(super) fn handle_request_error(
    app: &mut App,
    request_id: u64,
    failure: ChatFailure,
) -> Option<AppCommand> {
    if !app.request.is_in_flight(request_id) {
        warn!(request_id, "Ignoring failure for a request that is not in flight");
        return None;
    }

    warn!(request_id, kind = failure.kind(), %failure, "Chat request failed");
    app.conversation.append(Message::system(failure.transcript_text()));
    app.request.finish(Some(failure.user_message()));
    None
}
