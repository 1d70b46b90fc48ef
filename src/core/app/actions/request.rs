use tracing::{debug, info};

use super::{App, AppAction, AppCommand};
use crate::core::message::Message;

/// Longest message prefix written to the log.
const LOG_PREVIEW_CHARS: usize = 50;

pub(super) fn handle_request_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput => {
            let message = app.input.clone();
            submit_message(app, message)
        }
        AppAction::SubmitMessage { message } => submit_message(app, message),
        AppAction::ChatSucceeded { request_id, reply } => {
            complete_request(app, request_id, reply);
            None
        }
        _ => unreachable!("non-request action routed to request handler"),
    }
}

/// Accept a message if every guard passes: append it optimistically, clear
/// the input, and hand back the one request to issue.
fn submit_message(app: &mut App, message: String) -> Option<AppCommand> {
    if let Some(blocker) = app.submit_blocker(&message) {
        debug!(reason = blocker.as_str(), "Submit ignored");
        app.request.reject(blocker);
        return None;
    }

    let content = message.trim().to_string();
    app.conversation.append(Message::user(content.clone()));
    app.input.clear();
    let request_id = app.request.begin();

    info!(
        request_id,
        model = %app.session.selected_model(),
        preview = %preview(&content),
        "Sending chat request"
    );

    Some(AppCommand::SendChat(app.chat_params(content, request_id)))
}

fn complete_request(app: &mut App, request_id: u64, reply: String) {
    if !app.request.is_in_flight(request_id) {
        debug!(request_id, "Ignoring reply for a request that is not in flight");
        return;
    }

    app.conversation.append(Message::assistant(reply));
    app.request.finish(None);
    info!(request_id, "Chat request completed");
}

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
