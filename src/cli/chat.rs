//! Line-oriented interactive chat.
//!
//! Input is read from stdin on the caller's task; a renderer task follows
//! the snapshot stream and prints whatever changed.

use std::error::Error;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::commands::{process_input, CommandResult};
use crate::core::app::{BackendStatus, RequestState, SessionSnapshot, SubmitBlocker};
use crate::core::message::Role;
use crate::core::orchestrator::OrchestratorHandle;

pub async fn run_chat(handle: &OrchestratorHandle) -> Result<(), Box<dyn Error>> {
    let snapshot = handle.snapshot();
    println!(
        "qchat: chatting with {}. Type /help for commands, /quit to leave.",
        snapshot.model
    );

    let renderer = tokio::spawn(render_updates(handle.subscribe()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match process_input(handle, &line) {
            CommandResult::Continue => {}
            CommandResult::Feedback(text) => println!("{text}"),
            CommandResult::ProcessAsMessage(text) => {
                if let Some(hint) = rejection_hint(&handle.snapshot()) {
                    println!("{hint}");
                    continue;
                }
                handle.submit(text);
            }
            CommandResult::Quit => break,
        }
    }

    renderer.abort();
    Ok(())
}

/// Why a line cannot be sent right now.
/// Sending stays disabled until the first probe has settled.
fn rejection_hint(snapshot: &SessionSnapshot) -> Option<&'static str> {
    match snapshot.backend_status {
        BackendStatus::Checking => {
            return Some("Still checking the backend, try again in a moment.")
        }
        BackendStatus::Offline => return Some("The backend is offline. Restart it and qchat."),
        BackendStatus::Online => {}
    }
    if !snapshot.has_credential {
        return Some("Set an API key first with /key <api-key>.");
    }
    if snapshot.request_state == RequestState::Sending {
        return Some("Waiting for the previous reply.");
    }
    None
}

async fn render_updates(mut rx: watch::Receiver<SessionSnapshot>) {
    let mut previous = rx.borrow_and_update().clone();
    let mut warned_about_key = false;

    while rx.changed().await.is_ok() {
        let current = rx.borrow_and_update().clone();
        for line in describe_changes(&previous, &current, &mut warned_about_key) {
            println!("{line}");
        }
        previous = current;
    }
}

/// Lines to print for the transition from `previous` to `current`.
fn describe_changes(
    previous: &SessionSnapshot,
    current: &SessionSnapshot,
    warned_about_key: &mut bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    if current.backend_status != previous.backend_status {
        match current.backend_status {
            BackendStatus::Online => lines.push("· backend online".to_string()),
            BackendStatus::Offline => lines.push(format!(
                "· {}",
                current.backend_advisory.as_deref().unwrap_or("backend offline")
            )),
            BackendStatus::Checking => {}
        }
    }

    if current.show_credential_warning && !*warned_about_key {
        lines.push(format!(
            "· No API key set. Use /key <api-key>. {}",
            current.model.info()
        ));
        *warned_about_key = true;
    }

    if current.rejected_submits > previous.rejected_submits {
        let reason = current
            .last_rejection
            .map(SubmitBlocker::as_str)
            .unwrap_or("rejected");
        lines.push(format!("· message not sent ({reason})"));
    }

    if current.request_state == RequestState::Sending
        && previous.request_state == RequestState::Idle
    {
        lines.push("· thinking...".to_string());
    }

    for message in current.messages.iter().skip(previous.messages.len()) {
        match message.role {
            Role::Assistant => lines.push(format!("{}> {}", current.model, message.content)),
            Role::System => lines.push(format!("! {}", message.content)),
            Role::User => {}
        }
    }

    lines
}
