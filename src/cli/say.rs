//! One-shot "say" command: send a single message and print the reply.

use tracing::debug;

use crate::core::app::{BackendStatus, RequestState};
use crate::core::message::Role;
use crate::core::orchestrator::OrchestratorHandle;

/// Returns the process exit code.
pub async fn run_say(handle: &OrchestratorHandle, prompt: &[String]) -> i32 {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: qchat say <prompt>");
        return 1;
    }

    let Some(ready) = handle
        .wait_for(|s| s.backend_status != BackendStatus::Checking)
        .await
    else {
        return 1;
    };
    if ready.backend_status.is_offline() {
        if let Some(advisory) = &ready.backend_advisory {
            eprintln!("❌ {advisory}");
        }
        return 1;
    }
    if !ready.has_credential {
        eprintln!("❌ No API key. Pass --api-key or set QCHAT_API_KEY.");
        eprintln!("   {}", ready.model.info());
        return 1;
    }

    let sent_at = ready.messages.len();
    debug!(model = %ready.model, "Sending one-shot message");
    handle.submit(prompt);

    let Some(done) = handle
        .wait_for(|s| s.messages.len() >= sent_at + 2 && s.request_state == RequestState::Idle)
        .await
    else {
        return 1;
    };

    match done.messages.last() {
        Some(message) if message.role == Role::Assistant => {
            println!("{}", message.content);
            0
        }
        Some(message) => {
            eprintln!("❌ {}", message.content);
            1
        }
        None => 1,
    }
}
