mod connectivity;
mod request;
mod request_errors;
mod settings;

use tokio::sync::mpsc;

use super::{App, Theme};
use crate::api::ChatFailure;
use crate::core::backend::{ChatParams, ProbeParams};
use crate::core::providers::Provider;

/// Everything that can change orchestrator state: user intents from the
/// presentation layer and completions reported by background tasks.
#[derive(Debug)]
pub enum AppAction {
    StartProbe,
    ProbeCompleted {
        result: Result<(), ChatFailure>,
    },
    SetInput {
        text: String,
    },
    SubmitInput,
    SubmitMessage {
        message: String,
    },
    ChatSucceeded {
        request_id: u64,
        reply: String,
    },
    ChatFailed {
        request_id: u64,
        failure: ChatFailure,
    },
    SetModel {
        model: Provider,
    },
    SetCredential {
        credential: String,
    },
    SetReasoning {
        enabled: bool,
    },
    ToggleReasoning,
    SetTheme {
        theme: Theme,
    },
    ToggleTheme,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }

    /// A dispatcher that does not keep the queue open on its own.
    pub fn downgrade(&self) -> WeakAppActionDispatcher {
        WeakAppActionDispatcher {
            tx: self.tx.downgrade(),
        }
    }
}

/// Used by background tasks: once every strong dispatcher is gone the
/// orchestrator has stopped, and late completions are dropped.
#[derive(Clone)]
pub struct WeakAppActionDispatcher {
    tx: mpsc::WeakUnboundedSender<AppAction>,
}

impl WeakAppActionDispatcher {
    /// Returns `false` if the action could not be delivered.
    pub fn dispatch(&self, action: AppAction) -> bool {
        match self.tx.upgrade() {
            Some(tx) => tx.send(action).is_ok(),
            None => false,
        }
    }
}

/// Side effects requested by a transition. The caller executes them; the
/// state machine itself never touches the network.
#[derive(Debug)]
pub enum AppCommand {
    ProbeBackend(ProbeParams),
    SendChat(ChatParams),
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::StartProbe | AppAction::ProbeCompleted { .. } => {
            connectivity::handle_connectivity_action(app, action)
        }

        AppAction::SubmitInput
        | AppAction::SubmitMessage { .. }
        | AppAction::ChatSucceeded { .. } => request::handle_request_action(app, action),

        AppAction::ChatFailed {
            request_id,
            failure,
        } => request_errors::handle_request_error(app, request_id, failure),

        AppAction::SetInput { .. }
        | AppAction::SetModel { .. }
        | AppAction::SetCredential { .. }
        | AppAction::SetReasoning { .. }
        | AppAction::ToggleReasoning
        | AppAction::SetTheme { .. }
        | AppAction::ToggleTheme => settings::handle_settings_action(app, action),
    }
}
