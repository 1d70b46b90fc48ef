//! The session orchestrator: a single task that owns [`App`] and applies
//! every mutation in arrival order.
//!
//! Presentation code talks to it through an [`OrchestratorHandle`]. Commands
//! are queued as actions, background completions arrive on the same queue,
//! and after each batch the new state is published as a [`SessionSnapshot`]
//! on a watch channel. Nothing outside the task ever holds `&mut App`.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::app::{
    apply_action, App, AppAction, AppActionDispatcher, SessionSnapshot, Theme,
};
use crate::core::backend::BackendService;
use crate::core::providers::{Provider, ProviderParseError};

pub struct Orchestrator {
    app: App,
    rx: mpsc::UnboundedReceiver<AppAction>,
    backend: BackendService,
    snapshots: watch::Sender<SessionSnapshot>,
    shutdown: CancellationToken,
}

#[derive(Clone)]
pub struct OrchestratorHandle {
    dispatcher: AppActionDispatcher,
    snapshots: watch::Receiver<SessionSnapshot>,
    shutdown: CancellationToken,
}

impl Orchestrator {
    pub fn new(app: App) -> (Self, OrchestratorHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = AppActionDispatcher::new(tx);
        let (snapshot_tx, snapshot_rx) = watch::channel(app.snapshot());
        let shutdown = CancellationToken::new();

        let orchestrator = Self {
            app,
            rx,
            backend: BackendService::new(dispatcher.downgrade()),
            snapshots: snapshot_tx,
            shutdown: shutdown.clone(),
        };
        let handle = OrchestratorHandle {
            dispatcher,
            snapshots: snapshot_rx,
            shutdown,
        };
        (orchestrator, handle)
    }

    /// Start the loop on the current runtime. The task yields the final
    /// [`App`] once a handle requests shutdown or every handle is dropped.
    pub fn spawn(app: App) -> (OrchestratorHandle, JoinHandle<App>) {
        let (orchestrator, handle) = Self::new(app);
        let task = tokio::spawn(orchestrator.run());
        (handle, task)
    }

    pub async fn run(mut self) -> App {
        self.apply(AppAction::StartProbe);
        self.publish();

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                action = self.rx.recv() => {
                    let Some(action) = action else { break };
                    self.apply(action);
                    while let Ok(next) = self.rx.try_recv() {
                        self.apply(next);
                    }
                    self.publish();
                }
            }
        }

        debug!("Orchestrator stopped");
        self.app
    }

    fn apply(&mut self, action: AppAction) {
        if let Some(command) = apply_action(&mut self.app, action) {
            self.backend.execute(command);
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.app.snapshot());
    }
}

impl OrchestratorHandle {
    pub fn dispatch(&self, action: AppAction) {
        self.dispatcher.dispatch(action);
    }

    pub fn submit(&self, message: impl Into<String>) {
        self.dispatch(AppAction::SubmitMessage {
            message: message.into(),
        });
    }

    pub fn submit_input(&self) {
        self.dispatch(AppAction::SubmitInput);
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.dispatch(AppAction::SetInput { text: text.into() });
    }

    pub fn set_model(&self, model: Provider) {
        self.dispatch(AppAction::SetModel { model });
    }

    /// Parse and select a provider. Unknown names are rejected here and never
    /// reach the orchestrator.
    pub fn set_model_by_name(&self, name: &str) -> Result<Provider, ProviderParseError> {
        let model = name.parse::<Provider>()?;
        self.set_model(model);
        Ok(model)
    }

    pub fn set_credential(&self, credential: impl Into<String>) {
        self.dispatch(AppAction::SetCredential {
            credential: credential.into(),
        });
    }

    pub fn set_reasoning(&self, enabled: bool) {
        self.dispatch(AppAction::SetReasoning { enabled });
    }

    pub fn toggle_reasoning(&self) {
        self.dispatch(AppAction::ToggleReasoning);
    }

    pub fn set_theme(&self, theme: Theme) {
        self.dispatch(AppAction::SetTheme { theme });
    }

    pub fn toggle_theme(&self) {
        self.dispatch(AppAction::ToggleTheme);
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`. Returns `None`
    /// if the orchestrator has stopped.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Option<SessionSnapshot>
    where
        F: FnMut(&SessionSnapshot) -> bool,
    {
        let mut rx = self.snapshots.clone();
        rx.wait_for(|snapshot| predicate(snapshot))
            .await
            .ok()
            .map(|snapshot| snapshot.clone())
    }

    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
