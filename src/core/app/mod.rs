//! Orchestrator state and the pure state machine that drives it.
//!
//! [`App`] owns the transcript, the session preferences, the backend status,
//! and the send lifecycle. It is mutated only through [`apply_action`], which
//! returns the side effect (if any) the caller must execute. Keeping the
//! network out of this module makes every transition testable without I/O.

use std::time::Duration;

use tracing::debug;

use crate::api::ChatRequest;
use crate::core::backend::{ChatParams, ProbeParams};
use crate::core::message::Message;
use crate::core::providers::Provider;

pub mod actions;
pub mod connectivity;
pub mod conversation;
pub mod request;
pub mod session;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionDispatcher, AppCommand,
    WeakAppActionDispatcher,
};
pub use connectivity::{BackendStatus, ConnectivityMonitor, BACKEND_OFFLINE_ADVISORY};
pub use conversation::ConversationLog;
pub use request::{RequestLifecycle, RequestState};
pub use session::{SessionConfig, Theme};

/// Startup parameters for an [`App`].
#[derive(Debug, Clone)]
pub struct AppInitConfig {
    pub base_url: String,
    pub model: Provider,
    pub reasoning: bool,
    pub theme: Theme,
    pub request_timeout: Option<Duration>,
}

/// Where requests go. The client is shared by every request of the session.
#[derive(Debug, Clone)]
pub struct BackendEndpoint {
    pub client: reqwest::Client,
    pub base_url: String,
}

/// Why a submit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocker {
    EmptyInput,
    MissingCredential,
    RequestInFlight,
    BackendOffline,
}

impl SubmitBlocker {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmitBlocker::EmptyInput => "empty input",
            SubmitBlocker::MissingCredential => "missing credential",
            SubmitBlocker::RequestInFlight => "request in flight",
            SubmitBlocker::BackendOffline => "backend offline",
        }
    }
}

/// Read-only projection of orchestrator state for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub backend_status: BackendStatus,
    pub request_state: RequestState,
    /// Failure text of the most recent send attempt.
    pub last_error: Option<String>,
    /// Set when the startup probe failed; independent of any send.
    pub backend_advisory: Option<String>,
    /// Count of submits refused by the guard, with the latest reason.
    pub rejected_submits: u64,
    pub last_rejection: Option<SubmitBlocker>,
    pub model: Provider,
    pub reasoning_enabled: bool,
    pub theme: Theme,
    pub input: String,
    pub has_credential: bool,
    /// Whether the send affordance should be enabled.
    pub can_submit: bool,
    /// The backend is up but nothing can be sent until a key is entered.
    pub show_credential_warning: bool,
}

pub struct App {
    pub session: SessionConfig,
    pub(crate) conversation: ConversationLog,
    pub(crate) connectivity: ConnectivityMonitor,
    pub(crate) request: RequestLifecycle,
    pub(crate) input: String,
    endpoint: BackendEndpoint,
}

impl App {
    pub fn new(init: AppInitConfig) -> Result<Self, reqwest::Error> {
        let client = Self::build_client(init.request_timeout)?;
        Ok(Self::with_client(client, init))
    }

    /// The HTTP client shared by the probe and every chat request.
    pub fn build_client(
        request_timeout: Option<Duration>,
    ) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn with_client(client: reqwest::Client, init: AppInitConfig) -> Self {
        Self {
            session: SessionConfig::new(init.model, init.reasoning, init.theme),
            conversation: ConversationLog::new(),
            connectivity: ConnectivityMonitor::new(),
            request: RequestLifecycle::new(),
            input: String::new(),
            endpoint: BackendEndpoint {
                client,
                base_url: init.base_url,
            },
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn backend_status(&self) -> BackendStatus {
        self.connectivity.status()
    }

    pub fn request_state(&self) -> RequestState {
        self.request.state()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.request.last_error()
    }

    pub fn backend_advisory(&self) -> Option<&'static str> {
        self.connectivity.advisory()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn base_url(&self) -> &str {
        &self.endpoint.base_url
    }

    /// Guard evaluated on every submit. Only an offline backend blocks here;
    /// `Checking` is left to the presentation, which disables sending until
    /// the probe settles.
    pub fn submit_blocker(&self, message: &str) -> Option<SubmitBlocker> {
        if message.trim().is_empty() {
            Some(SubmitBlocker::EmptyInput)
        } else if !self.session.has_credential() {
            Some(SubmitBlocker::MissingCredential)
        } else if self.request.is_sending() {
            Some(SubmitBlocker::RequestInFlight)
        } else if self.connectivity.status().is_offline() {
            Some(SubmitBlocker::BackendOffline)
        } else {
            None
        }
    }

    /// The stricter rule a UI applies to its send control.
    pub fn can_submit(&self) -> bool {
        self.submit_blocker(&self.input).is_none() && self.connectivity.status().is_online()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let status = self.connectivity.status();
        SessionSnapshot {
            messages: self.conversation.snapshot(),
            backend_status: status,
            request_state: self.request.state(),
            last_error: self.request.last_error().map(str::to_owned),
            backend_advisory: self.connectivity.advisory().map(str::to_owned),
            rejected_submits: self.request.rejected_submits(),
            last_rejection: self.request.last_rejection(),
            model: self.session.selected_model(),
            reasoning_enabled: self.session.reasoning_enabled(),
            theme: self.session.theme(),
            input: self.input.clone(),
            has_credential: self.session.has_credential(),
            can_submit: self.can_submit(),
            show_credential_warning: !self.session.has_credential() && status.is_online(),
        }
    }

    pub(crate) fn probe_params(&self) -> ProbeParams {
        ProbeParams {
            client: self.endpoint.client.clone(),
            base_url: self.endpoint.base_url.clone(),
        }
    }

    /// Build the request from the session as it is right now.
    pub(crate) fn chat_params(&self, message: String, request_id: u64) -> ChatParams {
        debug!(
            request_id,
            model = %self.session.selected_model(),
            reasoning = self.session.reasoning_enabled(),
            "Building chat request"
        );
        ChatParams {
            client: self.endpoint.client.clone(),
            base_url: self.endpoint.base_url.clone(),
            request: ChatRequest {
                model: self.session.selected_model(),
                message,
                api_key: self.session.credential().to_string(),
            },
            request_id,
        }
    }
}

#[cfg(test)]
mod tests;
