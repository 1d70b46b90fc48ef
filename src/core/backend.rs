//! Executes orchestrator commands as background tasks.
//!
//! Each command becomes one spawned task whose outcome is reported back to
//! the orchestrator as an [`AppAction`]. A request task is always settled:
//! if it panics or is aborted, the join error is reported as a failure so the
//! orchestrator never stays in `Sending`.

use tracing::{debug, error};

use crate::api::{self, ChatFailure, ChatRequest};
use crate::core::app::{AppAction, AppCommand, WeakAppActionDispatcher};

#[derive(Debug)]
pub struct ProbeParams {
    pub client: reqwest::Client,
    pub base_url: String,
}

#[derive(Debug)]
pub struct ChatParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub request: ChatRequest,
    pub request_id: u64,
}

#[derive(Clone)]
pub struct BackendService {
    dispatcher: WeakAppActionDispatcher,
}

impl BackendService {
    pub fn new(dispatcher: WeakAppActionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn execute(&self, command: AppCommand) {
        match command {
            AppCommand::ProbeBackend(params) => self.spawn_probe(params),
            AppCommand::SendChat(params) => self.spawn_chat(params),
        }
    }

    pub fn spawn_probe(&self, params: ProbeParams) {
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            let ProbeParams { client, base_url } = params;
            let task =
                tokio::spawn(async move { api::probe_backend(&client, &base_url).await });

            let result = match task.await {
                Ok(result) => result,
                Err(join_err) => {
                    error!(%join_err, "Probe task did not complete");
                    Err(ChatFailure::Unreachable)
                }
            };
            if !dispatcher.dispatch(AppAction::ProbeCompleted { result }) {
                debug!("Orchestrator gone; probe result dropped");
            }
        });
    }

    pub fn spawn_chat(&self, params: ChatParams) {
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            let ChatParams {
                client,
                base_url,
                request,
                request_id,
            } = params;
            debug!(request_id, "Chat request task started");

            let task =
                tokio::spawn(async move { api::post_chat(&client, &base_url, &request).await });

            let action = match task.await {
                Ok(Ok(reply)) => AppAction::ChatSucceeded { request_id, reply },
                Ok(Err(failure)) => AppAction::ChatFailed {
                    request_id,
                    failure,
                },
                Err(join_err) => {
                    error!(request_id, %join_err, "Chat request task did not complete");
                    AppAction::ChatFailed {
                        request_id,
                        failure: ChatFailure::Request {
                            message: join_err.to_string(),
                        },
                    }
                }
            };
            if !dispatcher.dispatch(action) {
                debug!(request_id, "Orchestrator gone; chat completion dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::AppActionDispatcher;
    use crate::core::providers::Provider;
    use crate::utils::test_utils::{
        spawn_mock_backend, test_client, unreachable_base_url, MockResponse,
    };
    use tokio::sync::mpsc;

    fn service() -> (
        BackendService,
        AppActionDispatcher,
        mpsc::UnboundedReceiver<AppAction>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = AppActionDispatcher::new(tx);
        (BackendService::new(dispatcher.downgrade()), dispatcher, rx)
    }

    fn chat_params(base_url: String, request_id: u64) -> ChatParams {
        ChatParams {
            client: test_client(),
            base_url,
            request: ChatRequest {
                model: Provider::Gemini,
                message: "Hi".into(),
                api_key: "abc".into(),
            },
            request_id,
        }
    }

    #[tokio::test]
    async fn chat_success_is_reported_with_request_id() {
        let (base_url, _captured) = spawn_mock_backend(vec![MockResponse::json(
            200,
            serde_json::json!({"reply": "Hello!"}),
        )])
        .await;
        let (service, _dispatcher, mut rx) = service();

        service.execute(AppCommand::SendChat(chat_params(base_url, 42)));

        match rx.recv().await.expect("completion") {
            AppAction::ChatSucceeded { request_id, reply } => {
                assert_eq!(request_id, 42);
                assert_eq!(reply, "Hello!");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn chat_failure_is_reported_exactly_once() {
        let base_url = unreachable_base_url().await;
        let (service, dispatcher, mut rx) = service();

        service.spawn_chat(chat_params(base_url, 7));

        match rx.recv().await.expect("completion") {
            AppAction::ChatFailed {
                request_id,
                failure,
            } => {
                assert_eq!(request_id, 7);
                assert_eq!(failure, ChatFailure::Unreachable);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        drop(service);
        drop(dispatcher);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn completion_is_dropped_once_the_queue_owner_is_gone() {
        let base_url = unreachable_base_url().await;
        let (service, dispatcher, mut rx) = service();
        drop(dispatcher);

        service.spawn_chat(chat_params(base_url, 9));

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn probe_outcome_is_reported() {
        let base_url = unreachable_base_url().await;
        let (service, _dispatcher, mut rx) = service();

        service.execute(AppCommand::ProbeBackend(ProbeParams {
            client: test_client(),
            base_url,
        }));

        match rx.recv().await.expect("completion") {
            AppAction::ProbeCompleted { result } => {
                assert_eq!(result, Err(ChatFailure::Unreachable));
            }
            other => panic!("expected probe completion, got {other:?}"),
        }
    }
}
