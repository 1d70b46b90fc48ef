use super::*;
use crate::api::ChatFailure;
use crate::core::message::Role;
use crate::utils::test_utils::{create_online_test_app, create_test_app};

fn request_id_of(command: Option<AppCommand>) -> u64 {
    match command {
        Some(AppCommand::SendChat(params)) => params.request_id,
        other => panic!("expected chat command, got {other:?}"),
    }
}

#[test]
fn fresh_app_snapshot() {
    let app = create_test_app();
    let snapshot = app.snapshot();

    assert!(snapshot.messages.is_empty());
    assert_eq!(snapshot.backend_status, BackendStatus::Checking);
    assert_eq!(snapshot.request_state, RequestState::Idle);
    assert_eq!(snapshot.last_error, None);
    assert_eq!(snapshot.input, "");
    assert!(!snapshot.can_submit);
    assert!(!snapshot.show_credential_warning);
}

#[test]
fn checking_status_disables_send_control_but_not_guard() {
    let mut app = create_test_app();
    app.session.set_credential("abc");
    app.input = "Hi".into();

    assert!(!app.can_submit());
    assert_eq!(app.submit_blocker("Hi"), None);
}

#[test]
fn send_control_is_disabled_while_sending() {
    let mut app = create_online_test_app();
    apply_action(
        &mut app,
        AppAction::SubmitMessage {
            message: "Hi".into(),
        },
    );
    app.input = "next".into();

    assert!(!app.snapshot().can_submit);
    assert_eq!(
        app.submit_blocker("next"),
        Some(SubmitBlocker::RequestInFlight)
    );
}

#[test]
fn scenario_successful_turn() {
    let mut app = create_online_test_app();
    apply_actions(
        &mut app,
        [
            AppAction::SetCredential {
                credential: "abc".into(),
            },
            AppAction::SetModel {
                model: Provider::Gemini,
            },
        ],
    );

    let command = apply_action(
        &mut app,
        AppAction::SubmitMessage {
            message: "Hi".into(),
        },
    );
    let request_id = match command {
        Some(AppCommand::SendChat(params)) => {
            assert_eq!(params.request.model, Provider::Gemini);
            assert_eq!(params.request.api_key, "abc");
            params.request_id
        }
        other => panic!("expected chat command, got {other:?}"),
    };

    apply_action(
        &mut app,
        AppAction::ChatSucceeded {
            request_id,
            reply: "Hello!".into(),
        },
    );

    assert_eq!(
        app.messages(),
        &[Message::user("Hi"), Message::assistant("Hello!")]
    );
    assert_eq!(app.request_state(), RequestState::Idle);
}

#[test]
fn scenario_alternating_turns_with_failure_in_between() {
    let mut app = create_online_test_app();

    let first = request_id_of(apply_action(
        &mut app,
        AppAction::SubmitMessage {
            message: "one".into(),
        },
    ));
    apply_action(
        &mut app,
        AppAction::ChatSucceeded {
            request_id: first,
            reply: "reply one".into(),
        },
    );

    let second = request_id_of(apply_action(
        &mut app,
        AppAction::SubmitMessage {
            message: "two".into(),
        },
    ));
    apply_action(
        &mut app,
        AppAction::ChatFailed {
            request_id: second,
            failure: ChatFailure::Server { status: 502 },
        },
    );

    let third = request_id_of(apply_action(
        &mut app,
        AppAction::SubmitMessage {
            message: "three".into(),
        },
    ));
    apply_action(
        &mut app,
        AppAction::ChatSucceeded {
            request_id: third,
            reply: "reply three".into(),
        },
    );

    let roles: Vec<Role> = app.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::User,
            Role::Assistant,
            Role::User,
            Role::System,
            Role::User,
            Role::Assistant
        ]
    );
    assert_eq!(app.messages()[3].content, "Error: Server error: 502");
    assert_eq!(app.last_error(), None);
}

#[test]
fn offline_backend_blocks_every_submit() {
    let mut app = create_test_app();
    app.session.set_credential("abc");
    apply_action(&mut app, AppAction::StartProbe);
    apply_action(
        &mut app,
        AppAction::ProbeCompleted {
            result: Err(ChatFailure::Unreachable),
        },
    );

    let commands = apply_actions(
        &mut app,
        (0..3).map(|i| AppAction::SubmitMessage {
            message: format!("attempt {i}"),
        }),
    );

    assert!(commands.is_empty());
    assert!(app.messages().is_empty());
    let snapshot = app.snapshot();
    assert_eq!(snapshot.backend_status, BackendStatus::Offline);
    assert_eq!(
        snapshot.backend_advisory.as_deref(),
        Some(BACKEND_OFFLINE_ADVISORY)
    );
    assert_eq!(snapshot.last_error, None);
    assert!(!snapshot.can_submit);
}
