//! Slash commands for the interactive chat prompt.
//!
//! Anything that does not start with a known `/command` is handed back to
//! the caller to be sent as a chat message.

mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::app::Theme;
use crate::core::orchestrator::OrchestratorHandle;
use crate::core::providers::Provider;

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Feedback(String),
    ProcessAsMessage(String),
    Quit,
}

pub fn process_input(handle: &OrchestratorHandle, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    if let Some(command) = registry::find_command(command_name) {
        let invocation = CommandInvocation { args };
        (command.handler)(handle, invocation)
    } else {
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

pub(super) fn handle_help(
    _handle: &OrchestratorHandle,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    let mut help = String::from("Commands:");
    for command in all_commands() {
        help.push_str(&format!("\n  {:<22} {}", command.usage, command.help));
    }
    help.push_str("\nAnything else is sent to the selected model.");
    CommandResult::Feedback(help)
}

pub(super) fn handle_model(
    handle: &OrchestratorHandle,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    if invocation.args.is_empty() {
        let model = handle.snapshot().model;
        return CommandResult::Feedback(format!("Current model: {model}. {}", model.info()));
    }
    match handle.set_model_by_name(invocation.args) {
        Ok(model) => CommandResult::Feedback(format!("Model set to {model}. {}", model.info())),
        Err(err) => CommandResult::Feedback(err.to_string()),
    }
}

pub(super) fn handle_models(
    handle: &OrchestratorHandle,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    let current = handle.snapshot().model;
    let mut out = String::from("Available models:");
    for model in Provider::ALL {
        let marker = if model == current { "*" } else { " " };
        out.push_str(&format!("\n {marker} {:<10} {}", model.as_str(), model.info()));
    }
    CommandResult::Feedback(out)
}

pub(super) fn handle_key(
    handle: &OrchestratorHandle,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    handle.set_credential(invocation.args);
    if invocation.args.is_empty() {
        CommandResult::Feedback("API key cleared".to_string())
    } else {
        CommandResult::Feedback("API key set".to_string())
    }
}

pub(super) fn handle_reasoning(
    handle: &OrchestratorHandle,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    match invocation.args.to_ascii_lowercase().as_str() {
        "" => {
            let enabled = !handle.snapshot().reasoning_enabled;
            handle.toggle_reasoning();
            CommandResult::Feedback(format!("Reasoning {}", on_off(enabled)))
        }
        "on" => {
            handle.set_reasoning(true);
            CommandResult::Feedback("Reasoning on".to_string())
        }
        "off" => {
            handle.set_reasoning(false);
            CommandResult::Feedback("Reasoning off".to_string())
        }
        other => CommandResult::Feedback(format!("Usage: /reasoning [on|off] (got '{other}')")),
    }
}

pub(super) fn handle_theme(
    handle: &OrchestratorHandle,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    if invocation.args.is_empty() {
        let theme = handle.snapshot().theme.toggled();
        handle.toggle_theme();
        return CommandResult::Feedback(format!("Theme: {}", theme.as_str()));
    }
    match invocation.args.parse::<Theme>() {
        Ok(theme) => {
            handle.set_theme(theme);
            CommandResult::Feedback(format!("Theme: {}", theme.as_str()))
        }
        Err(_) => CommandResult::Feedback(format!(
            "Unknown theme '{}'. Use light or dark.",
            invocation.args
        )),
    }
}

pub(super) fn handle_status(
    handle: &OrchestratorHandle,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    let snapshot = handle.snapshot();
    let mut out = format!(
        "Backend: {}\nModel: {}\nReasoning: {}\nTheme: {}\nAPI key: {}\nRequest: {}",
        snapshot.backend_status.as_str(),
        snapshot.model,
        on_off(snapshot.reasoning_enabled),
        snapshot.theme.as_str(),
        if snapshot.has_credential { "set" } else { "not set" },
        snapshot.request_state.as_str(),
    );
    if let Some(advisory) = &snapshot.backend_advisory {
        out.push_str(&format!("\n{advisory}"));
    }
    if let Some(error) = &snapshot.last_error {
        out.push_str(&format!("\nLast error: {error}"));
    }
    CommandResult::Feedback(out)
}

pub(super) fn handle_quit(
    _handle: &OrchestratorHandle,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    CommandResult::Quit
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
