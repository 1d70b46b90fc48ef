use super::CommandResult;
use crate::core::orchestrator::OrchestratorHandle;

pub type CommandHandler = fn(&OrchestratorHandle, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands.",
        handler: super::handle_help,
    },
    Command {
        name: "model",
        usage: "/model [name]",
        help: "Show or switch the model used for the next message.",
        handler: super::handle_model,
    },
    Command {
        name: "models",
        usage: "/models",
        help: "List the supported models.",
        handler: super::handle_models,
    },
    Command {
        name: "key",
        usage: "/key [api-key]",
        help: "Set the API key for this session. No argument clears it.",
        handler: super::handle_key,
    },
    Command {
        name: "reasoning",
        usage: "/reasoning [on|off]",
        help: "Toggle or set the reasoning preference.",
        handler: super::handle_reasoning,
    },
    Command {
        name: "theme",
        usage: "/theme [light|dark]",
        help: "Toggle or set the theme.",
        handler: super::handle_theme,
    },
    Command {
        name: "status",
        usage: "/status",
        help: "Show backend status and session settings.",
        handler: super::handle_status,
    },
    Command {
        name: "quit",
        usage: "/quit",
        help: "Leave the chat.",
        handler: super::handle_quit,
    },
];
