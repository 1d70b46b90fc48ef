//! qchat is a chat client that reaches several LLM providers through a
//! single proxy backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state: the transcript, model and key selection,
//!   backend connectivity, and the orchestrator task that serializes every
//!   change.
//! - [`api`] defines the backend wire types and the HTTP calls that carry
//!   them, including the failure taxonomy shown to users.
//! - [`commands`] implements slash-command parsing for the chat prompt.
//! - [`cli`] parses arguments, configures logging, and runs the interactive
//!   and one-shot front ends.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which builds an [`core::app::App`] and hands
//! it to [`core::orchestrator::Orchestrator`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod utils;
