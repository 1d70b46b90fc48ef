//! Command-line interface parsing and handling
//!
//! This module parses arguments, sets up logging, and dispatches to the
//! interactive chat, one-shot `say`, `probe`, and the config subcommands.

pub mod chat;
pub mod say;
pub mod settings;

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::probe_backend;
use crate::core::app::{App, AppInitConfig};
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::core::orchestrator::{Orchestrator, OrchestratorHandle};
use crate::core::providers::Provider;
use settings::SettingRegistry;

/// Environment variable holding the log filter (e.g. `qchat=debug`).
pub const LOG_FILTER_ENV: &str = "QCHAT_LOG";

/// Environment variable consulted for the API key when `--api-key` is absent.
pub const API_KEY_ENV: &str = "QCHAT_API_KEY";

#[derive(Parser)]
#[command(name = "qchat")]
#[command(about = "Chat with several LLM providers through one backend")]
#[command(
    long_about = "qchat sends your messages to a chat backend that relays them to the selected \
provider (OpenAI, Gemini, Anthropic, DeepSeek or Mistral). Your API key stays in memory for \
the session and is never written to disk.\n\n\
Environment Variables:\n\
  QCHAT_BACKEND_URL  Backend base URL (overridden by --backend-url)\n\
  QCHAT_API_KEY      API key (overridden by --api-key)\n\
  QCHAT_LOG          Log filter, e.g. 'qchat=debug' (default: warn)\n\n\
Chat commands:\n\
  /help              List commands\n\
  /model <name>      Switch models\n\
  /key <api-key>     Set the API key\n\
  /quit              Leave"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Model to chat with (OpenAI, Gemini, Anthropic, DeepSeek, Mistral)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// API key for the selected provider
    #[arg(short = 'k', long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat (default)
    Chat,
    /// Send a single message and print the reply
    Say {
        /// The message to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Check whether the backend is reachable
    Probe,
    /// Set a configuration value, or list all values when no key is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_ref())?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main(args))
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|err| err.to_string().into())
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command.as_ref().unwrap_or(&Commands::Chat) {
        Commands::Set { key, value } => {
            let path = config_path(&args)?;
            let registry = SettingRegistry::new();
            match settings::run_set(&registry, &path, key.as_deref(), value) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let path = config_path(&args)?;
            let registry = SettingRegistry::new();
            match settings::run_unset(&registry, &path, key) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Probe => {
            let config = Config::load(args.config.as_deref())?;
            let init = init_config(&args, &config)?;
            let client = App::build_client(init.request_timeout)?;
            match probe_backend(&client, &init.base_url).await {
                Ok(()) => {
                    println!("✅ Backend at {} is online", init.base_url);
                    Ok(())
                }
                Err(failure) => {
                    eprintln!("❌ Backend at {} is offline: {failure}", init.base_url);
                    std::process::exit(1);
                }
            }
        }
        Commands::Say { prompt } => {
            let (handle, _task) = start_session(&args)?;
            let code = say::run_say(&handle, prompt).await;
            handle.shutdown();
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::Chat => {
            let (handle, task) = start_session(&args)?;
            chat::run_chat(&handle).await?;
            handle.shutdown();
            task.await?;
            Ok(())
        }
    }
}

fn config_path(args: &Args) -> Result<PathBuf, Box<dyn Error>> {
    args.config
        .clone()
        .or_else(Config::default_config_path)
        .ok_or_else(|| "Could not determine a config directory; pass --config".into())
}

fn init_config(args: &Args, config: &Config) -> Result<AppInitConfig, Box<dyn Error>> {
    let model = match args.model.as_deref() {
        Some(name) => name.parse::<Provider>()?,
        None => config.default_provider(),
    };
    Ok(AppInitConfig {
        base_url: config.resolve_backend_url(args.backend_url.as_deref()),
        model,
        reasoning: config.reasoning_or_default(),
        theme: config.theme_or_default(),
        request_timeout: config.request_timeout(),
    })
}

/// Build the session and start its orchestrator on the current runtime.
fn start_session(
    args: &Args,
) -> Result<(OrchestratorHandle, tokio::task::JoinHandle<App>), Box<dyn Error>> {
    let config = Config::load(args.config.as_deref())?;
    if let Some(path) = args.config.clone().or_else(Config::default_config_path) {
        info!(path = %path_display(&path), "Using config file");
    }
    let init = init_config(args, &config)?;
    info!(base_url = %init.base_url, model = %init.model, "Starting session");

    let mut app = App::new(init)?;
    let credential = args
        .api_key
        .clone()
        .or_else(|| std::env::var(API_KEY_ENV).ok());
    if let Some(credential) = credential {
        app.session.set_credential(credential);
    }

    Ok(Orchestrator::spawn(app))
}
