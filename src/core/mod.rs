pub mod app;
pub mod backend;
pub mod config;
pub mod message;
pub mod orchestrator;
pub mod providers;
