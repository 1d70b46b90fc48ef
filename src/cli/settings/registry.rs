//! Registry of setting handlers.

use std::collections::HashMap;

use super::handlers::{
    BackendUrlHandler, DefaultModelHandler, ReasoningHandler, RequestTimeoutHandler, ThemeHandler,
};
use super::SettingHandler;
use crate::core::config::data::Config;

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in display order for `qchat set` output.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(BackendUrlHandler));
        registry.register(Box::new(DefaultModelHandler));
        registry.register(Box::new(ThemeHandler));
        registry.register(Box::new(ReasoningHandler));
        registry.register(Box::new(RequestTimeoutHandler));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    /// Get a handler by key.
    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    /// Render every setting, one per line.
    pub fn describe(&self, config: &Config) -> String {
        let mut out = String::from("Current configuration:");
        for key in &self.display_order {
            if let Some(handler) = self.get(key) {
                out.push('\n');
                out.push_str(&handler.format(config));
            }
        }
        out
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
