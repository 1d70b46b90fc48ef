pub mod data;
pub mod io;

pub use data::{Config, BACKEND_URL_ENV, DEFAULT_BACKEND_URL};
pub use io::ConfigError;

#[cfg(test)]
mod tests;
