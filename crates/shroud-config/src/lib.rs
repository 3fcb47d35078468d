//! Configuration for the Shroud entity visibility filter.
//!
//! Holds the user-editable filter rules and debug settings, persisted to disk
//! as a RON document. Supports CLI overrides via clap and hot-reload
//! detection. Every field defaults, so older or partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_GROUP, Config, DebugConfig, FilterConfig};
pub use error::ConfigError;
