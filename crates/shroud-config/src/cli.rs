//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Shroud command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "shroud", about = "Entity visibility filter")]
pub struct CliArgs {
    /// Comma-separated template IDs to hide while alive.
    #[arg(long)]
    pub hide_alive_ids: Option<String>,

    /// Comma-separated name patterns to hide while alive.
    #[arg(long)]
    pub hide_alive_names: Option<String>,

    /// Hide every dead entity that is not blacklisted.
    #[arg(long)]
    pub hide_all_dead: Option<bool>,

    /// Remove interaction options targeting dead entities.
    #[arg(long)]
    pub suppress_dead_actions: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Number of simulation ticks to run before exiting.
    #[arg(long, default_value_t = 240)]
    pub ticks: u64,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref ids) = args.hide_alive_ids {
            self.filter.hide_alive_ids = ids.clone();
        }
        if let Some(ref names) = args.hide_alive_names {
            self.filter.hide_alive_names = names.clone();
        }
        if let Some(dead) = args.hide_all_dead {
            self.filter.hide_all_dead = dead;
        }
        if let Some(suppress) = args.suppress_dead_actions {
            self.filter.suppress_dead_actions = suppress;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
