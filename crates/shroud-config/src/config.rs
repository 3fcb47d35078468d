//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Group name carried by config-changed notifications that concern the
/// filter. Notifications for any other group are ignored.
pub const CONFIG_GROUP: &str = "shroud";

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Entity filter rules.
    pub filter: FilterConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// User-editable filter rules.
///
/// List options are raw comma-separated text exactly as the user typed
/// them. They are compiled into matchers by the filter crate; malformed
/// tokens are dropped there, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Name patterns hidden while alive (`*` wildcards allowed).
    pub hide_alive_names: String,
    /// Template IDs hidden while alive.
    pub hide_alive_ids: String,
    /// Animation IDs that hide an entity while playing.
    pub hide_on_animation_ids: String,
    /// Name patterns hidden once their health ratio reaches zero.
    pub hide_on_death_names: String,
    /// Template IDs hidden once their health ratio reaches zero.
    pub hide_on_death_ids: String,
    /// Name patterns never hidden by `hide_all_dead`.
    pub blacklist_names: String,
    /// Template IDs never hidden by `hide_all_dead`.
    pub blacklist_ids: String,
    /// Visual effect type IDs that are never drawn.
    pub hide_effect_ids: String,
    /// Hide every dead entity that is not blacklisted.
    pub hide_all_dead: bool,
    /// Remove interaction options targeting dead entities.
    pub suppress_dead_actions: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory in debug builds.
    pub file_logging: bool,
}

// --- Default implementations ---

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            hide_alive_names: String::new(),
            hide_alive_ids: String::new(),
            hide_on_animation_ids: String::new(),
            hide_on_death_names: String::new(),
            hide_on_death_ids: String::new(),
            blacklist_names: String::new(),
            blacklist_ids: String::new(),
            hide_effect_ids: String::new(),
            hide_all_dead: false,
            suppress_dead_actions: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Returns the platform config directory for Shroud.
    pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join("shroud"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
