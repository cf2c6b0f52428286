//! Settings for the `confcell` binary
//!
//! Layered with the `config` crate, lowest to highest priority:
//! 1. Built-in defaults
//! 2. Global settings file (`<platform config dir>/confcell/settings.toml`)
//! 3. File passed with `--settings`
//! 4. `CONFCELL_*` environment variables (`__` separates nested keys, e.g.
//!    `CONFCELL_LOGGING__LEVEL=debug`)
//!
//! Command-line flags are applied over the result by the CLI.

use crate::error::SetupError;
use crate::logging::LoggingConfig;
use crate::store::UnsavedPolicy;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_PREFIX: &str = "CONFCELL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliSettings {
    /// Directory store files are resolved against
    #[serde(default)]
    pub configs_dir: Option<PathBuf>,

    /// Default schema file
    #[serde(default)]
    pub schema: Option<PathBuf>,

    #[serde(default)]
    pub unsaved_policy: UnsavedPolicy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Path to the global settings file, if the platform has a config dir.
pub fn global_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "confcell").map(|dirs| dirs.config_dir().join("settings.toml"))
}

impl CliSettings {
    /// Load settings from every layer, reading the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SetupError> {
        Self::load_from(global_settings_path().as_deref(), explicit, None)
    }

    /// Load settings from the given layers.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, SetupError> {
        let mut builder = builder_with_defaults()?;

        if let Some(global) = global.filter(|p| p.exists()) {
            debug!(path = %global.display(), "Using global settings file");
            builder = builder.add_source(File::from(global).format(FileFormat::Toml));
        }

        if let Some(explicit) = explicit {
            if !explicit.is_file() {
                return Err(SetupError::Settings(format!(
                    "Settings file not found: {}",
                    explicit.display()
                )));
            }
            builder = builder.add_source(File::from(explicit).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let settings: CliSettings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("unsaved_policy", "snapshot_current")?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")
}
