//! Configs root: where store files are resolved from.

use crate::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Application root and the configs directory beneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoot {
    root: PathBuf,
    configs_dir: PathBuf,
}

impl ConfigRoot {
    /// Use `configs_dir` directly; it doubles as the root.
    pub fn new(configs_dir: impl Into<PathBuf>) -> Self {
        let configs_dir = configs_dir.into();
        Self {
            root: configs_dir.clone(),
            configs_dir,
        }
    }

    /// Application root with configs kept in `<root>/config`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let configs_dir = root.join("config");
        Self { root, configs_dir }
    }

    /// Platform config directory for `app` (e.g. `~/.config/<app>` on Linux).
    pub fn platform(app: &str) -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("", "", app).ok_or(ConfigError::NoPlatformDirs)?;
        Ok(Self::new(dirs.config_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn configs_dir(&self) -> &Path {
        &self.configs_dir
    }

    /// Resolve a store's relative file path.
    pub fn resolve(&self, file_path: &str) -> PathBuf {
        self.configs_dir.join(file_path)
    }
}
