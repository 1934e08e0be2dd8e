//! OS directory resolution.

use std::path::{Path, PathBuf};

use crate::error::AppError;

const APP_NAME: &str = "terra";

/// Where the sandbox keeps its files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// `config.ron`.
    pub config_dir: PathBuf,
    /// Saved terrain and camera.
    pub data_dir: PathBuf,
    /// JSON log file.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them.
    ///
    /// Follows OS conventions (XDG on Linux, Known Folders on Windows,
    /// Library on macOS). The data dir falls back under the config dir when
    /// the OS has none.
    pub fn resolve() -> Result<Self, AppError> {
        let config_dir = terra_config::default_config_dir().ok_or(AppError::NoConfigDir)?;
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| config_dir.join("data"));
        Ok(Self {
            log_dir: config_dir.join("logs"),
            data_dir,
            config_dir,
        })
    }

    /// Lay the directories out under `root`, for tests and portable installs.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            data_dir: app_dir.join("data"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Replace the config dir, keeping logs beside it.
    pub fn with_config_dir(mut self, config_dir: PathBuf) -> Self {
        self.log_dir = config_dir.join("logs");
        self.config_dir = config_dir;
        self
    }

    /// Create every directory on disk.
    pub fn create_dirs(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
