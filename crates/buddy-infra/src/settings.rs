//! Settings store for linux-buddy.
//!
//! Reads and writes `config.toml` under `<config_dir>/linux-buddy/`
//! (`~/.config/linux-buddy/` on Linux). Loading falls back to
//! [`Settings::default()`] when the file is missing or malformed.

use std::io;
use std::path::{Path, PathBuf};

use buddy_types::config::{normalize_endpoint, normalize_model_name, Settings};

/// Directory under the platform config dir.
pub const SETTINGS_DIR_NAME: &str = "linux-buddy";

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Errors from persisting settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no configuration directory is available on this platform")]
    NoConfigDir,

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// File-backed settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn default_location() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings.
    ///
    /// - If the file does not exist, returns [`Settings::default()`].
    /// - If the file exists but cannot be read or parsed, logs a warning and
    ///   returns the default.
    pub async fn load(&self) -> Settings {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(err) => {
                tracing::warn!("Failed to read {}: {err}, using defaults", self.path.display());
                return Settings::default();
            }
        };

        match toml::from_str::<Settings>(&content) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    self.path.display()
                );
                Settings::default()
            }
        }
    }

    /// Write settings, creating the parent directory when needed.
    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(settings)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SettingsError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| SettingsError::Io {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Persist a new default model, keeping the other settings.
    pub async fn save_model(&self, raw: &str) -> Result<Settings, SettingsError> {
        let model = normalize_model_name(raw);
        if model.is_empty() {
            return Err(SettingsError::Empty("model name"));
        }

        let mut settings = self.load().await;
        settings.model = model;
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Persist a new backend endpoint, keeping the other settings.
    pub async fn save_endpoint(&self, raw: &str) -> Result<Settings, SettingsError> {
        let endpoint = normalize_endpoint(raw);
        if endpoint.is_empty() {
            return Err(SettingsError::Empty("endpoint"));
        }

        let mut settings = self.load().await;
        settings.endpoint = endpoint;
        self.save(&settings).await?;
        Ok(settings)
    }
}
