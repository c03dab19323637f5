//! Application state shared by the CLI verbs.
//!
//! Resolves the effective settings once per invocation: command-line flags
//! and `BUDDY_*` environment variables win over the saved file, which wins
//! over the built-in defaults.

use secrecy::SecretString;

use buddy_infra::settings::SettingsStore;
use buddy_types::config::{normalize_endpoint, normalize_model_name, Settings};

/// Per-invocation overrides taken from global flags.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

pub struct AppState {
    pub store: SettingsStore,
    /// Saved settings with overrides applied.
    pub settings: Settings,
    pub api_key: Option<SecretString>,
}

impl AppState {
    /// Load the saved settings and apply overrides.
    pub async fn init(overrides: Overrides) -> anyhow::Result<Self> {
        let store = SettingsStore::default_location()?;
        Ok(Self::with_store(store, overrides).await)
    }

    pub async fn with_store(store: SettingsStore, overrides: Overrides) -> Self {
        let mut settings = store.load().await;

        if let Some(model) = overrides.model.as_deref().map(normalize_model_name) {
            if !model.is_empty() {
                settings.model = model;
            }
        }
        if let Some(endpoint) = overrides.endpoint.as_deref().map(normalize_endpoint) {
            if !endpoint.is_empty() {
                settings.endpoint = endpoint;
            }
        }

        tracing::debug!(model = %settings.model, endpoint = %settings.endpoint, "effective settings");

        Self {
            store,
            settings,
            api_key: overrides
                .api_key
                .filter(|key| !key.is_empty())
                .map(SecretString::from),
        }
    }
}
