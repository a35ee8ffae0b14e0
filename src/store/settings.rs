//! Application settings and their persistence contract.

use crate::core::currency::Currency;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed key the settings object lives under in the settings partition.
pub const SETTINGS_KEY: &str = "settings_v1";

/// User-configurable state: the currency reports default to and the URL the
/// rate snapshot is fetched from. An empty URL means "use the built-in
/// default endpoint".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub base_currency: Currency,
    pub rate_source_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_currency: Currency::Usd,
            rate_source_url: String::new(),
        }
    }
}

/// Loads never fail and saves are wholesale; there is no partial merge.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Settings;
    async fn save(&self, settings: &Settings) -> Result<()>;
    async fn reset(&self) -> Result<Settings>;
}

/// Decodes persisted settings bytes. Anything unreadable is discarded
/// wholesale in favor of the defaults; missing fields fall back per field.
pub fn decode_settings(bytes: Option<&[u8]>) -> Settings {
    let Some(bytes) = bytes else {
        return Settings::default();
    };

    match serde_json::from_slice(bytes) {
        Ok(settings) => settings,
        Err(e) => {
            debug!("Discarding unreadable stored settings: {}", e);
            Settings::default()
        }
    }
}
