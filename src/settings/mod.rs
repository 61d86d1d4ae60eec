//! Display settings persisted next to the ledger: the visual theme and the
//! active currency. Both load fail-open to defaults and save write-through,
//! one key at a time.

use std::sync::Arc;

use tracing::{error, warn};

use crate::{
    format::CurrencyConfig,
    gateway::{PersistenceGateway, CURRENCY_KEY, THEME_KEY},
};

/// Presentation theme. Persisted alongside the ledger but logically
/// independent of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeSetting {
    #[default]
    Light,
    Dark,
}

impl ThemeSetting {
    pub fn toggled(self) -> Self {
        match self {
            ThemeSetting::Light => ThemeSetting::Dark,
            ThemeSetting::Dark => ThemeSetting::Light,
        }
    }

    /// Persisted wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeSetting::Light => "light",
            ThemeSetting::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(ThemeSetting::Light),
            "dark" => Some(ThemeSetting::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub theme: ThemeSetting,
    pub currency: CurrencyConfig,
}

impl Settings {
    /// Loads persisted settings. Absent or unreadable values fall back to
    /// defaults; loading never fails.
    pub async fn load(gateway: &Arc<dyn PersistenceGateway>) -> Self {
        let mut settings = Settings::default();
        match gateway.get(&[THEME_KEY, CURRENCY_KEY]).await {
            Ok(values) => {
                if let Some(raw) = values.get(THEME_KEY) {
                    match ThemeSetting::parse(raw) {
                        Some(theme) => settings.theme = theme,
                        None => warn!("unknown theme `{}`, keeping default", raw),
                    }
                }
                if let Some(raw) = values.get(CURRENCY_KEY) {
                    match serde_json::from_str::<CurrencyConfig>(raw) {
                        Ok(currency) => settings.currency = currency,
                        Err(err) => {
                            warn!("stored currency is unreadable, keeping default: {}", err)
                        }
                    }
                }
            }
            Err(err) => warn!("settings fetch failed, using defaults: {}", err),
        }
        settings
    }

    pub async fn save_theme(&self, gateway: &Arc<dyn PersistenceGateway>) {
        if let Err(err) = gateway.set(THEME_KEY, self.theme.as_str()).await {
            error!("theme write failed: {}", err);
        }
    }

    pub async fn save_currency(&self, gateway: &Arc<dyn PersistenceGateway>) {
        let json = match serde_json::to_string(&self.currency) {
            Ok(json) => json,
            Err(err) => {
                error!("currency serialization failed, skipping write: {}", err);
                return;
            }
        };
        if let Err(err) = gateway.set(CURRENCY_KEY, &json).await {
            error!("currency write failed: {}", err);
        }
    }
}
