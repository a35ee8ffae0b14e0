//! The settings screen: show, change and reset persisted settings.

use crate::core::currency::Currency;
use crate::providers::DEFAULT_RATES_URL;
use crate::store::{Settings, SettingsStore};
use crate::ui;
use anyhow::Result;
use comfy_table::Cell;
use std::str::FromStr;

pub async fn show(store: &dyn SettingsStore) -> Result<()> {
    let settings = store.load().await;
    println!("{}", render_settings(&settings));
    Ok(())
}

/// Applies the provided fields on top of the loaded settings and writes the
/// whole object back; there is no partial persistence.
pub async fn update(
    store: &dyn SettingsStore,
    base_currency: Option<&str>,
    rates_url: Option<&str>,
) -> Result<()> {
    let mut settings = store.load().await;

    if let Some(code) = base_currency {
        settings.base_currency = Currency::from_str(code)?;
    }
    if let Some(url) = rates_url {
        settings.rate_source_url = url.trim().to_string();
    }

    store.save(&settings).await?;
    println!("Settings saved.\n\n{}", render_settings(&settings));
    Ok(())
}

pub async fn reset(store: &dyn SettingsStore) -> Result<()> {
    let defaults = store.reset().await?;
    println!("Settings reset to defaults.\n\n{}", render_settings(&defaults));
    Ok(())
}

fn render_settings(settings: &Settings) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Setting"), ui::header_cell("Value")]);

    let currency = settings.base_currency;
    table.add_row(vec![
        Cell::new("Base currency"),
        Cell::new(format!(
            "{} ({}, {})",
            currency.code(),
            currency.label(),
            currency.symbol()
        )),
    ]);

    let url = if settings.rate_source_url.is_empty() {
        format!("(built-in) {DEFAULT_RATES_URL}")
    } else {
        settings.rate_source_url.clone()
    };
    table.add_row(vec![Cell::new("Rate source URL"), Cell::new(url)]);

    table.to_string()
}
