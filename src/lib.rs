pub mod add;
pub mod charts;
pub mod config;
pub mod core;
pub mod log;
pub mod providers;
pub mod report;
pub mod session;
pub mod settings;
pub mod store;
pub mod ui;

use crate::core::currency::Currency;
use crate::providers::HttpRateSource;
use crate::session::ReportSession;
use crate::store::disk::DiskStore;
use crate::store::SettingsStore;
use anyhow::Result;
use chrono::Datelike;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Add {
        amount: f64,
        currency: String,
        category: String,
        description: String,
    },
    Report {
        year: Option<i32>,
        month: Option<u32>,
        currency: Option<String>,
    },
    Charts {
        year: Option<i32>,
        month: Option<u32>,
        currency: Option<String>,
    },
    Settings(SettingsCommand),
}

pub enum SettingsCommand {
    Show,
    Set {
        base_currency: Option<String>,
        rates_url: Option<String>,
    },
    Reset,
}

pub async fn run_command(command: AppCommand, data_path: Option<&str>) -> Result<()> {
    info!("Expense tracker starting...");

    let data_dir = config::resolve_data_path(data_path)?;
    let disk = DiskStore::open(&data_dir)?;

    match command {
        AppCommand::Add {
            amount,
            currency,
            category,
            description,
        } => {
            let costs = disk.costs()?;
            add::add_cost(&costs, amount, &currency, category, description).await
        }
        AppCommand::Report {
            year,
            month,
            currency,
        } => {
            let (year, month) = resolve_period(year, month);
            let (session, display) = open_session(&disk, currency.as_deref()).await?;
            report::generate_and_display_report(&session, year, month, display).await
        }
        AppCommand::Charts {
            year,
            month,
            currency,
        } => {
            let (year, month) = resolve_period(year, month);
            let (session, display) = open_session(&disk, currency.as_deref()).await?;
            charts::generate_and_display_charts(&session, year, month, display).await
        }
        AppCommand::Settings(action) => {
            let settings_store = disk.settings()?;
            match action {
                SettingsCommand::Show => settings::show(&settings_store).await,
                SettingsCommand::Set {
                    base_currency,
                    rates_url,
                } => {
                    settings::update(
                        &settings_store,
                        base_currency.as_deref(),
                        rates_url.as_deref(),
                    )
                    .await
                }
                SettingsCommand::Reset => settings::reset(&settings_store).await,
            }
        }
    }
}

fn resolve_period(year: Option<i32>, month: Option<u32>) -> (i32, u32) {
    let today = chrono::Local::now().date_naive();
    (
        year.unwrap_or_else(|| today.year()),
        month.unwrap_or_else(|| today.month()),
    )
}

/// Builds the report session from persisted settings: the rate source URL
/// comes from the settings, and the display currency falls back to the
/// configured base currency when the user did not pick one.
async fn open_session(disk: &DiskStore, currency: Option<&str>) -> Result<(ReportSession, Currency)> {
    let settings = disk.settings()?.load().await;
    debug!("Loaded settings: {settings:?}");

    let display = match currency {
        Some(code) => Currency::from_str(code)?,
        None => settings.base_currency,
    };

    let rates = HttpRateSource::new(&settings.rate_source_url);
    let session = ReportSession::new(Arc::new(disk.costs()?), Arc::new(rates));
    Ok((session, display))
}
