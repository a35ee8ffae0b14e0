//! Exchange-rate snapshots fetched over HTTP.
//!
//! The fetch contract is deliberately forgiving: one GET, no retries, and
//! every failure mode (network, HTTP status, body shape, rate validation)
//! degrades to the hardcoded fallback table with a warning.

use crate::core::currency::{RateSource, RateTable};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Rate endpoint used when the settings leave the URL empty.
pub const DEFAULT_RATES_URL: &str = "https://gist.githubusercontent.com/Dannyf275/5da6e345103f6fcfb16cd4658cb72be4/raw/37622f9867ec3ea29ad2ba05944b1c76573f7a95/rates.json";

pub struct HttpRateSource {
    url: String,
}

impl HttpRateSource {
    /// An empty or blank `url` selects the built-in default endpoint.
    pub fn new(url: &str) -> Self {
        let trimmed = url.trim();
        let url = if trimmed.is_empty() {
            DEFAULT_RATES_URL
        } else {
            trimmed
        };
        HttpRateSource {
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn try_fetch(&self) -> Result<RateTable> {
        debug!("Requesting exchange rates from {}", self.url);

        let client = reqwest::Client::builder().user_agent("outgo/1.0").build()?;
        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, self.url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} from rate source: {}",
                response.status(),
                self.url
            ));
        }

        let text = response.text().await?;
        let table: RateTable = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rate response from {}: {}", self.url, e))?;

        table.validate()?;
        Ok(table)
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rates(&self) -> RateTable {
        match self.try_fetch().await {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Using fallback exchange rates");
                RateTable::FALLBACK
            }
        }
    }
}
