//! Currencies, exchange-rate tables and conversion.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of currencies the application supports. Everything that
/// enters the system (user input, stored records, fetched rate tables) is
/// parsed into this type at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "ILS")]
    Ils,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "EURO")]
    Euro,
}

pub const CURRENCIES: [Currency; 4] = [
    Currency::Usd,
    Currency::Ils,
    Currency::Gbp,
    Currency::Euro,
];

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ils => "ILS",
            Currency::Gbp => "GBP",
            Currency::Euro => "EURO",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Ils => "₪",
            Currency::Gbp => "£",
            Currency::Euro => "€",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Ils => "Israeli Shekel",
            Currency::Gbp => "British Pound",
            Currency::Euro => "Euro",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "ILS" => Ok(Currency::Ils),
            "GBP" => Ok(Currency::Gbp),
            "EURO" => Ok(Currency::Euro),
            other => Err(CurrencyError::Unsupported(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("unsupported currency: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RateError {
    #[error("missing or invalid rate for {0}")]
    InvalidRate(Currency),
}

/// A snapshot of exchange rates, each expressed as units of that currency
/// per 1 USD. Deserialization fails if any of the four keys is absent, so a
/// fetched body that parses still has to pass [`RateTable::validate`] before
/// it is used for conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    #[serde(rename = "USD")]
    pub usd: f64,
    #[serde(rename = "ILS")]
    pub ils: f64,
    #[serde(rename = "GBP")]
    pub gbp: f64,
    #[serde(rename = "EURO")]
    pub euro: f64,
}

impl RateTable {
    /// Rates used whenever the configured source is unreachable or invalid.
    pub const FALLBACK: RateTable = RateTable {
        usd: 1.0,
        ils: 3.4,
        gbp: 0.6,
        euro: 0.7,
    };

    pub fn rate(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.usd,
            Currency::Ils => self.ils,
            Currency::Gbp => self.gbp,
            Currency::Euro => self.euro,
        }
    }

    /// Every supported currency must carry a finite positive rate.
    pub fn validate(&self) -> Result<(), RateError> {
        for currency in CURRENCIES {
            let value = self.rate(currency);
            if !value.is_finite() || value <= 0.0 {
                return Err(RateError::InvalidRate(currency));
            }
        }
        Ok(())
    }
}

/// Source of the current rate snapshot. Implementations must not fail: any
/// upstream problem degrades to [`RateTable::FALLBACK`].
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> RateTable;
}

/// Converts `amount` between two currencies by pivoting through USD.
///
/// Same-currency conversion returns the amount untouched without looking at
/// the table at all. No rounding happens here; callers round once after
/// summation.
pub fn convert(
    amount: f64,
    from: Currency,
    to: Currency,
    rates: &RateTable,
) -> Result<f64, RateError> {
    if from == to {
        return Ok(amount);
    }

    rates.validate()?;

    let amount_in_usd = amount / rates.rate(from);
    Ok(amount_in_usd * rates.rate(to))
}

/// Rounds to 2 decimal places, half away from zero. The epsilon nudge keeps
/// values sitting just under a half-cent boundary due to binary
/// representation error from rounding down.
pub fn round2(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rates() -> RateTable {
        RateTable {
            usd: 1.0,
            ils: 3.4,
            gbp: 0.6,
            euro: 0.7,
        }
    }

    #[test]
    fn test_convert_through_usd_pivot() {
        let rates = sample_rates();
        assert_eq!(
            convert(34.0, Currency::Ils, Currency::Usd, &rates).unwrap(),
            10.0
        );
        assert_eq!(
            convert(10.0, Currency::Usd, Currency::Gbp, &rates).unwrap(),
            6.0
        );
    }

    #[test]
    fn test_convert_same_currency_is_identity() {
        let rates = sample_rates();
        assert_eq!(
            convert(12.345, Currency::Gbp, Currency::Gbp, &rates).unwrap(),
            12.345
        );
    }

    #[test]
    fn test_identity_skips_rate_validation() {
        let broken = RateTable {
            usd: 1.0,
            ils: -3.4,
            gbp: f64::NAN,
            euro: 0.0,
        };
        assert_eq!(
            convert(50.0, Currency::Usd, Currency::Usd, &broken).unwrap(),
            50.0
        );
    }

    #[test]
    fn test_convert_round_trips_within_tolerance() {
        let rates = sample_rates();
        for from in CURRENCIES {
            for to in CURRENCIES {
                let there = convert(123.45, from, to, &rates).unwrap();
                let back = convert(there, to, from, &rates).unwrap();
                assert!(
                    (back - 123.45).abs() < 1e-9,
                    "round trip {from} -> {to} drifted: {back}"
                );
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut rates = sample_rates();
        rates.gbp = 0.0;
        assert_eq!(rates.validate(), Err(RateError::InvalidRate(Currency::Gbp)));

        let mut rates = sample_rates();
        rates.ils = -1.0;
        assert_eq!(rates.validate(), Err(RateError::InvalidRate(Currency::Ils)));

        let mut rates = sample_rates();
        rates.euro = f64::INFINITY;
        assert_eq!(rates.validate(), Err(RateError::InvalidRate(Currency::Euro)));

        let mut rates = sample_rates();
        rates.usd = f64::NAN;
        assert_eq!(rates.validate(), Err(RateError::InvalidRate(Currency::Usd)));
    }

    #[test]
    fn test_convert_propagates_invalid_table() {
        let mut rates = sample_rates();
        rates.euro = 0.0;
        let err = convert(5.0, Currency::Usd, Currency::Euro, &rates).unwrap_err();
        assert_eq!(err, RateError::InvalidRate(Currency::Euro));
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" EURO ".parse::<Currency>().unwrap(), Currency::Euro);

        let err = "EUR".parse::<Currency>().unwrap_err();
        assert_eq!(err, CurrencyError::Unsupported("EUR".to_string()));
        assert_eq!(err.to_string(), "unsupported currency: EUR");
    }

    #[test]
    fn test_rate_table_requires_all_keys() {
        let missing_euro = r#"{"USD": 1, "ILS": 3.4, "GBP": 0.6}"#;
        assert!(serde_json::from_str::<RateTable>(missing_euro).is_err());

        let extra_keys = r#"{"USD": 1, "ILS": 3.4, "GBP": 0.6, "EURO": 0.7, "JPY": 150}"#;
        let table: RateTable = serde_json::from_str(extra_keys).unwrap();
        assert_eq!(table, RateTable::FALLBACK);
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }
}
