pub mod exchange;

pub use exchange::{DEFAULT_RATES_URL, HttpRateSource};
