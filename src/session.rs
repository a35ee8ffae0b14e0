//! Report orchestration: joins the rate fetch with the record read and runs
//! the aggregation, guarding against superseded refreshes.

use crate::core::currency::{Currency, RateSource};
use crate::core::refresh::RefreshTracker;
use crate::core::report::{self, MonthlyReport, YearMatrix};
use crate::store::CostStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Data backing the charts screen: the selected month's breakdown plus the
/// full-year matrix, both computed from one rate snapshot and one record
/// read.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartsData {
    pub month: MonthlyReport,
    pub year: YearMatrix,
}

pub struct ReportSession {
    store: Arc<dyn CostStore>,
    rates: Arc<dyn RateSource>,
    tracker: RefreshTracker,
}

impl ReportSession {
    pub fn new(store: Arc<dyn CostStore>, rates: Arc<dyn RateSource>) -> Self {
        ReportSession {
            store,
            rates,
            tracker: RefreshTracker::new(),
        }
    }

    /// Monthly per-category report in the given display currency.
    ///
    /// Returns `None` when a newer request started while this one was in
    /// flight; the superseded result must not overwrite the fresher one.
    pub async fn month_report(
        &self,
        year: i32,
        month: u32,
        display: Currency,
    ) -> Result<Option<MonthlyReport>> {
        let token = self.tracker.begin();

        // Rates and records do not depend on each other; load both at once.
        let (rates, records) = tokio::join!(self.rates.fetch_rates(), self.store.list_all());
        let records = records?;

        if !self.tracker.is_current(token) {
            debug!("Discarding superseded month report for {year}-{month:02}");
            return Ok(None);
        }

        let monthly = report::aggregate_month(&records, year, month, display, &rates)?;
        Ok(Some(monthly))
    }

    /// Month breakdown plus year matrix for the charts screen.
    pub async fn charts_data(
        &self,
        year: i32,
        month: u32,
        display: Currency,
    ) -> Result<Option<ChartsData>> {
        let token = self.tracker.begin();

        let (rates, records) = tokio::join!(self.rates.fetch_rates(), self.store.list_all());
        let records = records?;

        if !self.tracker.is_current(token) {
            debug!("Discarding superseded charts refresh for {year}");
            return Ok(None);
        }

        Ok(Some(ChartsData {
            month: report::aggregate_month(&records, year, month, display, &rates)?,
            year: report::aggregate_year(&records, year, display, &rates)?,
        }))
    }
}
