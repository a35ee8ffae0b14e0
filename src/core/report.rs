//! Monthly and yearly aggregation of cost records.
//!
//! Both entry points are pure: they take the records, the period, the
//! display currency and a rate snapshot, and produce a fully converted and
//! rounded view. Rounding happens once per output figure, after summation.

use crate::core::cost::CostRecord;
use crate::core::currency::{Currency, RateError, RateTable, convert, round2};
use std::collections::{BTreeMap, BTreeSet};

/// Category applied to records whose own category is missing or blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Per-category totals for one month, in one display currency, ordered by
/// descending total (ties keep first-seen order).
///
/// `total` is the rounded sum of the already-rounded rows, so the displayed
/// grand total always matches the displayed rows even when it differs by a
/// cent from rounding the raw sum.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub currency: Currency,
    pub rows: Vec<CategoryTotal>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub month: u32,
    pub totals_by_category: BTreeMap<String, f64>,
    pub total: f64,
}

/// Category-by-month totals for a full year. Always 12 buckets, and every
/// bucket carries an entry for every category seen anywhere in the year, so
/// chart axes and legends line up across months.
#[derive(Debug, Clone, PartialEq)]
pub struct YearMatrix {
    pub year: i32,
    pub currency: Currency,
    pub categories: Vec<String>,
    pub months: Vec<MonthBucket>,
}

fn resolve_category(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED
    } else {
        trimmed
    }
}

pub fn aggregate_month(
    records: &[CostRecord],
    year: i32,
    month: u32,
    display: Currency,
    rates: &RateTable,
) -> Result<MonthlyReport, RateError> {
    let mut rows: Vec<CategoryTotal> = Vec::new();

    let matching = records
        .iter()
        .filter(|r| r.recorded_date.year == year && r.recorded_date.month == month);

    for record in matching {
        let converted = convert(record.amount, record.currency, display, rates)?;
        let category = resolve_category(&record.category);

        match rows.iter_mut().find(|row| row.category == category) {
            Some(row) => row.total += converted,
            None => rows.push(CategoryTotal {
                category: category.to_string(),
                total: converted,
            }),
        }
    }

    for row in &mut rows {
        row.total = round2(row.total);
    }
    // Stable sort: equal totals stay in encounter order.
    rows.sort_by(|a, b| b.total.total_cmp(&a.total));

    let total = round2(rows.iter().map(|row| row.total).sum());

    Ok(MonthlyReport {
        year,
        month,
        currency: display,
        rows,
        total,
    })
}

pub fn aggregate_year(
    records: &[CostRecord],
    year: i32,
    display: Currency,
    rates: &RateTable,
) -> Result<YearMatrix, RateError> {
    let in_year = |r: &&CostRecord| r.recorded_date.year == year;

    let categories: Vec<String> = records
        .iter()
        .filter(in_year)
        .map(|r| resolve_category(&r.category).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut months: Vec<MonthBucket> = (1..=12)
        .map(|month| MonthBucket {
            month,
            totals_by_category: categories.iter().map(|c| (c.clone(), 0.0)).collect(),
            total: 0.0,
        })
        .collect();

    for record in records.iter().filter(in_year) {
        // A record with a corrupt month has no bucket to land in.
        if !(1..=12).contains(&record.recorded_date.month) {
            continue;
        }

        let converted = convert(record.amount, record.currency, display, rates)?;
        let bucket = &mut months[record.recorded_date.month as usize - 1];

        let category = resolve_category(&record.category);
        *bucket
            .totals_by_category
            .entry(category.to_string())
            .or_insert(0.0) += converted;
        bucket.total += converted;
    }

    for bucket in &mut months {
        for value in bucket.totals_by_category.values_mut() {
            *value = round2(*value);
        }
        bucket.total = round2(bucket.total);
    }

    Ok(YearMatrix {
        year,
        currency: display,
        categories,
        months,
    })
}
