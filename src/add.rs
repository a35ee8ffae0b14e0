//! The add-cost screen: validate, store, echo the stored record.

use crate::core::cost::CostDraft;
use crate::core::currency::Currency;
use crate::store::CostStore;
use crate::ui;
use anyhow::Result;
use std::str::FromStr;

pub async fn add_cost(
    store: &dyn CostStore,
    amount: f64,
    currency: &str,
    category: String,
    description: String,
) -> Result<()> {
    let currency = Currency::from_str(currency)?;

    let record = store
        .insert(CostDraft {
            amount,
            currency,
            category,
            description,
        })
        .await?;

    println!(
        "Recorded cost #{} on {}-{:02}-{:02}: {} for {}",
        record.id,
        record.recorded_date.year,
        record.recorded_date.month,
        record.recorded_date.day,
        ui::style_text(
            &ui::format_money(record.amount, record.currency),
            ui::StyleType::TotalValue
        ),
        record.category,
    );
    if !record.description.is_empty() {
        println!("  {}", ui::style_text(&record.description, ui::StyleType::Subtle));
    }

    Ok(())
}
