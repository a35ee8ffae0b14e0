//! The charts screen: per-category share for a month plus a stacked
//! 12-month bar view for the year, rendered as terminal output.

use crate::core::currency::{Currency, round2};
use crate::core::report::{MonthlyReport, YearMatrix};
use crate::session::ReportSession;
use crate::ui;
use anyhow::Result;

const BAR_WIDTH: usize = 40;

pub async fn generate_and_display_charts(
    session: &ReportSession,
    year: i32,
    month: u32,
    display: Currency,
) -> Result<()> {
    let spinner = ui::new_fetch_spinner("Loading costs and exchange rates...");
    let data = session.charts_data(year, month, display).await;
    spinner.finish_and_clear();

    if let Some(data) = data? {
        println!("{}", render_month_breakdown(&data.month, &data.year.categories));
        println!();
        println!("{}", render_year_bars(&data.year));
    }
    Ok(())
}

/// Category shares for the selected month. Percentages are taken over the
/// displayed (rounded) row totals, so they agree with what is printed.
pub fn render_month_breakdown(report: &MonthlyReport, categories: &[String]) -> String {
    let title = format!("Category breakdown for {:02}/{}", report.month, report.year);
    let mut output = format!("{}\n\n", ui::style_text(&title, ui::StyleType::Title));

    if report.rows.is_empty() {
        output.push_str(&ui::style_text(
            "No costs recorded for this month.",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let displayed_sum: f64 = report.rows.iter().map(|row| row.total).sum();

    for row in &report.rows {
        let share = if displayed_sum == 0.0 {
            0.0
        } else {
            round2(row.total / displayed_sum * 100.0)
        };
        let index = category_index(categories, &row.category);
        output.push_str(&format!(
            "{} {:<20} {:>12} {:>8}\n",
            ui::category_marker(index),
            row.category,
            ui::format_money(row.total, report.currency),
            format!("{share:.2}%"),
        ));
    }

    output.push_str(&format!(
        "\nMonth total: {}",
        ui::style_text(
            &ui::format_money(report.total, report.currency),
            ui::StyleType::TotalValue
        ),
    ));

    output
}

/// One bar per month, all 12 always present, stacked per category in the
/// matrix's stable category order.
pub fn render_year_bars(matrix: &YearMatrix) -> String {
    let title = format!("Monthly totals for {} ({})", matrix.year, matrix.currency);
    let mut output = format!("{}\n\n", ui::style_text(&title, ui::StyleType::Title));

    let max_total = matrix.months.iter().map(|m| m.total).fold(0.0, f64::max);

    for bucket in &matrix.months {
        let mut bar = String::new();

        if bucket.total > 0.0 && max_total > 0.0 {
            let bucket_width =
                ((bucket.total / max_total) * BAR_WIDTH as f64).round().max(1.0) as usize;

            for (index, category) in matrix.categories.iter().enumerate() {
                let value = bucket
                    .totals_by_category
                    .get(category)
                    .copied()
                    .unwrap_or(0.0);
                if value <= 0.0 {
                    continue;
                }

                let width = ((value / bucket.total) * bucket_width as f64).round() as usize;
                if width > 0 {
                    bar.push_str(&ui::bar_segment(index, width));
                }
            }
        }

        output.push_str(&format!(
            "{} {:<width$} {}\n",
            month_label(bucket.month),
            bar,
            ui::format_money(bucket.total, matrix.currency),
            width = BAR_WIDTH,
        ));
    }

    if matrix.categories.is_empty() {
        output.push_str(&ui::style_text(
            "\nNo costs recorded for this year.",
            ui::StyleType::Subtle,
        ));
    } else {
        output.push('\n');
        for (index, category) in matrix.categories.iter().enumerate() {
            output.push_str(&format!("{} {}  ", ui::category_marker(index), category));
        }
    }

    output
}

fn category_index(categories: &[String], category: &str) -> usize {
    categories
        .iter()
        .position(|c| c == category)
        .unwrap_or(categories.len())
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}
