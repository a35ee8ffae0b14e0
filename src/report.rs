//! The monthly report screen.

use crate::core::currency::Currency;
use crate::core::report::MonthlyReport;
use crate::session::ReportSession;
use crate::ui;
use anyhow::Result;
use comfy_table::Cell;

pub async fn generate_and_display_report(
    session: &ReportSession,
    year: i32,
    month: u32,
    display: Currency,
) -> Result<()> {
    let spinner = ui::new_fetch_spinner("Loading costs and exchange rates...");
    let report = session.month_report(year, month, display).await;
    spinner.finish_and_clear();

    // A superseded request has nothing to show; the fresher one already did.
    if let Some(report) = report? {
        println!("{}", render_report(&report));
    }
    Ok(())
}

pub fn render_report(report: &MonthlyReport) -> String {
    let title = format!("Costs for {:02}/{}", report.month, report.year);
    let mut output = format!("{}\n\n", ui::style_text(&title, ui::StyleType::Title));

    if report.rows.is_empty() {
        let empty = format!(
            "No costs recorded for {:02}/{}.",
            report.month, report.year
        );
        output.push_str(&ui::style_text(&empty, ui::StyleType::Subtle));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell(&format!("Total ({})", report.currency)),
    ]);

    for row in &report.rows {
        table.add_row(vec![
            Cell::new(&row.category),
            ui::money_cell(row.total, report.currency),
        ]);
    }

    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\nTotal ({}): {}",
        ui::style_text(report.currency.code(), ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_money(report.total, report.currency),
            ui::StyleType::TotalValue
        ),
    ));

    output
}
