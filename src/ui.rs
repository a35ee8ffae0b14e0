use crate::core::currency::Currency;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an amount with its currency symbol, e.g. `$12.50`.
pub fn format_money(amount: f64, currency: Currency) -> String {
    format!("{}{:.2}", currency.symbol(), amount)
}

/// Right-aligned money cell.
pub fn money_cell(amount: f64, currency: Currency) -> Cell {
    Cell::new(format_money(amount, currency)).set_alignment(CellAlignment::Right)
}

// Stable 256-color palette for category markers and bar segments. A
// category's color is its index in the sorted category list, so it matches
// between the breakdown and the year bars.
const CATEGORY_COLORS: [u8; 10] = [68, 172, 167, 115, 71, 179, 139, 211, 94, 145];

fn category_color(index: usize) -> u8 {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}

/// Colored bullet for a category legend row.
pub fn category_marker(index: usize) -> String {
    style("●").color256(category_color(index)).to_string()
}

/// Colored block segment of `width` cells for a stacked bar.
pub fn bar_segment(index: usize, width: usize) -> String {
    style("█".repeat(width))
        .color256(category_color(index))
        .to_string()
}

/// Spinner shown while the rate fetch and the record read are in flight.
pub fn new_fetch_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
