//! Projection of the display list and selection into table rows.

use std::fmt::Write as _;

use crate::product::Product;
use crate::quantity::Quantity;
use crate::selection::SelectionMap;

/// Shown in the price cell when a product has no published price.
pub const PRICE_PLACEHOLDER: &str = "Price on request";

/// Shown instead of a table body when nothing matches.
pub const NO_RESULTS_MESSAGE: &str = "No products found.";

/// Mark shown in the indent column.
pub const INDENT_MARK: &str = "\u{2713}";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub product_name: String,
    pub unit_of_measure: String,
    pub price_text: String,
    pub indent_mark: &'static str,
    pub checked: bool,
    /// Selected quantity, or zero for unselected rows.
    pub quantity: Quantity,
    pub allows_decimal: bool,
    pub step: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedTable {
    Rows(Vec<RowView>),
    NoResults,
}

impl RenderedTable {
    #[must_use]
    pub fn rows(&self) -> &[RowView] {
        match self {
            Self::Rows(rows) => rows,
            Self::NoResults => &[],
        }
    }
}

/// Renders `display` against the current selection.
#[must_use]
pub fn render(display: &[&Product], selection: &SelectionMap) -> RenderedTable {
    if display.is_empty() {
        return RenderedTable::NoResults;
    }
    let rows = display
        .iter()
        .map(|product| row_view(product, selection))
        .collect();
    RenderedTable::Rows(rows)
}

fn row_view(product: &Product, selection: &SelectionMap) -> RowView {
    let rule = product.quantity_rule();
    let selected = selection.get(&product.product_name);
    RowView {
        product_name: product.product_name.clone(),
        unit_of_measure: product.unit_of_measure.clone(),
        price_text: price_cell(&product.sales_price),
        indent_mark: if product.indent { INDENT_MARK } else { "" },
        checked: selected.is_some(),
        quantity: selected.map_or(Quantity::ZERO, |e| e.quantity),
        allows_decimal: rule.allows_decimal(),
        step: rule.step(),
    }
}

fn price_cell(sales_price: &str) -> String {
    if sales_price.trim().is_empty() {
        PRICE_PLACEHOLDER.to_string()
    } else {
        sales_price.to_string()
    }
}

/// Formats the interactive table as aligned plain text, with a selection
/// column in front of the product columns.
#[must_use]
pub fn format_table(table: &RenderedTable) -> String {
    let rows = match table {
        RenderedTable::NoResults => return format!("{NO_RESULTS_MESSAGE}\n"),
        RenderedTable::Rows(rows) => rows,
    };
    let header = ["", "Product", "Unit", "Price", "Indent", "Qty"];
    let body: Vec<[String; 6]> = rows
        .iter()
        .map(|r| {
            [
                if r.checked { "[x]" } else { "[ ]" }.to_string(),
                r.product_name.clone(),
                r.unit_of_measure.clone(),
                r.price_text.clone(),
                r.indent_mark.to_string(),
                r.quantity.to_string(),
            ]
        })
        .collect();
    align(&header, &body)
}

/// Formats read-only catalog rows (no selection state), as used for print.
#[must_use]
pub fn format_catalog(products: &[Product]) -> String {
    if products.is_empty() {
        return format!("{NO_RESULTS_MESSAGE}\n");
    }
    let header = ["Product", "Unit", "Price", "Indent"];
    let body: Vec<[String; 4]> = products
        .iter()
        .map(|p| {
            [
                p.product_name.clone(),
                p.unit_of_measure.clone(),
                price_cell(&p.sales_price),
                if p.indent { INDENT_MARK } else { "" }.to_string(),
            ]
        })
        .collect();
    align(&header, &body)
}

fn align<const N: usize>(header: &[&str; N], body: &[[String; N]]) -> String {
    let mut widths: [usize; N] = std::array::from_fn(|i| header[i].chars().count());
    for row in body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = header.iter().map(|h| (*h).to_string()).collect();
    push_line(&mut out, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}
