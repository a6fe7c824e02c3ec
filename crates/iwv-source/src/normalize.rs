//! Conversion from source payloads to [`iwv_core::Product`] lists.

use iwv_core::Product;

use crate::error::SourceError;
use crate::types::SheetValuesResponse;

/// Literal cell value that marks a row as indented.
const INDENT_TRUE: &str = "TRUE";

/// Builds products from spreadsheet rows `[name, unit, price, indent]`.
///
/// The first row is the header and is skipped. Missing cells read as empty
/// strings; the indent flag is set only by the literal `"TRUE"`.
///
/// # Errors
///
/// Returns [`SourceError::EmptyData`] if the response has no `values` or no
/// rows below the header.
pub fn products_from_sheet(
    response: SheetValuesResponse,
    context: &str,
) -> Result<Vec<Product>, SourceError> {
    let rows = response.values.unwrap_or_default();
    if rows.len() <= 1 {
        return Err(SourceError::EmptyData {
            context: context.to_owned(),
        });
    }

    Ok(rows
        .into_iter()
        .skip(1)
        .map(|row| Product {
            product_name: cell_text(&row, 0),
            unit_of_measure: cell_text(&row, 1),
            sales_price: cell_text(&row, 2),
            indent: cell_text(&row, 3) == INDENT_TRUE,
        })
        .collect())
}

/// Parses a static JSON feed: an array of product objects.
///
/// # Errors
///
/// - [`SourceError::Deserialize`] if `body` is not a JSON array of products.
/// - [`SourceError::EmptyData`] if the array is empty.
pub fn products_from_json(body: &str, context: &str) -> Result<Vec<Product>, SourceError> {
    let products: Vec<Product> =
        serde_json::from_str(body).map_err(|e| SourceError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;
    if products.is_empty() {
        return Err(SourceError::EmptyData {
            context: context.to_owned(),
        });
    }
    Ok(products)
}

fn cell_text(row: &[serde_json::Value], idx: usize) -> String {
    match row.get(idx) {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Bool(b)) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Some(other) => other.to_string(),
    }
}
