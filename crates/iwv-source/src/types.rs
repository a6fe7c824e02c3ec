//! Wire shapes returned by the product sources.

use serde::Deserialize;

/// Response of the spreadsheet values endpoint.
///
/// `values` is absent when the requested range is empty. Cells are usually
/// strings but may be numbers or booleans depending on the render option.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetValuesResponse {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<Vec<serde_json::Value>>>,
}
