//! Filter and sort: the pure computation behind the displayed product list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::price::price_sort_key;
use crate::product::Product;

/// A sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    ProductName,
    UnitOfMeasure,
    SalesPrice,
    Indent,
}

impl SortColumn {
    /// Column identifier as used in table headers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductName => "productName",
            Self::UnitOfMeasure => "unitOfMeasure",
            Self::SalesPrice => "salesPrice",
            Self::Indent => "indent",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Indent => a.indent.cmp(&b.indent),
            Self::SalesPrice => price_sort_key(&a.sales_price).cmp(&price_sort_key(&b.sales_price)),
            Self::ProductName => locale_compare(&a.product_name, &b.product_name),
            Self::UnitOfMeasure => locale_compare(&a.unit_of_measure, &b.unit_of_measure),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "productname" | "name" | "product" => Ok(Self::ProductName),
            "unitofmeasure" | "unit" | "uom" => Ok(Self::UnitOfMeasure),
            "salesprice" | "price" => Ok(Self::SalesPrice),
            "indent" => Ok(Self::Indent),
            _ => Err(CoreError::UnknownSortColumn(s.to_string())),
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub ascending: bool,
}

impl SortState {
    #[must_use]
    pub fn ascending(column: SortColumn) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    /// Header click: the same column flips direction, a new column starts
    /// ascending.
    #[must_use]
    pub fn click(current: Option<SortState>, column: SortColumn) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column,
                ascending: !state.ascending,
            },
            _ => SortState::ascending(column),
        }
    }

    /// Direction label for the active sort column.
    #[must_use]
    pub fn direction_label(self) -> &'static str {
        if self.ascending {
            "ascending"
        } else {
            "descending"
        }
    }
}

/// Filters `all` by `search_term` and sorts by `sort`, leaving `all`
/// untouched.
///
/// The sort is stable in both directions: descending reverses the
/// comparison, not the list, so equal rows keep their fetch order.
#[must_use]
pub fn compute_display_list<'a>(
    all: &'a [Product],
    search_term: &str,
    sort: Option<SortState>,
) -> Vec<&'a Product> {
    let needle = search_term.to_lowercase();
    let mut display: Vec<&Product> = all.iter().filter(|p| p.name_matches(&needle)).collect();

    if let Some(SortState { column, ascending }) = sort {
        display.sort_by(|a, b| {
            let ord = column.compare(a, b);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    display
}

/// Case-insensitive primary comparison; on ties lowercase sorts first.
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
