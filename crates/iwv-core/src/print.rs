//! Print-ready catalog document.
//!
//! Printing always covers the full product list in fetch order, ignoring the
//! current search and sort, and is rendered in the light scheme whatever the
//! user's theme. Nothing in the interactive state is touched.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::product::Product;
use crate::render::format_catalog;
use crate::theme::Theme;

/// Singapore is UTC+8 year-round.
const SINGAPORE_OFFSET_SECS: i32 = 8 * 3600;

pub const CATALOG_TITLE: &str = "IWV Product Catalogue";

/// A rendered print job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub generated_on: NaiveDate,
    /// Scheme used for the printed page.
    pub theme: Theme,
    pub body: String,
}

impl PrintDocument {
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "{CATALOG_TITLE}\nGenerated on: {}\n\n{}",
            format_print_date(self.generated_on),
            self.body
        )
    }
}

/// Calendar date in Singapore for `now`.
#[must_use]
pub fn print_date(now: DateTime<Utc>) -> NaiveDate {
    let offset = FixedOffset::east_opt(SINGAPORE_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    now.with_timezone(&offset).date_naive()
}

/// `dd/mm/yyyy`.
#[must_use]
pub fn format_print_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Builds the print document for the full, unfiltered product list.
#[must_use]
pub fn render_print_document(all_products: &[Product], now: DateTime<Utc>) -> PrintDocument {
    PrintDocument {
        generated_on: print_date(now),
        theme: Theme::Light,
        body: format_catalog(all_products),
    }
}
