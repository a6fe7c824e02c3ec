//! YAML order files and the `summary` command.
//!
//! An order file lists the products to select:
//!
//! ```yaml
//! items:
//!   - name: Apple
//!     quantity: 2.5
//!   - name: Basil
//!     quantity: "3"
//! ```
//!
//! Each quantity is fed through the same reconciliation as an interactive
//! edit, so `/KG` items keep one decimal and other items are whole numbers.
//! Numeric quantities are truncated to the product's rule; string quantities
//! are cleaned the way typed input is.

use std::path::{Path, PathBuf};

use anyhow::Context;
use iwv_core::summary::summary_text;
use iwv_core::{
    AppConfig, CatalogMessage, CatalogState, CoreError, Product, Quantity, QuantityRule,
    SummaryError,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::catalog::fetch_catalog;
use crate::sink::Sink;

#[derive(Debug, Deserialize)]
pub(crate) struct OrderFile {
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderItem {
    pub name: String,
    pub quantity: QuantityText,
}

/// YAML lets a quantity be written as a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum QuantityText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl QuantityText {
    /// Field text for this quantity under `rule`. Negative numbers become
    /// `0` and numbers too large for a `Decimal` become [`Quantity::MAX`].
    pub(crate) fn raw(&self, rule: QuantityRule) -> String {
        match self {
            QuantityText::Int(n) => rule.clamp(Decimal::from(*n)).to_string(),
            QuantityText::Float(n) => match Decimal::try_from(*n) {
                Ok(value) => rule.clamp(value).to_string(),
                Err(_) if *n > 0.0 => Quantity::MAX.to_string(),
                Err(_) => Quantity::ZERO.to_string(),
            },
            QuantityText::Text(s) => s.clone(),
        }
    }
}

/// Load an order file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
pub(crate) fn load_order_file(path: &Path) -> anyhow::Result<OrderFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read order file {}", path.display()))?;
    parse_order_file(&content).with_context(|| format!("invalid order file {}", path.display()))
}

pub(crate) fn parse_order_file(content: &str) -> Result<OrderFile, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Applies every item as a quantity edit. Returns the names that matched no
/// product.
pub(crate) fn apply_order(state: &mut CatalogState, order: &OrderFile) -> Vec<String> {
    let mut unknown = Vec::new();
    for item in &order.items {
        let rule = state
            .find_product(&item.name)
            .map_or(QuantityRule::Whole, Product::quantity_rule);
        let message = CatalogMessage::EditQuantity {
            product_name: item.name.clone(),
            raw: item.quantity.raw(rule),
        };
        match state.apply(message) {
            Ok(_) => {}
            Err(CoreError::UnknownProduct(name)) => {
                tracing::warn!(product = %name, "order item matches no product, skipping");
                unknown.push(name);
            }
            Err(e) => {
                tracing::warn!(product = %item.name, error = %e, "order item rejected");
                unknown.push(item.name.clone());
            }
        }
    }
    unknown
}

/// Build the order summary for an order file and deliver it.
///
/// # Errors
///
/// Returns an error if the order file or product list cannot be loaded, no
/// item resolves to a positive quantity, or the summary cannot be written.
pub(crate) async fn run_summary(
    config: &AppConfig,
    order_path: &Path,
    out: Option<PathBuf>,
    refresh: bool,
) -> anyhow::Result<()> {
    let order = load_order_file(order_path)?;
    let products = fetch_catalog(config, refresh).await?;
    let mut state = CatalogState::new(products);

    for name in apply_order(&mut state, &order) {
        eprintln!("warning: no product named '{name}', skipped");
    }

    let text = match summary_text(state.selection(), &config.pricing_policy()) {
        Ok(text) => text,
        Err(SummaryError::NothingSelected) => {
            anyhow::bail!("no products selected; every order item was missing or had quantity 0")
        }
        Err(e) => return Err(e).context("could not build the order summary"),
    };

    let sink = Sink::from_arg(out);
    sink.deliver(&text)
        .with_context(|| format!("could not copy the order summary to {sink}"))?;
    if !sink.is_stdout() {
        eprintln!("Order summary written to {sink}. Please send it to us on WhatsApp.");
    }
    Ok(())
}
