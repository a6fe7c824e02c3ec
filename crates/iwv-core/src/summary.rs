//! Order summary text for handing a selection off to the contact channel.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::SummaryError;
use crate::price::{format_money, parse_price};
use crate::quantity::Quantity;
use crate::selection::SelectionMap;

/// Shipping rules applied to the subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Flat fee charged when the subtotal is below the threshold.
    pub shipping_fee: Decimal,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_fee: Decimal::from(8),
            free_shipping_threshold: Decimal::from(80),
        }
    }
}

impl PricingPolicy {
    #[must_use]
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal < self.free_shipping_threshold {
            self.shipping_fee
        } else {
            Decimal::ZERO
        }
    }
}

/// One line of the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderLine {
    Priced {
        product_name: String,
        unit_of_measure: String,
        price_text: String,
        quantity: Quantity,
        line_total: Decimal,
    },
    /// The price could not be read; the line adds nothing to the subtotal.
    OnRequest {
        product_name: String,
        unit_of_measure: String,
        quantity: Quantity,
    },
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priced {
                product_name,
                unit_of_measure,
                price_text,
                quantity,
                line_total,
            } => write!(
                f,
                "{product_name}/ {unit_of_measure}: {price_text}, Quantity: {quantity}, Total: {}",
                format_money(*line_total)
            ),
            Self::OnRequest {
                product_name,
                unit_of_measure,
                quantity,
            } => write!(
                f,
                "{product_name}/ {unit_of_measure}: Price on request (please check with customer service), Quantity: {quantity}"
            ),
        }
    }
}

/// A computed order. `Display` renders the full shareable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
    free_shipping_threshold: Decimal,
    standard_fee: Decimal,
}

impl OrderSummary {
    /// Number of lines whose price could not be read.
    #[must_use]
    pub fn on_request_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, OrderLine::OnRequest { .. }))
            .count()
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order Summary")?;
        writeln!(f, "-------------")?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;

        if self.shipping_fee.is_zero() {
            writeln!(
                f,
                "Shipping: Free shipping on orders of {} and above.",
                format_money(self.free_shipping_threshold)
            )?;
        } else {
            writeln!(
                f,
                "Shipping: A {} shipping fee applies to orders below {}.",
                format_money(self.standard_fee),
                format_money(self.free_shipping_threshold)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Subtotal: {}", format_money(self.subtotal))?;
        writeln!(f, "Shipping Fee: {}", format_money(self.shipping_fee))?;
        writeln!(f, "Total: {}", format_money(self.total))?;
        writeln!(f)?;

        writeln!(
            f,
            "Note: Prices are indicative and may change. Items priced on request are not included in the total."
        )?;
        write!(
            f,
            "Please send this order summary to us on WhatsApp to confirm your order."
        )
    }
}

/// Builds the order summary for every entry in `selection`, in map order.
///
/// # Errors
///
/// Returns [`SummaryError::NothingSelected`] when `selection` is empty, and
/// [`SummaryError::AmountTooLarge`] or [`SummaryError::TotalTooLarge`] when a
/// line total or the order total does not fit in a `Decimal`.
pub fn build_summary(
    selection: &SelectionMap,
    policy: &PricingPolicy,
) -> Result<OrderSummary, SummaryError> {
    if selection.is_empty() {
        return Err(SummaryError::NothingSelected);
    }

    let mut subtotal = Decimal::ZERO;
    let mut lines = Vec::with_capacity(selection.len());
    for entry in selection {
        let product = &entry.product;
        let line = match parse_price(&product.sales_price) {
            Some(price) => {
                let too_large = || SummaryError::AmountTooLarge {
                    product_name: product.product_name.clone(),
                };
                let line_total = price
                    .checked_mul(entry.quantity.value())
                    .ok_or_else(too_large)?;
                subtotal = subtotal.checked_add(line_total).ok_or_else(too_large)?;
                OrderLine::Priced {
                    product_name: product.product_name.clone(),
                    unit_of_measure: product.unit_of_measure.clone(),
                    price_text: product.sales_price.clone(),
                    quantity: entry.quantity,
                    line_total,
                }
            }
            None => OrderLine::OnRequest {
                product_name: product.product_name.clone(),
                unit_of_measure: product.unit_of_measure.clone(),
                quantity: entry.quantity,
            },
        };
        lines.push(line);
    }

    let shipping_fee = policy.shipping_for(subtotal);
    let total = subtotal
        .checked_add(shipping_fee)
        .ok_or(SummaryError::TotalTooLarge)?;
    Ok(OrderSummary {
        lines,
        subtotal,
        shipping_fee,
        total,
        free_shipping_threshold: policy.free_shipping_threshold,
        standard_fee: policy.shipping_fee,
    })
}

/// Convenience wrapper returning only the rendered text.
///
/// # Errors
///
/// Same as [`build_summary`].
pub fn summary_text(
    selection: &SelectionMap,
    policy: &PricingPolicy,
) -> Result<String, SummaryError> {
    build_summary(selection, policy).map(|summary| summary.to_string())
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
