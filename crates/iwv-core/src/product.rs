use serde::{Deserialize, Serialize};

use crate::quantity::QuantityRule;

/// Unit of measure that marks a product as sold by weight.
pub const WEIGHED_UNIT: &str = "/KG";

/// A catalog entry as loaded from the product source.
///
/// Products are never mutated after loading; a reload replaces the whole
/// list. Field names serialize in camelCase to match the static JSON feed and
/// the cached payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique key used by the selection map.
    #[serde(default)]
    pub product_name: String,
    /// Free text, e.g. `"/KG"`, `"/PKT"`, `"/BOX"`.
    #[serde(default)]
    pub unit_of_measure: String,
    /// Currency text as published, e.g. `"$2.00"`. Empty means price on request.
    #[serde(default)]
    pub sales_price: String,
    /// Display-only flag.
    #[serde(default)]
    pub indent: bool,
}

impl Product {
    /// Returns `true` when the product is sold by the kilogram and therefore
    /// accepts fractional quantities.
    #[must_use]
    pub fn is_weighed(&self) -> bool {
        self.unit_of_measure == WEIGHED_UNIT
    }

    #[must_use]
    pub fn quantity_rule(&self) -> QuantityRule {
        QuantityRule::for_unit(&self.unit_of_measure)
    }

    /// Case-insensitive substring match against the product name.
    ///
    /// `needle_lower` must already be lowercased.
    #[must_use]
    pub(crate) fn name_matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.product_name.to_lowercase().contains(needle_lower)
    }
}
