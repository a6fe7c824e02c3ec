//! Keeps a row's checkbox, its quantity field, and the selection map in
//! agreement.
//!
//! The outcome depends only on the field values at commit time: the checkbox
//! state and the raw quantity text. Nothing is diffed against the previous
//! row state, so edits can arrive in any order.

use crate::product::Product;
use crate::quantity::Quantity;
use crate::selection::SelectionMap;

/// What the row shows after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowState {
    pub checked: bool,
    pub quantity: Quantity,
}

/// A user edit on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEdit<'a> {
    /// Checkbox set to the given state.
    Toggle(bool),
    /// Quantity field committed with the given raw text.
    Quantity(&'a str),
}

/// Resolves the row from its current field values and writes the result into
/// `selection`.
///
/// - Checked with a zero quantity means one unit.
/// - A zero quantity unchecks the row and removes it from the selection.
/// - Anything else upserts `{quantity, product}` and leaves the row checked.
pub fn reconcile(
    selection: &mut SelectionMap,
    product: &Product,
    checkbox_checked: bool,
    raw_quantity: &str,
) -> RowState {
    let mut quantity = product.quantity_rule().commit(raw_quantity);
    if checkbox_checked && quantity.is_zero() {
        quantity = Quantity::ONE;
    }

    if quantity.is_zero() {
        selection.remove(&product.product_name);
        return RowState {
            checked: false,
            quantity,
        };
    }

    selection.upsert(product, quantity);
    RowState {
        checked: true,
        quantity,
    }
}

/// Applies one edit to a row currently showing `current`.
///
/// Unchecking clears the quantity field. A quantity edit drives the checkbox
/// from the committed value, so typing `0` deselects the row.
pub fn apply_edit(
    selection: &mut SelectionMap,
    product: &Product,
    current: RowState,
    edit: RowEdit<'_>,
) -> RowState {
    match edit {
        RowEdit::Toggle(true) => {
            let shown = current.quantity.to_string();
            reconcile(selection, product, true, &shown)
        }
        RowEdit::Toggle(false) => reconcile(selection, product, false, "0"),
        RowEdit::Quantity(raw) => {
            let committed = product.quantity_rule().commit(raw);
            reconcile(selection, product, !committed.is_zero(), raw)
        }
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
