//! The catalog's single source of truth.
//!
//! UI events arrive as [`CatalogMessage`]s, pass through the reconciler, and
//! the table is re-rendered from the resulting state.

use crate::error::CoreError;
use crate::product::Product;
use crate::quantity::Quantity;
use crate::reconcile::{apply_edit, RowEdit, RowState};
use crate::render::{render, RenderedTable};
use crate::selection::SelectionMap;
use crate::view::{compute_display_list, SortColumn, SortState};

/// A state mutation triggered by user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMessage {
    Search(String),
    ClearSearch,
    SortBy(SortColumn),
    Toggle { product_name: String, checked: bool },
    EditQuantity { product_name: String, raw: String },
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    selection: SelectionMap,
    search_term: String,
    sort: Option<SortState>,
}

impl CatalogState {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Replaces the product list wholesale, as after a re-fetch.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionMap {
        &self.selection
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// `true` when leaving would discard a non-empty selection.
    #[must_use]
    pub fn has_pending_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    #[must_use]
    pub fn display_list(&self) -> Vec<&Product> {
        compute_display_list(&self.products, &self.search_term, self.sort)
    }

    #[must_use]
    pub fn render(&self) -> RenderedTable {
        render(&self.display_list(), &self.selection)
    }

    /// What the row for `product_name` currently shows.
    #[must_use]
    pub fn row_state(&self, product_name: &str) -> RowState {
        match self.selection.get(product_name) {
            Some(entry) => RowState {
                checked: true,
                quantity: entry.quantity,
            },
            None => RowState {
                checked: false,
                quantity: Quantity::ZERO,
            },
        }
    }

    /// Applies one message.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownProduct`] when a row edit names a product
    /// that is not in the current list.
    pub fn apply(&mut self, message: CatalogMessage) -> Result<Option<RowState>, CoreError> {
        match message {
            CatalogMessage::Search(term) => {
                self.search_term = term;
                Ok(None)
            }
            CatalogMessage::ClearSearch => {
                self.search_term.clear();
                Ok(None)
            }
            CatalogMessage::SortBy(column) => {
                self.sort = Some(SortState::click(self.sort, column));
                Ok(None)
            }
            CatalogMessage::Toggle {
                product_name,
                checked,
            } => self
                .edit_row(&product_name, RowEdit::Toggle(checked))
                .map(Some),
            CatalogMessage::EditQuantity { product_name, raw } => self
                .edit_row(&product_name, RowEdit::Quantity(&raw))
                .map(Some),
        }
    }

    fn edit_row(&mut self, product_name: &str, edit: RowEdit<'_>) -> Result<RowState, CoreError> {
        let product = self
            .find_product(product_name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownProduct(product_name.to_string()))?;
        let current = self.row_state(&product.product_name);
        Ok(apply_edit(&mut self.selection, &product, current, edit))
    }

    /// Exact name match first, then a unique case-insensitive match.
    #[must_use]
    pub fn find_product(&self, product_name: &str) -> Option<&Product> {
        if let Some(p) = self.products.iter().find(|p| p.product_name == product_name) {
            return Some(p);
        }
        let lower = product_name.to_lowercase();
        let mut matches = self
            .products
            .iter()
            .filter(|p| p.product_name.to_lowercase() == lower);
        match (matches.next(), matches.next()) {
            (Some(p), None) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, unit: &str, price: &str) -> Product {
        Product {
            product_name: name.to_string(),
            unit_of_measure: unit.to_string(),
            sales_price: price.to_string(),
            indent: false,
        }
    }

    fn state() -> CatalogState {
        CatalogState::new(vec![
            product("Banana", "/KG", "$3.00"),
            product("Apple", "/KG", "$2.00"),
            product("Basil", "/PKT", "$1.50"),
        ])
    }

    fn toggle(name: &str, checked: bool) -> CatalogMessage {
        CatalogMessage::Toggle {
            product_name: name.to_string(),
            checked,
        }
    }

    fn edit(name: &str, raw: &str) -> CatalogMessage {
        CatalogMessage::EditQuantity {
            product_name: name.to_string(),
            raw: raw.to_string(),
        }
    }

    #[test]
    fn search_and_clear() {
        let mut s = state();
        s.apply(CatalogMessage::Search("ba".to_string())).unwrap();
        assert_eq!(s.display_list().len(), 2);
        s.apply(CatalogMessage::ClearSearch).unwrap();
        assert_eq!(s.display_list().len(), 3);
        assert_eq!(s.search_term(), "");
    }

    #[test]
    fn sort_clicks_toggle_direction() {
        let mut s = state();
        s.apply(CatalogMessage::SortBy(SortColumn::ProductName)).unwrap();
        assert_eq!(s.display_list()[0].product_name, "Apple");
        s.apply(CatalogMessage::SortBy(SortColumn::ProductName)).unwrap();
        assert_eq!(s.display_list()[0].product_name, "Basil");
        assert_eq!(s.sort().map(|x| x.ascending), Some(false));
    }

    #[test]
    fn selection_survives_search_changes() {
        let mut s = state();
        s.apply(edit("Apple", "1.5")).unwrap();
        s.apply(CatalogMessage::Search("basil".to_string())).unwrap();
        assert!(s.render().rows().iter().all(|r| !r.checked));
        s.apply(CatalogMessage::ClearSearch).unwrap();
        let table = s.render();
        let apple = table.rows().iter().find(|r| r.product_name == "Apple").unwrap();
        assert!(apple.checked);
        assert_eq!(apple.quantity.to_string(), "1.5");
    }

    #[test]
    fn toggle_then_untoggle() {
        let mut s = state();
        let row = s.apply(toggle("Basil", true)).unwrap().unwrap();
        assert_eq!(row.quantity, Quantity::ONE);
        assert!(s.has_pending_selection());
        s.apply(toggle("Basil", false)).unwrap();
        assert!(!s.has_pending_selection());
    }

    #[test]
    fn unknown_product_is_an_error() {
        let mut s = state();
        let err = s.apply(toggle("Kiwi", true)).unwrap_err();
        assert_eq!(err, CoreError::UnknownProduct("Kiwi".to_string()));
    }

    #[test]
    fn find_product_falls_back_to_case_insensitive() {
        let s = state();
        assert_eq!(s.find_product("apple").map(|p| p.product_name.as_str()), Some("Apple"));
        assert!(s.find_product("ap").is_none());
    }

    #[test]
    fn replacing_products_keeps_selection() {
        let mut s = state();
        s.apply(edit("Basil", "2")).unwrap();
        s.replace_products(vec![product("Basil", "/PKT", "$1.80")]);
        assert_eq!(s.products().len(), 1);
        assert!(s.selection().contains("Basil"));
    }
}
