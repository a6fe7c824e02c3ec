use crate::product::Product;
use crate::quantity::Quantity;

/// One selected product and its committed quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub quantity: Quantity,
    /// Copy of the product taken when it was selected.
    pub product: Product,
}

/// The authoritative record of which products are chosen, keyed by
/// `productName`.
///
/// Iteration follows insertion order. Updating an existing key keeps its
/// position; removing and re-adding moves it to the end. Entries always hold
/// a non-zero quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMap {
    entries: Vec<SelectionEntry>,
}

impl SelectionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn contains(&self, product_name: &str) -> bool {
        self.position(product_name).is_some()
    }

    #[must_use]
    pub fn get(&self, product_name: &str) -> Option<&SelectionEntry> {
        self.position(product_name).map(|idx| &self.entries[idx])
    }

    /// Inserts or replaces the entry for `product`. A zero quantity removes
    /// the entry instead.
    pub fn upsert(&mut self, product: &Product, quantity: Quantity) {
        if quantity.is_zero() {
            self.remove(&product.product_name);
            return;
        }
        let entry = SelectionEntry {
            quantity,
            product: product.clone(),
        };
        match self.position(&product.product_name) {
            Some(idx) => self.entries[idx] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Removes the entry for `product_name`, returning it if present.
    pub fn remove(&mut self, product_name: &str) -> Option<SelectionEntry> {
        self.position(product_name)
            .map(|idx| self.entries.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    fn position(&self, product_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.product.product_name == product_name)
    }
}

impl<'a> IntoIterator for &'a SelectionMap {
    type Item = &'a SelectionEntry;
    type IntoIter = std::slice::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
