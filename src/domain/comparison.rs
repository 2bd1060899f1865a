//! Side-by-side comparison selection
//!
//! Bounded two-slot selection feeding the compare view. Session-scoped,
//! never persisted.

use serde::{Deserialize, Serialize};

use super::product::ProductSummary;

/// Maximum number of products a comparison can hold.
pub const MAX_COMPARE_ITEMS: usize = 2;

/// Result of toggling a product in/out of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Selection already full; nothing changed.
    Rejected,
}

/// Ordered selection of at most [`MAX_COMPARE_ITEMS`] products, toggled by
/// presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonSet {
    items: Vec<ProductSummary>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a product: present items are removed, new items are added
    /// while there is room. A full selection rejects new items unchanged.
    pub fn toggle(&mut self, product: ProductSummary) -> ToggleOutcome {
        if let Some(pos) = self.items.iter().position(|p| p.id == product.id) {
            self.items.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.items.len() >= MAX_COMPARE_ITEMS {
            return ToggleOutcome::Rejected;
        }
        self.items.push(product);
        ToggleOutcome::Added
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ProductSummary] {
        &self.items
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_COMPARE_ITEMS
    }

    /// The two selected products, once the selection is complete.
    pub fn pair(&self) -> Option<(&ProductSummary, &ProductSummary)> {
        match self.items.as_slice() {
            [a, b] => Some((a, b)),
            _ => None,
        }
    }
}
