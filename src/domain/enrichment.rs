//! Client-side ingredient enrichment
//!
//! The catalog's ingredient rows do not carry the concern/goal tags the
//! recommendation scorer matches on, nor the pregnancy-safety flag. Those
//! annotations are attached on the client from a curated table keyed by
//! INCI name. Enrichment fields stay absent unless attached here.

use std::collections::HashMap;

use super::product::ProductDetail;

/// Note value marking an ingredient as unsafe during pregnancy.
pub const PREGNANCY_UNSAFE: &str = "pregnancy-unsafe";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientEnrichment {
    /// Concern/goal tags this ingredient addresses.
    pub solves: Vec<String>,
    /// Safety note, e.g. [`PREGNANCY_UNSAFE`].
    pub notes: Option<String>,
}

/// Curated enrichment annotations keyed by INCI name.
#[derive(Debug, Clone)]
pub struct EnrichmentTable {
    entries: HashMap<String, IngredientEnrichment>,
}

impl Default for EnrichmentTable {
    /// Built-in table covering the common actives surfaced in the catalog.
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("Glycerin", &["Cải thiện kết cấu da"], None);
        table.insert("Silica", &["Lỗ chân lông to"], None);
        table.insert("Zinc PCA", &["Giảm mụn"], None);
        table.insert(
            "Sodium Hyaluronate",
            &["Chống lão hóa", "Cải thiện kết cấu da"],
            None,
        );
        table.insert(
            "Retinol",
            &["Chống lão hóa", "Thâm nám", "Giảm mụn"],
            Some(PREGNANCY_UNSAFE),
        );
        table
    }
}

impl EnrichmentTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, inci_name: &str, solves: &[&str], notes: Option<&str>) {
        self.entries.insert(
            inci_name.to_string(),
            IngredientEnrichment {
                solves: solves.iter().map(|s| s.to_string()).collect(),
                notes: notes.map(|n| n.to_string()),
            },
        );
    }

    pub fn get(&self, inci_name: &str) -> Option<&IngredientEnrichment> {
        self.entries.get(inci_name)
    }

    /// Attach annotations onto a product detail's ingredients in place.
    /// Ingredients without a table entry are left untouched.
    pub fn apply(&self, product: &mut ProductDetail) {
        for ingredient in &mut product.ingredients {
            if let Some(enrichment) = self.entries.get(&ingredient.inci_name) {
                ingredient.solves = if enrichment.solves.is_empty() {
                    None
                } else {
                    Some(enrichment.solves.clone())
                };
                ingredient.notes = enrichment.notes.clone();
            }
        }
    }
}
