//! Product catalog wire types
//!
//! List endpoints return `ProductSummary` rows inside a Spring-style page
//! envelope; the detail endpoint returns the full `ProductDetail` with
//! nested collections. List views never carry nested collections — a detail
//! synthesized from a summary gets empty ones (`ProductDetail::from_summary`).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::profile::SkinType;

/// Ingredient risk ratings as served by the catalog (Vietnamese labels).
pub mod risk {
    pub const GOOD: &str = "Tốt";
    pub const MODERATE: &str = "Trung bình";
    pub const AVOID: &str = "Không nên dùng";
}

/// Product basic information from listing pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub upc_ean: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub brand_id: Option<i64>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of a paginated listing, mirroring the server's page envelope.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
    /// 0-based page index.
    pub number: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

/// Cosmetic ingredient as served by the catalog.
///
/// `solves` and `notes` are client-side enrichment, never sent by the
/// server; they stay absent unless an `EnrichmentTable` attached them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: i64,
    pub inci_name: String,
    #[serde(default)]
    pub alias_vi: Option<String>,
    #[serde(default)]
    pub description_vi: Option<String>,
    #[serde(default)]
    pub functions: Option<String>,
    /// One of [`risk::GOOD`], [`risk::MODERATE`], [`risk::AVOID`], or unset.
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub banned_in: Option<String>,
    #[serde(default)]
    pub typical_range: Option<String>,
    #[serde(default)]
    pub sources: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solves: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Ingredient {
    /// Lowercase-trimmed INCI name, the form allergy tokens are matched in.
    pub fn normalized_name(&self) -> String {
        self.inci_name.trim().to_lowercase()
    }
}

/// Retailer offer attached to a product detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLink {
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    pub retailer_id: i64,
    #[serde(default)]
    pub retailer_name: Option<String>,
    pub price: f64,
    pub url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// User feedback entry for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Regional regulatory label on a product detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryLabel {
    pub id: i64,
    pub region: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

/// Full product detail: summary fields plus nested collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: ProductSummary,
    /// Suitability score per skin type, 0-10.
    #[serde(default)]
    pub skin_type_score: HashMap<SkinType, f64>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub purchase_links: Vec<PurchaseLink>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub regulatory_labels: Vec<RegulatoryLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_score: Option<f64>,
}

impl ProductDetail {
    /// Shallow hydration from a listing row: identity fields carried over,
    /// nested collections empty until a detail fetch fills them.
    pub fn from_summary(summary: ProductSummary) -> Self {
        Self {
            summary,
            skin_type_score: HashMap::new(),
            ingredients: Vec::new(),
            purchase_links: Vec::new(),
            reviews: Vec::new(),
            regulatory_labels: Vec::new(),
            recommendation_score: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.summary.id
    }
}

/// Active search facets. Free-text query and filters are mutually exclusive
/// at the coordinator level; this type only carries the filter facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub skin_type: Option<SkinType>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.concerns.is_empty() && self.skin_type.is_none()
    }
}

/// Parameters for one paginated product search request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSearchParams {
    pub query: Option<String>,
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub skin_type: Option<SkinType>,
    pub concerns: Vec<String>,
}

impl ProductSearchParams {
    pub fn new(query: Option<String>, page: u32, size: u32, filters: &SearchFilters) -> Self {
        Self {
            query: query.filter(|q| !q.is_empty()),
            page,
            size,
            sort: "name,asc".to_string(),
            skin_type: filters.skin_type,
            concerns: filters.concerns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_result_parses_server_envelope() {
        let body = json!({
            "content": [{
                "id": 12,
                "name": "Gentle Cleanser",
                "upcEan": "8930001234567",
                "category": "cleanser",
                "imageUrl": "https://cdn.example/p12.jpg",
                "country": "VN",
                "brandId": 3,
                "brandName": "La Roche",
                "createdAt": "2025-04-01T08:00:00Z"
            }],
            "totalPages": 5,
            "totalElements": 98,
            "size": 21,
            "number": 0,
            "sort": null,
            "numberOfElements": 21,
            "pageable": null,
            "first": true,
            "last": false,
            "empty": false
        });

        let page: PageResult<ProductSummary> = serde_json::from_value(body).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].brand_name.as_deref(), Some("La Roche"));
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.number, 0);
        assert!(page.first);
    }

    #[test]
    fn detail_flattens_summary_fields() {
        let body = json!({
            "id": 4,
            "name": "Retinol Serum",
            "skinTypeScore": {"OILY": 8, "DRY": 4},
            "ingredients": [{
                "id": 1,
                "inciName": "Retinol",
                "riskLevel": risk::MODERATE
            }],
            "purchaseLinks": [],
            "reviews": [],
            "regulatoryLabels": []
        });

        let detail: ProductDetail = serde_json::from_value(body).unwrap();
        assert_eq!(detail.id(), 4);
        assert_eq!(detail.summary.name, "Retinol Serum");
        assert_eq!(detail.skin_type_score[&SkinType::Oily], 8.0);
        assert_eq!(detail.ingredients[0].inci_name, "Retinol");
        // Enrichment fields stay absent until explicitly attached
        assert!(detail.ingredients[0].solves.is_none());
        assert!(detail.ingredients[0].notes.is_none());
    }

    #[test]
    fn from_summary_synthesizes_empty_collections() {
        let summary = ProductSummary {
            id: 9,
            name: "Toner".into(),
            upc_ean: None,
            category: None,
            image_url: None,
            country: None,
            brand_id: None,
            brand_name: None,
            created_at: None,
        };
        let detail = ProductDetail::from_summary(summary);
        assert!(detail.ingredients.is_empty());
        assert!(detail.skin_type_score.is_empty());
        assert!(detail.reviews.is_empty());
        assert!(detail.recommendation_score.is_none());
    }

    #[test]
    fn search_params_drop_empty_query() {
        let params =
            ProductSearchParams::new(Some(String::new()), 0, 21, &SearchFilters::default());
        assert!(params.query.is_none());
        assert_eq!(params.sort, "name,asc");
    }
}
