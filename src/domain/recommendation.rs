//! Recommendation scoring
//!
//! Pure ranking of enriched product details against a user profile. No I/O;
//! only the enrichment data already attached to each product is consulted.
//!
//! Per product:
//! - base score = the product's score for the profile's skin type (0 if unmapped)
//! - any ingredient matching an allergy token: -100
//! - pregnant profile + any pregnancy-unsafe ingredient: -200
//! - each concern tag solved by at least one ingredient: +3 (once per tag)
//! - each goal tag solved by at least one ingredient: +5 (once per tag)
//!
//! Products scoring -50 or lower are dropped; the rest are sorted by score
//! descending, ties keeping input order. The -50 cutoff lets a single
//! allergen hit with a strong base score still surface, while a
//! pregnancy-unsafe hit always excludes.

use super::enrichment::PREGNANCY_UNSAFE;
use super::product::{Ingredient, ProductDetail};
use super::profile::UserProfile;

/// Score threshold below which (inclusive) a product is excluded.
const EXCLUSION_THRESHOLD: f64 = -50.0;

const ALLERGEN_PENALTY: f64 = 100.0;
const PREGNANCY_PENALTY: f64 = 200.0;
const CONCERN_BONUS: f64 = 3.0;
const GOAL_BONUS: f64 = 5.0;

fn solves_tag(ingredients: &[Ingredient], tag: &str) -> bool {
    ingredients
        .iter()
        .any(|ing| ing.solves.as_ref().is_some_and(|s| s.iter().any(|t| t == tag)))
}

/// Compute the recommendation score for a single product.
pub fn score_product(product: &ProductDetail, profile: &UserProfile) -> f64 {
    let mut score = product
        .skin_type_score
        .get(&profile.skin_type)
        .copied()
        .unwrap_or(0.0);

    let ingredients = &product.ingredients;

    let has_allergen = ingredients
        .iter()
        .any(|ing| profile.allergies.iter().any(|a| *a == ing.normalized_name()));
    if has_allergen {
        score -= ALLERGEN_PENALTY;
    }

    if profile.pregnant
        && ingredients
            .iter()
            .any(|ing| ing.notes.as_deref() == Some(PREGNANCY_UNSAFE))
    {
        score -= PREGNANCY_PENALTY;
    }

    for concern in &profile.concerns {
        if solves_tag(ingredients, concern) {
            score += CONCERN_BONUS;
        }
    }

    for goal in &profile.goals {
        if solves_tag(ingredients, goal) {
            score += GOAL_BONUS;
        }
    }

    score
}

/// Rank products for a profile. Deterministic and side-effect-free: returns
/// the surviving products with `recommendation_score` attached, sorted by
/// score descending, input order preserved among equals.
pub fn rank_products(products: &[ProductDetail], profile: &UserProfile) -> Vec<ProductDetail> {
    let mut ranked: Vec<ProductDetail> = products
        .iter()
        .map(|product| {
            let mut scored = product.clone();
            scored.recommendation_score = Some(score_product(product, profile));
            scored
        })
        .filter(|p| p.recommendation_score.unwrap_or(0.0) > EXCLUSION_THRESHOLD)
        .collect();

    // Stable sort keeps input order for equal scores
    ranked.sort_by(|a, b| {
        let sa = a.recommendation_score.unwrap_or(0.0);
        let sb = b.recommendation_score.unwrap_or(0.0);
        sb.total_cmp(&sa)
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductSummary;
    use crate::domain::profile::SkinType;
    use std::collections::HashMap;

    fn summary(id: i64, name: &str) -> ProductSummary {
        ProductSummary {
            id,
            name: name.into(),
            upc_ean: None,
            category: None,
            image_url: None,
            country: None,
            brand_id: None,
            brand_name: None,
            created_at: None,
        }
    }

    fn ingredient(inci_name: &str, solves: Option<Vec<&str>>, notes: Option<&str>) -> Ingredient {
        Ingredient {
            id: 0,
            inci_name: inci_name.into(),
            alias_vi: None,
            description_vi: None,
            functions: None,
            risk_level: None,
            banned_in: None,
            typical_range: None,
            sources: None,
            solves: solves.map(|s| s.into_iter().map(String::from).collect()),
            notes: notes.map(String::from),
        }
    }

    fn product(id: i64, base_oily: f64, ingredients: Vec<Ingredient>) -> ProductDetail {
        let mut detail = ProductDetail::from_summary(summary(id, "p"));
        detail.skin_type_score = HashMap::from([(SkinType::Oily, base_oily)]);
        detail.ingredients = ingredients;
        detail
    }

    fn profile() -> UserProfile {
        UserProfile {
            user_id: 1,
            skin_type: SkinType::Oily,
            concerns: vec![],
            allergies: vec![],
            pregnant: false,
            goals: vec![],
        }
    }

    #[test]
    fn allergen_hit_nets_minus_ninety_and_is_excluded() {
        let mut profile = profile();
        profile.allergies = vec!["retinol".into()];
        let p = product(1, 10.0, vec![ingredient("Retinol", None, None)]);

        assert_eq!(score_product(&p, &profile), -90.0);
        assert!(rank_products(&[p], &profile).is_empty());
    }

    #[test]
    fn concern_match_scores_thirteen_and_ranks_below_eighteen() {
        let mut profile = profile();
        profile.concerns = vec!["Giảm mụn".into()];

        let lower = product(1, 10.0, vec![ingredient("Zinc PCA", Some(vec!["Giảm mụn"]), None)]);
        let higher = product(2, 15.0, vec![ingredient("Zinc PCA", Some(vec!["Giảm mụn"]), None)]);

        let ranked = rank_products(&[lower, higher], &profile);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id(), 2);
        assert_eq!(ranked[0].recommendation_score, Some(18.0));
        assert_eq!(ranked[1].id(), 1);
        assert_eq!(ranked[1].recommendation_score, Some(13.0));
    }

    #[test]
    fn pregnancy_unsafe_always_excluded() {
        let mut profile = profile();
        profile.pregnant = true;
        let p = product(
            1,
            50.0,
            vec![ingredient("Retinol", None, Some(PREGNANCY_UNSAFE))],
        );

        assert_eq!(score_product(&p, &profile), -150.0);
        assert!(rank_products(&[p], &profile).is_empty());
    }

    #[test]
    fn pregnancy_note_ignored_when_not_pregnant() {
        let p = product(
            1,
            7.0,
            vec![ingredient("Retinol", None, Some(PREGNANCY_UNSAFE))],
        );
        assert_eq!(score_product(&p, &profile()), 7.0);
    }

    #[test]
    fn tag_counted_once_across_matching_ingredients() {
        let mut profile = profile();
        profile.concerns = vec!["Giảm mụn".into()];
        let p = product(
            1,
            0.0,
            vec![
                ingredient("Zinc PCA", Some(vec!["Giảm mụn"]), None),
                ingredient("Niacinamide", Some(vec!["Giảm mụn"]), None),
            ],
        );
        assert_eq!(score_product(&p, &profile), 3.0);
    }

    #[test]
    fn goals_weigh_five_per_tag() {
        let mut profile = profile();
        profile.goals = vec!["Chống lão hóa".into(), "Thâm nám".into()];
        let p = product(
            1,
            2.0,
            vec![ingredient(
                "Retinol",
                Some(vec!["Chống lão hóa", "Thâm nám"]),
                None,
            )],
        );
        assert_eq!(score_product(&p, &profile), 12.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let a = product(1, 5.0, vec![]);
        let b = product(2, 5.0, vec![]);
        let c = product(3, 9.0, vec![]);
        let ranked = rank_products(&[a, b, c], &profile());
        let ids: Vec<i64> = ranked.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn missing_skin_type_entry_scores_zero_base() {
        let mut detail = ProductDetail::from_summary(summary(1, "p"));
        detail.skin_type_score = HashMap::from([(SkinType::Dry, 9.0)]);
        assert_eq!(score_product(&detail, &profile()), 0.0);
        // still included: 0 > -50
        assert_eq!(rank_products(std::slice::from_ref(&detail), &profile()).len(), 1);
    }
}
