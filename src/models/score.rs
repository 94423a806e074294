use serde::{Deserialize, Serialize};

use crate::models::nutrition::FoodNutrition;
use crate::models::recipe::RecipeCandidate;

/// Outcome of matching a pantry against a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 0 to 100.
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// 0.0 to 1.0.
    pub match_ratio: f64,
}

/// Per-recipe sub-scores plus the weighted total.
///
/// Every field is 0..=100 except `popularity`, which is unbounded unless a
/// saturating scale is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "match")]
    pub ingredient_match: f64,
    pub preference: f64,
    pub nutrition: f64,
    pub popularity: f64,
    pub difficulty: f64,
    pub total: f64,
}

/// A candidate with its computed scores, in ranked order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecipe<'a> {
    pub recipe: &'a RecipeCandidate,
    /// Index of the recipe in the candidate list.
    pub position: usize,
    pub scores: ScoreBreakdown,
    pub match_info: MatchResult,
    pub nutrition: FoodNutrition,
}
