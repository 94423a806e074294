use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::nutrition::round_half_up;
use crate::models::{
    Difficulty, FoodNutrition, MatchResult, RankedRecipe, RecipeCandidate, ScoreBreakdown,
    UserProfile,
};
use crate::scoring::constants::DIFFICULTY_STEP_PENALTY;
use crate::scoring::matching::{match_score_with, MatcherKind};
use crate::scoring::nutrition::{
    aggregate_nutrition, closeness_score, nutrition_balance_score, NutritionTarget,
};
use crate::scoring::popularity::{popularity_score, PopularityOptions, PopularityScale};
use crate::scoring::preference::preference_score;

/// Weights of the composite score. Non-negative weights keep it monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreWeights {
    pub match_weight: f64,
    pub preference_weight: f64,
    pub nutrition_weight: f64,
    pub popularity_weight: f64,
    pub difficulty_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            match_weight: 0.3,
            preference_weight: 0.25,
            nutrition_weight: 0.2,
            popularity_weight: 0.15,
            difficulty_weight: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Pantry-driven recommendation: no popularity term, more weight on
    /// ingredient match and difficulty.
    pub fn pantry() -> Self {
        Self {
            match_weight: 0.35,
            preference_weight: 0.25,
            nutrition_weight: 0.2,
            popularity_weight: 0.0,
            difficulty_weight: 0.2,
        }
    }
}

/// Inputs to [`total_score`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubScores {
    pub ingredient_match: f64,
    pub preference: f64,
    pub nutrition: f64,
    pub popularity: f64,
    pub difficulty: f64,
}

/// Weighted sum of sub-scores, rounded to the nearest integer. Not clamped.
pub fn total_score(scores: &SubScores, weights: &ScoreWeights) -> f64 {
    round_half_up(
        scores.ingredient_match * weights.match_weight
            + scores.preference * weights.preference_weight
            + scores.nutrition * weights.nutrition_weight
            + scores.popularity * weights.popularity_weight
            + scores.difficulty * weights.difficulty_weight,
    )
}

/// 100 when the recipe matches the preferred difficulty, minus 30 per level apart.
pub fn difficulty_fit(recipe: Difficulty, preferred: Difficulty) -> f64 {
    let diff = (recipe.level() as f64 - preferred.level() as f64).abs();
    (100.0 - DIFFICULTY_STEP_PENALTY * diff).max(0.0)
}

/// Symmetric percentage closeness of recipe calories to the target.
pub fn calorie_fit_score(actual: f64, target: f64) -> f64 {
    round_half_up(closeness_score(actual, target))
}

/// Which formula produces the nutrition sub-score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NutritionMode {
    /// Calorie closeness only.
    #[default]
    CalorieFit,
    /// Full macro balance score against daily targets.
    Balanced,
}

/// Knobs for a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingConfig {
    pub weights: ScoreWeights,
    pub popularity: PopularityOptions,
    pub popularity_scale: PopularityScale,
    pub nutrition_mode: NutritionMode,
    pub matcher: MatcherKind,
    /// Maximum number of ranked results.
    pub limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            popularity: PopularityOptions::default(),
            popularity_scale: PopularityScale::Raw,
            nutrition_mode: NutritionMode::CalorieFit,
            matcher: MatcherKind::Substring,
            limit: 10,
        }
    }
}

impl RankingConfig {
    pub fn pantry() -> Self {
        Self {
            weights: ScoreWeights::pantry(),
            ..Default::default()
        }
    }
}

/// Compute every sub-score for one recipe.
pub fn score_recipe<S: AsRef<str>>(
    recipe: &RecipeCandidate,
    user_foods: &[S],
    profile: &UserProfile,
    config: &RankingConfig,
    now: DateTime<Utc>,
) -> (ScoreBreakdown, MatchResult, FoodNutrition) {
    let match_info = match_score_with(
        config.matcher.matcher(),
        user_foods,
        &recipe.ingredient_labels(),
    );

    let preference = preference_score(&profile.preferences, &recipe.tags);

    let nutrition = aggregate_nutrition(&recipe.ingredients);
    let nutrition_score = match config.nutrition_mode {
        NutritionMode::CalorieFit => calorie_fit_score(nutrition.calories, profile.target_calories),
        NutritionMode::Balanced => {
            let target = NutritionTarget::with_calories(profile.target_calories);
            nutrition_balance_score(&nutrition, &target).total_score
        }
    };

    let raw_popularity = popularity_score(&recipe.stats, &config.popularity, now);
    let popularity = config.popularity_scale.apply(raw_popularity);

    let difficulty = difficulty_fit(recipe.difficulty(), profile.cooking_difficulty);

    let sub_scores = SubScores {
        ingredient_match: match_info.score,
        preference,
        nutrition: nutrition_score,
        popularity,
        difficulty,
    };

    let breakdown = ScoreBreakdown {
        ingredient_match: match_info.score,
        preference,
        nutrition: nutrition_score,
        popularity,
        difficulty,
        total: total_score(&sub_scores, &config.weights),
    };

    (breakdown, match_info, nutrition)
}

/// Score and order candidates, best first, keeping at most `config.limit`.
///
/// The sort is stable: equal totals keep their candidate order.
pub fn rank_recipes<'a, S: AsRef<str>>(
    candidates: &'a [RecipeCandidate],
    user_foods: &[S],
    profile: &UserProfile,
    config: &RankingConfig,
    now: DateTime<Utc>,
) -> Vec<RankedRecipe<'a>> {
    let mut ranked: Vec<RankedRecipe<'a>> = candidates
        .iter()
        .enumerate()
        .map(|(position, recipe)| {
            let (scores, match_info, nutrition) =
                score_recipe(recipe, user_foods, profile, config, now);
            debug!(
                recipe = recipe.display_name(),
                total = scores.total,
                matched = match_info.matched.len(),
                missing = match_info.missing.len(),
                "scored candidate"
            );
            RankedRecipe {
                recipe,
                position,
                scores,
                match_info,
                nutrition,
            }
        })
        .collect();

    // Higher is better, so reverse the comparison
    ranked.sort_by(|a, b| {
        b.scores
            .total
            .partial_cmp(&a.scores.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(config.limit);

    debug!(
        candidates = candidates.len(),
        returned = ranked.len(),
        "ranked recipes"
    );

    ranked
}

/// Keep candidates with at least one of `tags` set. An empty tag list keeps all.
pub fn filter_by_tags<'a, S: AsRef<str>>(
    candidates: &'a [RecipeCandidate],
    tags: &[S],
) -> Vec<&'a RecipeCandidate> {
    candidates
        .iter()
        .filter(|recipe| tags.is_empty() || tags.iter().any(|tag| recipe.has_tag(tag.as_ref())))
        .collect()
}
