use serde::{Deserialize, Serialize};

use crate::models::nutrition::round_half_up;
use crate::models::MatchResult;
use crate::scoring::constants::{
    canonical_ingredient, KEY_INGREDIENTS, MISSING_KEY_PENALTY, STRIPPED_PUNCTUATION,
};
use crate::scoring::nutrition::strip_quantities;

/// Strip quantity tokens and list punctuation from an ingredient name.
pub fn normalize_ingredient(name: &str) -> String {
    let without_quantities = strip_quantities(name);
    without_quantities
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Decides whether a pantry item covers a recipe ingredient.
///
/// Both names arrive already normalized.
pub trait IngredientMatcher {
    fn matches(&self, pantry_item: &str, ingredient: &str) -> bool;
}

/// Lenient matching: either name contains the other.
///
/// "鸡蛋" covers "鸡蛋 2个", but "豆" also covers both "豆腐" and "红豆".
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl IngredientMatcher for SubstringMatcher {
    fn matches(&self, pantry_item: &str, ingredient: &str) -> bool {
        pantry_item.contains(ingredient) || ingredient.contains(pantry_item)
    }
}

/// Equality after synonym resolution ("番茄" == "西红柿").
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictMatcher;

impl IngredientMatcher for StrictMatcher {
    fn matches(&self, pantry_item: &str, ingredient: &str) -> bool {
        canonical_ingredient(pantry_item) == canonical_ingredient(ingredient)
    }
}

/// Configurable choice of matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    #[default]
    Substring,
    Strict,
}

impl MatcherKind {
    pub fn matcher(&self) -> &'static dyn IngredientMatcher {
        match self {
            MatcherKind::Substring => &SubstringMatcher,
            MatcherKind::Strict => &StrictMatcher,
        }
    }
}

/// Score how well the pantry covers a recipe, using substring matching.
pub fn match_score<U, R>(user_foods: &[U], recipe_ingredients: &[R]) -> MatchResult
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    match_score_with(&SubstringMatcher, user_foods, recipe_ingredients)
}

/// Score pantry coverage with a specific matcher.
///
/// Score is the matched fraction times 100, cut to 70% when any missing
/// ingredient is a staple (meat, fish, chicken, egg, tofu, rice, noodles).
pub fn match_score_with<U, R>(
    matcher: &dyn IngredientMatcher,
    user_foods: &[U],
    recipe_ingredients: &[R],
) -> MatchResult
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    if user_foods.is_empty() {
        return MatchResult {
            score: 0.0,
            matched: Vec::new(),
            missing: recipe_ingredients
                .iter()
                .map(|i| i.as_ref().to_string())
                .collect(),
            match_ratio: 0.0,
        };
    }

    if recipe_ingredients.is_empty() {
        return MatchResult {
            score: 100.0,
            matched: Vec::new(),
            missing: Vec::new(),
            match_ratio: 1.0,
        };
    }

    // A pantry entry that is only a quantity would otherwise match everything.
    let pantry: Vec<String> = user_foods
        .iter()
        .map(|f| normalize_ingredient(f.as_ref()))
        .filter(|f| !f.is_empty())
        .collect();

    let (matched, missing): (Vec<String>, Vec<String>) = recipe_ingredients
        .iter()
        .map(|i| normalize_ingredient(i.as_ref()))
        .partition(|ingredient| pantry.iter().any(|item| matcher.matches(item, ingredient)));

    let match_ratio = matched.len() as f64 / recipe_ingredients.len() as f64;
    let mut score = match_ratio * 100.0;

    let missing_key = missing
        .iter()
        .any(|ingredient| KEY_INGREDIENTS.iter().any(|key| ingredient.contains(key)));
    if missing_key {
        score *= MISSING_KEY_PENALTY;
    }

    MatchResult {
        score: round_half_up(score),
        matched,
        missing,
        match_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_normalize_ingredient() {
        assert_eq!(normalize_ingredient("鸡蛋 2个"), "鸡蛋");
        assert_eq!(normalize_ingredient("葱、姜，"), "葱姜");
        assert_eq!(normalize_ingredient("米饭 200g。"), "米饭");
    }

    #[test]
    fn test_empty_pantry() {
        let result = match_score(&NONE, &["鸡蛋 2个", "葱"]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.match_ratio, 0.0);
        assert!(result.matched.is_empty());
        assert_eq!(result.missing, vec!["鸡蛋 2个", "葱"]);
    }

    #[test]
    fn test_empty_recipe() {
        let result = match_score(&["鸡蛋"], &NONE);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.match_ratio, 1.0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_full_match() {
        let result = match_score(&["鸡蛋", "西红柿"], &["鸡蛋 2个", "西红柿 1个"]);
        assert_eq!(result.matched, vec!["鸡蛋", "西红柿"]);
        assert_eq!(result.match_ratio, 1.0);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_missing_key_ingredient_penalty() {
        let result = match_score(&["西红柿"], &["鸡肉 200g", "西红柿 1个"]);
        assert_eq!(result.missing, vec!["鸡肉"]);
        assert_eq!(result.match_ratio, 0.5);
        assert_eq!(result.score, 35.0);
    }

    #[test]
    fn test_missing_non_key_ingredient_no_penalty() {
        let result = match_score(&["鸡蛋"], &["鸡蛋", "葱"]);
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn test_substring_is_bidirectional() {
        assert!(SubstringMatcher.matches("豆", "豆腐"));
        assert!(SubstringMatcher.matches("红豆沙", "红豆"));
        assert!(!SubstringMatcher.matches("土豆", "豆腐"));
    }

    #[test]
    fn test_quantity_only_pantry_entry_ignored() {
        let result = match_score(&["200g"], &["葱", "姜"]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.missing.len(), 2);
    }

    #[test]
    fn test_strict_matcher_uses_synonyms() {
        let strict = MatcherKind::Strict.matcher();
        let result = match_score_with(strict, &["番茄", "豆"], &["西红柿 2个", "豆腐"]);
        assert_eq!(result.matched, vec!["西红柿"]);
        assert_eq!(result.missing, vec!["豆腐"]);
        assert_eq!(result.score, 35.0);
    }
}
