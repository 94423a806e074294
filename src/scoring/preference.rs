use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::models::nutrition::round_half_up;
use crate::scoring::constants::{
    preference_rule, MATCHED_PREFERENCE_SCORE, NEUTRAL_PREFERENCE_SCORE, PREFERENCE_RULES,
    UNMATCHED_PREFERENCE_SCORE,
};

/// Minimum similarity for a typed preference to resolve to a known one.
pub const PREFERENCE_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Score how well a recipe's tags satisfy the user's preferences.
///
/// Each recognised preference contributes 100 (tag set) or 30 (tag missing),
/// weighted by its importance. Unknown preferences are skipped. With no
/// preferences, no tags, or nothing recognised the score is a neutral 50.
pub fn preference_score<S: AsRef<str>>(user_preferences: &[S], recipe_tags: &HashMap<String, bool>) -> f64 {
    // Non-boolean tag values are dropped on load, so an all-junk tag object
    // lands here as tagless and scores neutral.
    if user_preferences.is_empty() || recipe_tags.is_empty() {
        return NEUTRAL_PREFERENCE_SCORE;
    }

    let (total_score, total_weight) = user_preferences
        .iter()
        .filter_map(|pref| preference_rule(pref.as_ref()))
        .fold((0.0, 0.0), |(score, weight), rule| {
            let has_tag = recipe_tags.get(rule.tag).copied().unwrap_or(false);
            let base = if has_tag {
                MATCHED_PREFERENCE_SCORE
            } else {
                UNMATCHED_PREFERENCE_SCORE
            };
            (score + base * rule.weight, weight + rule.weight)
        });

    if total_weight == 0.0 {
        return NEUTRAL_PREFERENCE_SCORE;
    }

    round_half_up(total_score / total_weight)
}

/// All preference names the scorer recognises, sorted.
pub fn known_preferences() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PREFERENCE_RULES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Resolve a typed preference name to a known one.
///
/// Exact names win; otherwise the closest name above
/// [`PREFERENCE_SIMILARITY_THRESHOLD`] is returned.
pub fn resolve_preference(input: &str) -> Option<&'static str> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some((name, _)) = PREFERENCE_RULES.get_key_value(input) {
        return Some(*name);
    }

    PREFERENCE_RULES
        .keys()
        .map(|name| (*name, jaro_winkler(name, input)))
        .filter(|(_, score)| *score > PREFERENCE_SIMILARITY_THRESHOLD)
        .max_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(a.0))
        })
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, bool)]) -> HashMap<String, bool> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    const NONE: [&str; 0] = [];

    #[test]
    fn test_neutral_cases() {
        assert_eq!(preference_score(&NONE, &HashMap::new()), 50.0);
        assert_eq!(preference_score(&["低脂"], &HashMap::new()), 50.0);
        assert_eq!(preference_score(&NONE, &tags(&[("lowFat", true)])), 50.0);
    }

    #[test]
    fn test_unknown_preferences_skipped() {
        let recipe = tags(&[("quick", true)]);
        assert_eq!(preference_score(&["辣", "甜"], &recipe), 50.0);
        assert_eq!(preference_score(&["辣", "快手"], &recipe), 100.0);
    }

    #[test]
    fn test_weighted_average() {
        let recipe = tags(&[("lowFat", true), ("quick", false)]);
        // (100*1.5 + 30*1.2) / 2.7 = 68.9
        assert_eq!(preference_score(&["低脂", "快手"], &recipe), 69.0);
    }

    #[test]
    fn test_all_unmatched() {
        let recipe = tags(&[("spicy", true)]);
        assert_eq!(preference_score(&["素食"], &recipe), 30.0);
    }

    #[test]
    fn test_resolve_preference() {
        assert_eq!(resolve_preference("低脂"), Some("低脂"));
        assert_eq!(resolve_preference(" 高蛋白 "), Some("高蛋白"));
        assert_eq!(resolve_preference(""), None);
        assert_eq!(resolve_preference("xyz"), None);
    }

    #[test]
    fn test_known_preferences() {
        let known = known_preferences();
        assert_eq!(known.len(), 7);
        assert!(known.contains(&"无麸质"));
    }

    #[test]
    fn test_non_boolean_tags_score_neutral() {
        let recipe: crate::models::RecipeCandidate =
            serde_json::from_str(r#"{"tags": {"lowFat": "true"}}"#).unwrap();
        assert!(recipe.tags.is_empty());
        assert_eq!(preference_score(&["低脂"], &recipe.tags), 50.0);
    }
}
