use serde::{Deserialize, Serialize};

use crate::models::lenient;
use crate::models::recipe::Difficulty;
use crate::scoring::constants::DEFAULT_TARGET_CALORIES;

fn default_target_calories() -> f64 {
    DEFAULT_TARGET_CALORIES
}

/// A user's dietary profile, supplied per scoring run.
///
/// Absent fields default to no preferences, a 2000 kcal target, and easy
/// cooking difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub preferences: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub dietary_restrictions: Vec<String>,

    #[serde(
        default = "default_target_calories",
        deserialize_with = "lenient::target_calories"
    )]
    pub target_calories: f64,

    #[serde(default, deserialize_with = "lenient::difficulty")]
    pub cooking_difficulty: Difficulty,

    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_calories: Option<f64>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub food_categories: Vec<String>,

    /// Post ids the user already liked; excluded from the personalized feed.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub liked_posts: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub viewed_posts: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            preferences: Vec::new(),
            dietary_restrictions: Vec::new(),
            target_calories: DEFAULT_TARGET_CALORIES,
            cooking_difficulty: Difficulty::Easy,
            average_calories: None,
            food_categories: Vec::new(),
            liked_posts: Vec::new(),
            viewed_posts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_defaults() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.target_calories, 2000.0);
        assert_eq!(profile.cooking_difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_bad_fields_fall_back() {
        let json = r#"{
            "preferences": ["低脂", 3, null, "快手"],
            "targetCalories": 0,
            "cookingDifficulty": "legendary"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.preferences, vec!["低脂", "快手"]);
        assert_eq!(profile.target_calories, 2000.0);
        assert_eq!(profile.cooking_difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_round_trip_keeps_fields() {
        let profile = UserProfile {
            preferences: vec!["高蛋白".to_string()],
            target_calories: 1800.0,
            cooking_difficulty: Difficulty::Medium,
            ..Default::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
