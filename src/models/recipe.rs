use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::lenient;

/// One ingredient line of a recipe.
///
/// Either a free-form line such as `"鸡蛋 200g"` or a `{name, amount}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientEntry {
    Line(String),
    Portion {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<f64>,
    },
}

impl IngredientEntry {
    /// The text used for matching and quantity extraction.
    pub fn label(&self) -> &str {
        match self {
            IngredientEntry::Line(line) => line,
            IngredientEntry::Portion { name, .. } => name,
        }
    }

    /// Explicit gram amount, if one was given and is usable.
    pub fn explicit_amount(&self) -> Option<f64> {
        match self {
            IngredientEntry::Portion {
                amount: Some(amount),
                ..
            } if amount.is_finite() && *amount > 0.0 => Some(*amount),
            _ => None,
        }
    }

    /// Build an entry from an arbitrary JSON value; anything unusable is skipped.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(line) => Some(IngredientEntry::Line(line.clone())),
            Value::Object(map) => {
                let name = map.get("name")?.as_str()?.to_string();
                let amount = map.get("amount").and_then(lenient::value_as_number);
                Some(IngredientEntry::Portion { name, amount })
            }
            _ => None,
        }
    }
}

impl From<&str> for IngredientEntry {
    fn from(line: &str) -> Self {
        IngredientEntry::Line(line.to_string())
    }
}

impl From<String> for IngredientEntry {
    fn from(line: String) -> Self {
        IngredientEntry::Line(line)
    }
}

/// Cooking difficulty label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "简单")]
    Easy,
    #[serde(rename = "中等")]
    Medium,
    #[serde(rename = "困难")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a stored label. English names are accepted for the CLI.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "简单" => Some(Difficulty::Easy),
            "中等" => Some(Difficulty::Medium),
            "困难" => Some(Difficulty::Hard),
            other => match other.to_lowercase().as_str() {
                "easy" => Some(Difficulty::Easy),
                "medium" => Some(Difficulty::Medium),
                "hard" => Some(Difficulty::Hard),
                _ => None,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
        }
    }

    /// Ordinal level: 1 (easy) to 3 (hard).
    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::from_label(s).ok_or_else(|| format!("unknown difficulty '{}'", s))
    }
}

/// Engagement counters shared by recipes and community posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementStats {
    #[serde(default, deserialize_with = "lenient::count")]
    pub like_count: u64,

    #[serde(default, deserialize_with = "lenient::count")]
    pub collect_count: u64,

    #[serde(default, deserialize_with = "lenient::count")]
    pub comment_count: u64,

    #[serde(default, deserialize_with = "lenient::count")]
    pub view_count: u64,

    /// Missing creation time is treated as "just created" (no decay).
    #[serde(
        default,
        deserialize_with = "lenient::optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<DateTime<Utc>>,
}

/// A recipe drawn from the candidate query. Never mutated by scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCandidate {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::ingredient_list")]
    pub ingredients: Vec<IngredientEntry>,

    #[serde(default, deserialize_with = "lenient::tag_map")]
    pub tags: HashMap<String, bool>,

    /// Raw difficulty label as stored.
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<String>,

    #[serde(flatten)]
    pub stats: EngagementStats,
}

impl RecipeCandidate {
    /// Effective difficulty: a missing label means easy, an unknown one medium.
    pub fn difficulty(&self) -> Difficulty {
        match &self.difficulty {
            None => Difficulty::Easy,
            Some(label) => Difficulty::from_label(label).unwrap_or(Difficulty::Medium),
        }
    }

    /// Whether `tag` is explicitly set to true.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.get(tag).copied().unwrap_or(false)
    }

    pub fn ingredient_labels(&self) -> Vec<&str> {
        self.ingredients.iter().map(IngredientEntry::label).collect()
    }

    /// Name for display, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("(unnamed)")
    }
}

/// A community post ranked by the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Author of the post.
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::tag_map")]
    pub tags: HashMap<String, bool>,

    #[serde(flatten)]
    pub stats: EngagementStats,
}

impl CommunityPost {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.get(tag).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_levels() {
        assert_eq!(Difficulty::Easy.level(), 1);
        assert_eq!(Difficulty::Hard.level(), 3);
        assert_eq!(Difficulty::from_label("中等"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_label("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_label("expert"), None);
    }

    #[test]
    fn test_recipe_difficulty_defaults() {
        let mut recipe = RecipeCandidate::default();
        assert_eq!(recipe.difficulty(), Difficulty::Easy);

        recipe.difficulty = Some("???".to_string());
        assert_eq!(recipe.difficulty(), Difficulty::Medium);

        recipe.difficulty = Some("困难".to_string());
        assert_eq!(recipe.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_deserialize_well_formed_recipe() {
        let json = r#"{
            "_id": "r1",
            "name": "番茄炒蛋",
            "ingredients": ["鸡蛋 2个", {"name": "西红柿", "amount": 150}],
            "tags": {"quick": true, "lowFat": false},
            "difficulty": "简单",
            "likeCount": 4,
            "viewCount": 10,
            "createTime": "2024-03-01T08:00:00Z"
        }"#;

        let recipe: RecipeCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id.as_deref(), Some("r1"));
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1].explicit_amount(), Some(150.0));
        assert!(recipe.has_tag("quick"));
        assert!(!recipe.has_tag("lowFat"));
        assert_eq!(recipe.stats.like_count, 4);
        assert_eq!(recipe.stats.collect_count, 0);
        assert!(recipe.stats.create_time.is_some());
    }

    #[test]
    fn test_deserialize_malformed_recipe_degrades() {
        let json = r#"{
            "ingredients": "鸡蛋",
            "tags": ["quick"],
            "difficulty": 7,
            "likeCount": "many",
            "collectCount": -3,
            "createTime": null
        }"#;

        let recipe: RecipeCandidate = serde_json::from_str(json).unwrap();
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.difficulty(), Difficulty::Medium);
        assert_eq!(recipe.stats.like_count, 0);
        assert_eq!(recipe.stats.collect_count, 0);
        assert!(recipe.stats.create_time.is_none());
    }

    #[test]
    fn test_ingredient_entry_from_value_skips_junk() {
        let values = serde_json::json!(["葱", {"name": "姜"}, {"amount": 3}, 42, null]);
        let entries: Vec<IngredientEntry> = values
            .as_array()
            .unwrap()
            .iter()
            .filter_map(IngredientEntry::from_value)
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].label(), "姜");
        assert_eq!(entries[1].explicit_amount(), None);
    }
}
