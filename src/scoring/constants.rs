use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::FoodNutrition;

/// Daily calorie target when the profile has none.
pub const DEFAULT_TARGET_CALORIES: f64 = 2000.0;

/// Gram amount assumed when an ingredient carries no quantity.
pub const DEFAULT_AMOUNT_GRAMS: f64 = 100.0;

/// Nutrition per 100 g for foods missing from the table.
pub const DEFAULT_NUTRITION: FoodNutrition = FoodNutrition::new(50.0, 2.0, 1.0, 10.0, 1.0);

/// Characters that may follow a number to form a quantity token
/// (g, 克, ml, 毫升, 个, 根, 片, 块, 条, 只, 斤, 两, kg, 千克).
/// A literal `|` is not a unit, so `200|` is left in the name.
pub const UNIT_CHARS: &str = "gml克毫升个根片块条只斤两k千";

/// Punctuation stripped from ingredient names before matching.
pub const STRIPPED_PUNCTUATION: [char; 4] = ['，', ',', '。', '、'];

/// Staple substrings whose absence from the pantry costs the match score.
pub const KEY_INGREDIENTS: [&str; 7] = ["肉", "鱼", "鸡", "蛋", "豆腐", "米饭", "面"];

/// Match score multiplier when a key ingredient is missing.
pub const MISSING_KEY_PENALTY: f64 = 0.7;

/// Neutral preference score (no preferences or nothing recognised).
pub const NEUTRAL_PREFERENCE_SCORE: f64 = 50.0;

/// Per-preference score when the recipe lacks the tag.
pub const UNMATCHED_PREFERENCE_SCORE: f64 = 30.0;

/// Per-preference score when the recipe has the tag.
pub const MATCHED_PREFERENCE_SCORE: f64 = 100.0;

/// Difficulty score lost per level of difference.
pub const DIFFICULTY_STEP_PENALTY: f64 = 30.0;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

// ─────────────────────────────────────────────────────────────────────────────
// Balance score targets (per day)
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_TARGET_PROTEIN: f64 = 60.0;
pub const DEFAULT_TARGET_FAT: f64 = 65.0;
pub const DEFAULT_TARGET_CARBS: f64 = 300.0;

/// Ideal share of macro grams, in percent.
pub const IDEAL_PROTEIN_RATIO: f64 = 17.5;
pub const IDEAL_FAT_RATIO: f64 = 25.0;
pub const IDEAL_CARBS_RATIO: f64 = 57.5;

/// Intake below this share of target is "不足", above the upper one "过量".
pub const INTAKE_LOW_RATIO: f64 = 0.8;
pub const INTAKE_HIGH_RATIO: f64 = 1.2;

// ─────────────────────────────────────────────────────────────────────────────
// Community feed
// ─────────────────────────────────────────────────────────────────────────────

pub const FEED_TAG_BONUS: f64 = 20.0;
pub const FEED_POPULARITY_FACTOR: f64 = 0.1;
pub const FEED_FRESH_DAY_BONUS: f64 = 30.0;
pub const FEED_FRESH_WEEK_BONUS: f64 = 10.0;
pub const FEED_MAX_POSTS_PER_AUTHOR: usize = 3;

/// Numeric similarity features are divided by this before comparison.
pub const SIMILARITY_NUMERIC_SCALE: f64 = 3000.0;

/// Nutrition per 100 g for common foods.
pub static NUTRITION_TABLE: LazyLock<HashMap<&'static str, FoodNutrition>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert("西红柿", FoodNutrition::new(18.0, 0.9, 0.2, 3.5, 1.2));
        m.insert("苹果", FoodNutrition::new(52.0, 0.3, 0.2, 13.8, 2.4));
        m.insert("鸡蛋", FoodNutrition::new(155.0, 13.0, 11.0, 1.1, 0.0));
        m.insert("土豆", FoodNutrition::new(77.0, 2.0, 0.1, 17.0, 2.2));
        m.insert("胡萝卜", FoodNutrition::new(41.0, 0.9, 0.2, 9.6, 2.8));
        m.insert("米饭", FoodNutrition::new(130.0, 2.6, 0.3, 28.0, 0.3));
        m.insert("面条", FoodNutrition::new(138.0, 4.2, 0.7, 28.0, 1.2));
        m.insert("鸡肉", FoodNutrition::new(165.0, 31.0, 3.6, 0.0, 0.0));
        m.insert("猪肉", FoodNutrition::new(242.0, 27.0, 14.0, 0.0, 0.0));
        m.insert("牛肉", FoodNutrition::new(250.0, 26.0, 15.0, 0.0, 0.0));
        m.insert("鱼", FoodNutrition::new(206.0, 22.0, 12.0, 0.0, 0.0));
        m.insert("豆腐", FoodNutrition::new(81.0, 8.1, 3.7, 4.2, 0.4));
        m.insert("青菜", FoodNutrition::new(15.0, 1.5, 0.2, 2.4, 1.1));
        m
    });

/// A dietary preference and the recipe tag that satisfies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceRule {
    pub tag: &'static str,
    pub weight: f64,
}

/// Preference name to recipe tag and importance weight.
pub static PREFERENCE_RULES: LazyLock<HashMap<&'static str, PreferenceRule>> =
    LazyLock::new(|| {
        let rule = |tag, weight| PreferenceRule { tag, weight };
        let mut m = HashMap::new();
        m.insert("低脂", rule("lowFat", 1.5));
        m.insert("快手", rule("quick", 1.2));
        m.insert("高蛋白", rule("highProtein", 1.3));
        m.insert("素食", rule("vegetarian", 1.5));
        m.insert("无麸质", rule("glutenFree", 1.2));
        m.insert("低糖", rule("lowSugar", 1.2));
        m.insert("高纤维", rule("highFiber", 1.1));
        m
    });

/// Ingredient names the strict matcher treats as the same food.
pub static INGREDIENT_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert("番茄", "西红柿");
        m.insert("马铃薯", "土豆");
        m.insert("洋芋", "土豆");
        m.insert("鸡子", "鸡蛋");
        m.insert("白饭", "米饭");
        m.insert("大米饭", "米饭");
        m.insert("小白菜", "青菜");
        m.insert("红萝卜", "胡萝卜");
        m
    });

/// Look up the nutrition table entry for an exact food name.
pub fn table_nutrition(name: &str) -> Option<FoodNutrition> {
    NUTRITION_TABLE.get(name).copied()
}

/// Look up the preference rule for a preference name.
pub fn preference_rule(name: &str) -> Option<PreferenceRule> {
    PREFERENCE_RULES.get(name).copied()
}

/// Resolve a synonym to its canonical ingredient name.
pub fn canonical_ingredient(name: &str) -> &str {
    INGREDIENT_SYNONYMS.get(name).copied().unwrap_or(name)
}
