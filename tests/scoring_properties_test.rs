use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};

use recipe_ranker_rs::models::{EngagementStats, FoodNutrition, IngredientEntry};
use recipe_ranker_rs::scoring::{
    aggregate_nutrition, match_score, popularity_score, preference_score, PopularityOptions,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

const NO_FOODS: [&str; 0] = [];

#[test]
fn test_empty_recipe_is_trivially_satisfied() {
    for pantry in [vec!["鸡蛋"], vec!["鸡蛋", "牛肉", "葱"]] {
        let result = match_score(&pantry[..], &NO_FOODS);
        assert_eq!(result.score, 100.0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.match_ratio, 1.0);
    }
}

#[test]
fn test_empty_pantry_misses_everything() {
    let ingredients = ["鸡蛋 2个", "西红柿 1个", "盐"];
    let result = match_score(&NO_FOODS, &ingredients);

    assert_eq!(result.score, 0.0);
    assert!(result.matched.is_empty());
    assert_eq!(result.missing, ingredients);
    assert_eq!(result.match_ratio, 0.0);
}

#[test]
fn test_full_match_scores_100() {
    let result = match_score(&["鸡蛋", "西红柿"], &["鸡蛋 2个", "西红柿 1个"]);

    assert!(result.matched.contains(&"鸡蛋".to_string()));
    assert!(result.matched.contains(&"西红柿".to_string()));
    assert_eq!(result.match_ratio, 1.0);
    assert_eq!(result.score, 100.0);
}

#[test]
fn test_missing_key_ingredient_is_penalized() {
    let result = match_score(&["西红柿"], &["鸡肉 200g", "西红柿 1个"]);

    assert!(result.missing.contains(&"鸡肉".to_string()));
    assert_eq!(result.score, 35.0);
}

#[test]
fn test_aggregate_empty_is_zero() {
    assert_eq!(
        aggregate_nutrition(&[]),
        FoodNutrition {
            calories: 0.0,
            protein: 0.0,
            fat: 0.0,
            carbs: 0.0,
            fiber: 0.0,
        }
    );
}

#[test]
fn test_aggregate_scales_table_entry() {
    let nutrition = aggregate_nutrition(&[IngredientEntry::from("鸡蛋 200g")]);
    assert_eq!(nutrition.calories, 310.0);
}

#[test]
fn test_preference_neutral_without_tags() {
    let none: [&str; 0] = [];
    assert_eq!(preference_score(&none, &HashMap::new()), 50.0);
    assert_eq!(preference_score(&["低脂"], &HashMap::new()), 50.0);
}

#[test]
fn test_popularity_zero_counters_with_decay() {
    let stats = EngagementStats {
        create_time: Some(now()),
        ..Default::default()
    };
    let options = PopularityOptions {
        time_decay: true,
        ..Default::default()
    };
    assert_eq!(popularity_score(&stats, &options, now()), 0.0);
}
