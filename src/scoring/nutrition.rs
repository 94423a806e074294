use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::nutrition::{round_half_up, round_tenth};
use crate::models::{FoodNutrition, IngredientEntry};
use crate::scoring::constants::*;

/// A number followed by one or more unit characters, e.g. `200g`, `2个`, `1千克`.
static QUANTITY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[0-9]+[{}]+", UNIT_CHARS)).expect("valid quantity regex")
});

/// Captures the numeric part of the first quantity token.
static QUANTITY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("([0-9]+)[{}]", UNIT_CHARS)).expect("valid amount regex")
});

/// Extract the first embedded quantity, treated as grams.
///
/// The unit itself is not converted: `2个` yields 2.
pub fn parse_quantity(text: &str) -> Option<f64> {
    QUANTITY_AMOUNT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Remove every quantity token and surrounding whitespace.
pub fn strip_quantities(text: &str) -> String {
    QUANTITY_TOKEN.replace_all(text, "").trim().to_string()
}

/// Estimate nutrition for `amount_grams` of a named food.
///
/// Unknown foods use [`DEFAULT_NUTRITION`]. Calories are rounded to an
/// integer and the other fields to one decimal.
pub fn estimate_nutrition(name: &str, amount_grams: f64) -> FoodNutrition {
    let amount = if amount_grams.is_finite() && amount_grams >= 0.0 {
        amount_grams
    } else {
        DEFAULT_AMOUNT_GRAMS
    };

    let per_100g = table_nutrition(name).unwrap_or(DEFAULT_NUTRITION);
    per_100g.scaled(amount / 100.0).rounded()
}

/// Resolve the food name and gram amount of one ingredient entry.
pub fn entry_portion(entry: &IngredientEntry) -> (String, f64) {
    let label = entry.label();
    let amount = parse_quantity(label)
        .or_else(|| entry.explicit_amount())
        .unwrap_or(DEFAULT_AMOUNT_GRAMS);
    (strip_quantities(label), amount)
}

/// Total nutrition of an ingredient list. Empty input is all zeros.
pub fn aggregate_nutrition(ingredients: &[IngredientEntry]) -> FoodNutrition {
    ingredients
        .iter()
        .map(|entry| {
            let (name, amount) = entry_portion(entry);
            estimate_nutrition(&name, amount)
        })
        .sum::<FoodNutrition>()
        .rounded()
}

/// Daily targets for the balance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionTarget {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Default for NutritionTarget {
    fn default() -> Self {
        Self {
            calories: DEFAULT_TARGET_CALORIES,
            protein: DEFAULT_TARGET_PROTEIN,
            fat: DEFAULT_TARGET_FAT,
            carbs: DEFAULT_TARGET_CARBS,
        }
    }
}

impl NutritionTarget {
    /// Default macro targets with a custom calorie target.
    pub fn with_calories(calories: f64) -> Self {
        Self {
            calories,
            ..Default::default()
        }
    }
}

/// Share of macro grams, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Breakdown of the nutrition balance score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionScore {
    pub total_score: f64,
    pub calories_score: f64,
    pub protein_score: f64,
    pub fat_score: f64,
    pub carbs_score: f64,
    pub ratio_score: f64,
    pub ratios: MacroRatios,
}

/// 100 at the target, falling linearly to 0 at ±100% deviation.
pub fn closeness_score(actual: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (100.0 - (actual - target).abs() / target * 100.0).max(0.0)
}

/// Score how well a nutrition total fits daily targets.
///
/// Weighted: calories 30%, protein 25%, fat 15%, carbs 15%, macro ratio 15%.
pub fn nutrition_balance_score(nutrition: &FoodNutrition, target: &NutritionTarget) -> NutritionScore {
    let calories_score = closeness_score(nutrition.calories, target.calories);
    let protein_score = if target.protein > 0.0 {
        (nutrition.protein / target.protein * 100.0).min(100.0)
    } else {
        0.0
    };
    let fat_score = closeness_score(nutrition.fat, target.fat);
    let carbs_score = closeness_score(nutrition.carbs, target.carbs);

    let total_macro = nutrition.macro_total();
    let share = |grams: f64| {
        if total_macro > 0.0 {
            grams / total_macro * 100.0
        } else {
            0.0
        }
    };
    let protein_ratio = share(nutrition.protein);
    let fat_ratio = share(nutrition.fat);
    let carbs_ratio = share(nutrition.carbs);

    let ratio_score = (100.0 - (protein_ratio - IDEAL_PROTEIN_RATIO).abs() * 2.0) * 0.3
        + (100.0 - (fat_ratio - IDEAL_FAT_RATIO).abs() * 2.0) * 0.3
        + (100.0 - (carbs_ratio - IDEAL_CARBS_RATIO).abs() * 2.0) * 0.4;

    let total = calories_score * 0.3
        + protein_score * 0.25
        + fat_score * 0.15
        + carbs_score * 0.15
        + ratio_score * 0.15;

    NutritionScore {
        total_score: round_half_up(total),
        calories_score: round_half_up(calories_score),
        protein_score: round_half_up(protein_score),
        fat_score: round_half_up(fat_score),
        carbs_score: round_half_up(carbs_score),
        ratio_score: round_half_up(ratio_score),
        ratios: MacroRatios {
            protein: round_tenth(protein_ratio),
            fat: round_tenth(fat_ratio),
            carbs: round_tenth(carbs_ratio),
        },
    }
}

/// Intake relative to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakeStatus {
    #[serde(rename = "不足")]
    Insufficient,
    #[serde(rename = "正常")]
    Normal,
    #[serde(rename = "过量")]
    Excessive,
}

impl IntakeStatus {
    pub fn classify(value: f64, target: f64) -> Self {
        if value < target * INTAKE_LOW_RATIO {
            IntakeStatus::Insufficient
        } else if value > target * INTAKE_HIGH_RATIO {
            IntakeStatus::Excessive
        } else {
            IntakeStatus::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntakeStatus::Insufficient => "不足",
            IntakeStatus::Normal => "正常",
            IntakeStatus::Excessive => "过量",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientIntake {
    pub value: f64,
    pub target: f64,
    pub status: IntakeStatus,
}

impl NutrientIntake {
    fn new(value: f64, target: f64) -> Self {
        Self {
            value,
            target,
            status: IntakeStatus::classify(value, target),
        }
    }
}

/// Summary of a period's meals against daily targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeAnalysis {
    pub total: FoodNutrition,
    pub score: NutritionScore,
    pub calories: NutrientIntake,
    pub protein: NutrientIntake,
    pub fat: NutrientIntake,
    pub carbs: NutrientIntake,
}

/// Sum meal nutrition and grade each macro against the target.
pub fn analyze_intake(meals: &[FoodNutrition], target: &NutritionTarget) -> IntakeAnalysis {
    let total: FoodNutrition = meals.iter().copied().sum();
    let score = nutrition_balance_score(&total, target);

    IntakeAnalysis {
        total,
        score,
        calories: NutrientIntake::new(total.calories, target.calories),
        protein: NutrientIntake::new(total.protein, target.protein),
        fat: NutrientIntake::new(total.fat, target.fat),
        carbs: NutrientIntake::new(total.carbs, target.carbs),
    }
}
