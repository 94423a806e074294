use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Round half up: ties go toward positive infinity.
///
/// `f64::round` rounds half away from zero, which differs for negative ties.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place (half up).
#[inline]
pub fn round_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Macro-nutrient content, per 100 g unless produced by scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodNutrition {
    #[serde(default, deserialize_with = "lenient::number")]
    pub calories: f64,

    #[serde(default, deserialize_with = "lenient::number")]
    pub protein: f64,

    #[serde(default, deserialize_with = "lenient::number")]
    pub fat: f64,

    #[serde(default, deserialize_with = "lenient::number")]
    pub carbs: f64,

    #[serde(default, deserialize_with = "lenient::number")]
    pub fiber: f64,
}

impl FoodNutrition {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0);

    pub const fn new(calories: f64, protein: f64, fat: f64, carbs: f64, fiber: f64) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
            fiber,
        }
    }

    /// Multiply every field by `ratio`.
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            calories: self.calories * ratio,
            protein: self.protein * ratio,
            fat: self.fat * ratio,
            carbs: self.carbs * ratio,
            fiber: self.fiber * ratio,
        }
    }

    /// Calories to an integer, everything else to one decimal.
    pub fn rounded(&self) -> Self {
        Self {
            calories: round_half_up(self.calories),
            protein: round_tenth(self.protein),
            fat: round_tenth(self.fat),
            carbs: round_tenth(self.carbs),
            fiber: round_tenth(self.fiber),
        }
    }

    /// Protein + fat + carbs in grams.
    #[inline]
    pub fn macro_total(&self) -> f64 {
        self.protein + self.fat + self.carbs
    }
}

impl Add for FoodNutrition {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
            fiber: self.fiber + other.fiber,
        }
    }
}

impl AddAssign for FoodNutrition {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for FoodNutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_tenth(1.25), 1.3);
    }

    #[test]
    fn test_scaled_and_rounded() {
        let egg = FoodNutrition::new(155.0, 13.0, 11.0, 1.1, 0.0);
        let half = egg.scaled(0.5).rounded();
        assert_eq!(half.calories, 78.0);
        assert_eq!(half.protein, 6.5);
        assert_eq!(half.carbs, 0.6);
    }

    #[test]
    fn test_sum() {
        let a = FoodNutrition::new(10.0, 1.0, 1.0, 1.0, 1.0);
        let total: FoodNutrition = vec![a, a, a].into_iter().sum();
        assert_eq!(total.calories, 30.0);
        assert_eq!(total.macro_total(), 9.0);
    }

    #[test]
    fn test_lenient_fields() {
        let parsed: FoodNutrition =
            serde_json::from_str(r#"{"calories": "120", "protein": null, "fat": [1]}"#).unwrap();
        assert_eq!(parsed.calories, 120.0);
        assert_eq!(parsed.protein, 0.0);
        assert_eq!(parsed.fat, 0.0);
        assert_eq!(parsed.fiber, 0.0);
    }
}
