use std::collections::HashSet;

use crate::models::UserProfile;
use crate::scoring::constants::SIMILARITY_NUMERIC_SCALE;

/// Cosine of the angle between two vectors.
///
/// Returns 0 for vectors of different length or with zero norm.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Items of `a` found in `b` over the size of their union.
fn overlap(a: &[String], b: &[String]) -> f64 {
    let intersection = a.iter().filter(|x| b.contains(x)).count();
    let union: HashSet<&String> = a.iter().chain(b).collect();
    if union.is_empty() {
        0.0
    } else {
        intersection as f64 / union.len() as f64
    }
}

/// Similarity of two user profiles in 0..=1.
///
/// List features (preferences, restrictions, food categories) contribute
/// their overlap against an ideal of 1; average calories contribute
/// `calories / 3000` on both sides, 0 when unknown. Cooking difficulty is
/// a label and carries no weight.
pub fn user_similarity(a: &UserProfile, b: &UserProfile) -> f64 {
    let mut vector_a = Vec::with_capacity(4);
    let mut vector_b = Vec::with_capacity(4);

    for (list_a, list_b) in [
        (&a.preferences, &b.preferences),
        (&a.dietary_restrictions, &b.dietary_restrictions),
    ] {
        vector_a.push(overlap(list_a, list_b));
        vector_b.push(1.0);
    }

    vector_a.push(a.average_calories.unwrap_or(0.0) / SIMILARITY_NUMERIC_SCALE);
    vector_b.push(b.average_calories.unwrap_or(0.0) / SIMILARITY_NUMERIC_SCALE);

    vector_a.push(overlap(&a.food_categories, &b.food_categories));
    vector_b.push(1.0);

    cosine_similarity(&vector_a, &vector_b)
}
