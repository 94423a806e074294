use crate::models::{FoodNutrition, RankedRecipe};
use crate::scoring::{NutritionScore, ScoredPost};

/// Display ranked recipes in a formatted table.
pub fn display_ranking(ranked: &[RankedRecipe<'_>]) {
    if ranked.is_empty() {
        println!("No recommendations (no candidates to rank).");
        return;
    }

    println!();
    println!("=== Recommendations ===");
    println!();

    let max_name_len = ranked
        .iter()
        .map(|r| r.recipe.display_name().chars().count())
        .max()
        .unwrap_or(10);

    for (i, item) in ranked.iter().enumerate() {
        let s = &item.scores;
        println!(
            "{:>3}. {:<width$}  total {:>3.0} | match {:>3.0} pref {:>3.0} nutr {:>3.0} pop {:>4.0} diff {:>3.0}",
            i + 1,
            item.recipe.display_name(),
            s.total,
            s.ingredient_match,
            s.preference,
            s.nutrition,
            s.popularity,
            s.difficulty,
            width = max_name_len
        );

        if !item.match_info.missing.is_empty() {
            println!("       missing: {}", item.match_info.missing.join(", "));
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Recipes shown: {}", ranked.len());
    if let Some(best) = ranked.first() {
        println!(
            "Top pick: {} ({:.0} kcal)",
            best.recipe.display_name(),
            best.nutrition.calories
        );
    }
    println!();
}

/// Display aggregated nutrition and its balance score.
pub fn display_nutrition(nutrition: &FoodNutrition, score: &NutritionScore) {
    println!();
    println!("=== Nutrition ===");
    println!();
    println!("  Calories: {:.0} kcal", nutrition.calories);
    println!("  Protein:  {:.1} g", nutrition.protein);
    println!("  Fat:      {:.1} g", nutrition.fat);
    println!("  Carbs:    {:.1} g", nutrition.carbs);
    println!("  Fiber:    {:.1} g", nutrition.fiber);
    println!();
    println!(
        "  Macro split: protein {:.1}% / fat {:.1}% / carbs {:.1}%",
        score.ratios.protein, score.ratios.fat, score.ratios.carbs
    );
    println!(
        "  Balance score: {:.0} (calories {:.0}, protein {:.0}, fat {:.0}, carbs {:.0}, ratio {:.0})",
        score.total_score,
        score.calories_score,
        score.protein_score,
        score.fat_score,
        score.carbs_score,
        score.ratio_score
    );
    println!();
}

/// Display a community feed.
pub fn display_feed(feed: &[ScoredPost<'_>], title: &str) {
    if feed.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} posts) ===", title, feed.len());
    println!();

    for (i, item) in feed.iter().enumerate() {
        let stats = &item.post.stats;
        println!(
            "{:>3}. {} by {} - score {:.1} ({} likes, {} collects, {} comments, {} views)",
            i + 1,
            item.post.id.as_deref().unwrap_or("(no id)"),
            item.post.user_id.as_deref().unwrap_or("(anonymous)"),
            item.score,
            stats.like_count,
            stats.collect_count,
            stats.comment_count,
            stats.view_count
        );
    }

    println!();
}
