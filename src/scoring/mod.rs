pub mod constants;
pub mod feed;
pub mod matching;
pub mod nutrition;
pub mod popularity;
pub mod preference;
pub mod ranking;
pub mod similarity;

pub use feed::{hot_posts, personalized_feed, personalized_score, ScoredPost};
pub use matching::{
    match_score, match_score_with, normalize_ingredient, IngredientMatcher, MatcherKind,
    StrictMatcher, SubstringMatcher,
};
pub use nutrition::{
    aggregate_nutrition, analyze_intake, estimate_nutrition, nutrition_balance_score,
    IntakeAnalysis, IntakeStatus, NutritionScore, NutritionTarget,
};
pub use popularity::{popularity_score, PopularityOptions, PopularityScale, PopularityWeights};
pub use preference::{known_preferences, preference_score, resolve_preference};
pub use ranking::{
    calorie_fit_score, difficulty_fit, filter_by_tags, rank_recipes, score_recipe, total_score,
    NutritionMode, RankingConfig, ScoreWeights, SubScores,
};
pub use similarity::{cosine_similarity, user_similarity};
