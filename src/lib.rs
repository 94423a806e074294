pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod scoring;
pub mod state;

pub use error::{RankError, Result};
pub use models::{
    CommunityPost, Difficulty, EngagementStats, FoodNutrition, IngredientEntry, MatchResult,
    RankedRecipe, RecipeCandidate, ScoreBreakdown, UserProfile,
};
