pub(crate) mod lenient;
pub mod nutrition;
pub mod profile;
pub mod recipe;
pub mod score;

pub use nutrition::FoodNutrition;
pub use profile::UserProfile;
pub use recipe::{CommunityPost, Difficulty, EngagementStats, IngredientEntry, RecipeCandidate};
pub use score::{MatchResult, RankedRecipe, ScoreBreakdown};
