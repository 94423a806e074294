pub mod prompts;
pub mod render;

pub use prompts::{
    collect_user_profile, prompt_difficulty, prompt_preferences, prompt_target_calories,
    prompt_yes_no,
};
pub use render::{display_feed, display_nutrition, display_ranking};
