use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{RankError, Result};
use crate::models::{Difficulty, UserProfile};
use crate::scoring::constants::DEFAULT_TARGET_CALORIES;
use crate::scoring::{known_preferences, resolve_preference};

/// Prompt for the daily calorie target.
pub fn prompt_target_calories() -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("What is your daily calorie target?")
        .default(format!("{:.0}", DEFAULT_TARGET_CALORIES))
        .interact_text()?;

    let target: f64 = input
        .trim()
        .parse()
        .map_err(|_| RankError::InvalidInput("Invalid number".to_string()))?;

    if !target.is_finite() || target <= 0.0 {
        return Err(RankError::InvalidInput(
            "Calorie target must be positive".to_string(),
        ));
    }

    Ok(target)
}

/// Prompt for the preferred cooking difficulty.
pub fn prompt_difficulty() -> Result<Difficulty> {
    let options: Vec<&str> = Difficulty::ALL.iter().map(Difficulty::label).collect();

    let selection = Select::new()
        .with_prompt("How hard should recipes be?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(Difficulty::ALL
        .get(selection)
        .copied()
        .unwrap_or_default())
}

/// Prompt for dietary preferences.
///
/// Known preferences are offered as a multi-select; extra names can be
/// typed and are fuzzy-matched against the known list.
pub fn prompt_preferences() -> Result<Vec<String>> {
    let known = known_preferences();

    let picked = MultiSelect::new()
        .with_prompt("Select your dietary preferences (space to toggle)")
        .items(&known)
        .interact()?;

    let mut preferences: Vec<String> = picked.into_iter().map(|i| known[i].to_string()).collect();

    loop {
        let input: String = Input::new()
            .with_prompt("Add another preference (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        match resolve_preference(input) {
            Some(name) if name == input => {
                push_unique(&mut preferences, name);
                println!("Added: {}", name);
            }
            Some(name) => {
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{}'?", name))
                    .default(true)
                    .interact()?;
                if confirm {
                    push_unique(&mut preferences, name);
                    println!("Added: {}", name);
                }
            }
            None => println!("Unknown preference '{}' (it would not affect scoring)", input),
        }
    }

    Ok(preferences)
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|p| p == name) {
        list.push(name.to_string());
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect a complete user profile interactively.
pub fn collect_user_profile() -> Result<UserProfile> {
    let preferences = prompt_preferences()?;
    let target_calories = prompt_target_calories()?;
    let cooking_difficulty = prompt_difficulty()?;

    Ok(UserProfile {
        preferences,
        target_calories,
        cooking_difficulty,
        ..Default::default()
    })
}
