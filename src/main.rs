use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{info, warn, Level};

use recipe_ranker_rs::cli::{Cli, Command};
use recipe_ranker_rs::error::Result;
use recipe_ranker_rs::interface::{
    collect_user_profile, display_feed, display_nutrition, display_ranking, prompt_yes_no,
};
use recipe_ranker_rs::models::IngredientEntry;
use recipe_ranker_rs::scoring::{
    aggregate_nutrition, filter_by_tags, hot_posts, nutrition_balance_score, personalized_feed,
    rank_recipes, NutritionTarget, PopularityOptions, RankingConfig, ScoreWeights,
};
use recipe_ranker_rs::state::{
    load_config, load_feed_request, load_ranking_request, save_profile, write_ranking_csv,
    write_ranking_json,
};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Rank {
            input,
            config,
            pantry_weights,
            limit,
            tags,
            now,
            csv,
            json,
        } => cmd_rank(RankArgs {
            input,
            config,
            pantry_weights,
            limit,
            tags,
            now: now.unwrap_or_else(Utc::now),
            csv,
            json,
        }),
        Command::Nutrition {
            ingredients,
            target_calories,
        } => cmd_nutrition(&ingredients, target_calories),
        Command::Feed {
            input,
            personalized,
            limit,
            now,
        } => cmd_feed(&input, personalized, limit, now.unwrap_or_else(Utc::now)),
        Command::Profile { output } => cmd_profile(&output),
    }
}

struct RankArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    pantry_weights: bool,
    limit: Option<usize>,
    tags: Vec<String>,
    now: DateTime<Utc>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
}

/// Rank recipe candidates from a request file.
fn cmd_rank(args: RankArgs) -> Result<()> {
    if !args.input.exists() {
        eprintln!("Request file not found: {}", args.input.display());
        eprintln!("Expected JSON with userFoods, profile, and candidates.");
        return Ok(());
    }

    let request = load_ranking_request(&args.input)?;

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RankingConfig::default(),
    };
    if args.pantry_weights {
        config.weights = ScoreWeights::pantry();
    }
    if let Some(limit) = args.limit {
        config.limit = limit;
    }

    let candidates: Vec<_> = filter_by_tags(&request.candidates, &args.tags)
        .into_iter()
        .cloned()
        .collect();
    if candidates.is_empty() {
        warn!("no candidates left to rank");
        println!("No recipe candidates to rank.");
        return Ok(());
    }

    info!(
        candidates = candidates.len(),
        limit = config.limit,
        now = %args.now,
        "ranking"
    );

    let ranked = rank_recipes(
        &candidates,
        &request.user_foods,
        &request.profile,
        &config,
        args.now,
    );

    display_ranking(&ranked);

    if let Some(path) = &args.csv {
        write_ranking_csv(&ranked, path)?;
        println!("Wrote CSV to {}", path.display());
    }
    if let Some(path) = &args.json {
        write_ranking_json(&ranked, path)?;
        println!("Wrote JSON to {}", path.display());
    }

    Ok(())
}

/// Aggregate nutrition of ingredient lines and score its balance.
fn cmd_nutrition(lines: &[String], target_calories: f64) -> Result<()> {
    let entries: Vec<IngredientEntry> = lines.iter().cloned().map(IngredientEntry::from).collect();
    let nutrition = aggregate_nutrition(&entries);
    let score = nutrition_balance_score(&nutrition, &NutritionTarget::with_calories(target_calories));

    display_nutrition(&nutrition, &score);
    Ok(())
}

/// Rank community posts by popularity or for the request's profile.
fn cmd_feed(input: &Path, personalized: bool, limit: usize, now: DateTime<Utc>) -> Result<()> {
    if !input.exists() {
        eprintln!("Feed file not found: {}", input.display());
        return Ok(());
    }

    let request = load_feed_request(input)?;

    if personalized {
        let feed = personalized_feed(&request.posts, &request.profile, now, limit);
        display_feed(&feed, "For You");
    } else {
        let feed = hot_posts(&request.posts, &PopularityOptions::default(), now, limit);
        display_feed(&feed, "Hot");
    }

    Ok(())
}

/// Build a profile interactively and save it.
fn cmd_profile(output: &Path) -> Result<()> {
    let profile = collect_user_profile()?;

    println!();
    println!("Preferences: {}", profile.preferences.join(", "));
    println!("Target: {:.0} kcal", profile.target_calories);
    println!("Difficulty: {}", profile.cooking_difficulty);

    if output.exists() {
        let overwrite = prompt_yes_no(
            &format!("{} exists. Overwrite?", output.display()),
            false,
        )?;
        if !overwrite {
            println!("Profile not saved.");
            return Ok(());
        }
    }

    save_profile(output, &profile)?;
    println!("Profile saved to {}", output.display());
    Ok(())
}
