use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Recipe ranker: recommends recipes from what is in your pantry.
#[derive(Parser, Debug)]
#[command(name = "recipe_ranker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log scoring details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank recipe candidates for a pantry and profile.
    Rank {
        /// Ranking request JSON (userFoods, profile, candidates).
        #[arg(short, long, default_value = "request.json")]
        input: PathBuf,

        /// Ranking config JSON; defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Use the pantry weighting (no popularity term).
        #[arg(long)]
        pantry_weights: bool,

        /// Maximum number of results.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only rank candidates with at least one of these tags set.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Reference time for popularity decay (RFC 3339). Defaults to now.
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Write ranked results to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write ranked results to this JSON file.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Estimate nutrition for ingredient lines such as "鸡蛋 200g".
    Nutrition {
        /// Ingredient lines.
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Daily calorie target for the balance score.
        #[arg(long, default_value = "2000")]
        target_calories: f64,
    },

    /// Rank community posts.
    Feed {
        /// Feed request JSON (profile, posts).
        #[arg(short, long, default_value = "feed.json")]
        input: PathBuf,

        /// Personalize for the request's profile instead of ranking by popularity.
        #[arg(long)]
        personalized: bool,

        /// Maximum number of posts.
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Reference time (RFC 3339). Defaults to now.
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Build a user profile interactively and save it as JSON.
    Profile {
        /// Output path for the profile.
        #[arg(short, long, default_value = "profile.json")]
        output: PathBuf,
    },
}
