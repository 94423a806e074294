use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::RankedRecipe;

/// Write ranked recipes to a CSV file, one row per recipe.
pub fn write_ranking_csv(ranked: &[RankedRecipe<'_>], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "id",
        "name",
        "match",
        "preference",
        "nutrition",
        "popularity",
        "difficulty",
        "total",
        "match_ratio",
        "missing",
        "calories",
    ])?;

    for (i, item) in ranked.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            item.recipe.id.clone().unwrap_or_default(),
            item.recipe.display_name().to_string(),
            format!("{:.0}", item.scores.ingredient_match),
            format!("{:.0}", item.scores.preference),
            format!("{:.0}", item.scores.nutrition),
            format!("{:.0}", item.scores.popularity),
            format!("{:.0}", item.scores.difficulty),
            format!("{:.0}", item.scores.total),
            format!("{:.3}", item.match_info.match_ratio),
            item.match_info.missing.join("|"),
            format!("{:.0}", item.nutrition.calories),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write ranked recipes, with their scores, as pretty JSON.
pub fn write_ranking_json(ranked: &[RankedRecipe<'_>], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(ranked)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    use crate::models::{RecipeCandidate, UserProfile};
    use crate::scoring::{rank_recipes, RankingConfig};

    fn ranked_fixture(candidates: &[RecipeCandidate]) -> Vec<RankedRecipe<'_>> {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        rank_recipes(
            candidates,
            &["鸡蛋"],
            &UserProfile::default(),
            &RankingConfig::default(),
            now,
        )
    }

    fn candidates() -> Vec<RecipeCandidate> {
        vec![RecipeCandidate {
            id: Some("r1".to_string()),
            name: Some("蒸蛋".to_string()),
            ingredients: vec!["鸡蛋 100g".into(), "葱".into()],
            ..Default::default()
        }]
    }

    #[test]
    fn test_write_csv() {
        let candidates = candidates();
        let ranked = ranked_fixture(&candidates);
        let file = NamedTempFile::new().unwrap();
        write_ranking_csv(&ranked, file.path()).unwrap();

        let mut reader = csv::Reader::from_path(file.path()).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "r1");
        assert_eq!(&rows[0][2], "蒸蛋");
        assert_eq!(&rows[0][10], "葱");
    }

    #[test]
    fn test_write_json() {
        let candidates = candidates();
        let ranked = ranked_fixture(&candidates);
        let file = NamedTempFile::new().unwrap();
        write_ranking_json(&ranked, file.path()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(value[0]["recipe"]["name"], "蒸蛋");
        assert_eq!(value[0]["scores"]["match"], 50.0);
        assert_eq!(value[0]["matchInfo"]["missing"][0], "葱");
    }
}
