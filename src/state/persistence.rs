use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{lenient, CommunityPost, RecipeCandidate, UserProfile};
use crate::scoring::RankingConfig;

/// Everything needed for one ranking run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRequest {
    /// Pantry food names, optionally with quantities.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub user_foods: Vec<String>,

    #[serde(default)]
    pub profile: UserProfile,

    #[serde(default)]
    pub candidates: Vec<RecipeCandidate>,
}

/// Posts plus the viewer's profile for the community feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    #[serde(default)]
    pub profile: UserProfile,

    #[serde(default)]
    pub posts: Vec<CommunityPost>,
}

/// Load a ranking request from a JSON file.
pub fn load_ranking_request<P: AsRef<Path>>(path: P) -> Result<RankingRequest> {
    let content = fs::read_to_string(path.as_ref())?;
    let request: RankingRequest = serde_json::from_str(&content)?;

    info!(
        path = %path.as_ref().display(),
        candidates = request.candidates.len(),
        pantry = request.user_foods.len(),
        "loaded ranking request"
    );
    Ok(request)
}

/// Load a feed request from a JSON file.
pub fn load_feed_request<P: AsRef<Path>>(path: P) -> Result<FeedRequest> {
    let content = fs::read_to_string(path.as_ref())?;
    let request: FeedRequest = serde_json::from_str(&content)?;

    info!(
        path = %path.as_ref().display(),
        posts = request.posts.len(),
        "loaded feed request"
    );
    Ok(request)
}

/// Load ranking knobs. Missing fields keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RankingConfig> {
    let content = fs::read_to_string(path.as_ref())?;
    let config: RankingConfig = serde_json::from_str(&content)?;
    debug!(?config, "loaded ranking config");
    Ok(config)
}

/// Save a profile as pretty JSON.
pub fn save_profile<P: AsRef<Path>>(path: P, profile: &UserProfile) -> Result<()> {
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::models::Difficulty;

    #[test]
    fn test_load_ranking_request() {
        let json = r#"{
            "userFoods": ["鸡蛋", "西红柿"],
            "profile": {"preferences": ["快手"], "cookingDifficulty": "中等"},
            "candidates": [
                {"name": "番茄炒蛋", "ingredients": ["鸡蛋 2个", "西红柿 1个"]},
                {"name": "坏数据", "ingredients": 17, "tags": null}
            ]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let request = load_ranking_request(file.path()).unwrap();
        assert_eq!(request.user_foods.len(), 2);
        assert_eq!(request.profile.cooking_difficulty, Difficulty::Medium);
        assert_eq!(request.profile.target_calories, 2000.0);
        assert_eq!(request.candidates.len(), 2);
        assert!(request.candidates[1].ingredients.is_empty());
    }

    #[test]
    fn test_load_config_partial() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"limit": 3, "matcher": "strict"}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.limit, 3);
        assert_eq!(config.weights, crate::scoring::ScoreWeights::default());
    }

    #[test]
    fn test_load_rejects_non_object() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        assert!(load_ranking_request(file.path()).is_err());
    }

    #[test]
    fn test_profile_save_and_reload() {
        let profile = UserProfile {
            preferences: vec!["低糖".to_string()],
            target_calories: 1600.0,
            ..Default::default()
        };

        let out_file = NamedTempFile::new().unwrap();
        save_profile(out_file.path(), &profile).unwrap();

        let content = std::fs::read_to_string(out_file.path()).unwrap();
        let reloaded: UserProfile = serde_json::from_str(&content).unwrap();
        assert_eq!(reloaded, profile);
    }
}
