use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{CommunityPost, EngagementStats, UserProfile};
use crate::scoring::constants::{
    preference_rule, FEED_FRESH_DAY_BONUS, FEED_FRESH_WEEK_BONUS, FEED_MAX_POSTS_PER_AUTHOR,
    FEED_POPULARITY_FACTOR, FEED_TAG_BONUS,
};
use crate::scoring::popularity::{
    days_since, popularity_score, PopularityOptions, PopularityWeights,
};

/// Only the most recent interactions are excluded from the feed.
const RECENT_INTERACTION_WINDOW: usize = 50;

/// A post with its feed score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPost<'a> {
    pub post: &'a CommunityPost,
    pub score: f64,
}

fn sort_descending(posts: &mut [ScoredPost<'_>]) {
    posts.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Posts ordered by decayed popularity, at most `limit`.
pub fn hot_posts<'a>(
    posts: &'a [CommunityPost],
    options: &PopularityOptions,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<ScoredPost<'a>> {
    let mut scored: Vec<ScoredPost<'a>> = posts
        .iter()
        .map(|post| ScoredPost {
            post,
            score: popularity_score(&post.stats, options, now),
        })
        .collect();

    sort_descending(&mut scored);
    scored.truncate(limit);
    scored
}

/// Engagement term of the personalized score: community weights, no decay,
/// and collects left out. Not rounded.
fn community_engagement(stats: &EngagementStats) -> f64 {
    let w = PopularityWeights::community();
    stats.like_count as f64 * w.like
        + stats.comment_count as f64 * w.comment
        + stats.view_count as f64 * w.view
}

/// Personal relevance of one post.
///
/// +20 per preference the post is tagged with (by preference name or its
/// recipe tag), a tenth of its community engagement, and a freshness bonus
/// of 30 under a day old or 10 under a week.
pub fn personalized_score(post: &CommunityPost, profile: &UserProfile, now: DateTime<Utc>) -> f64 {
    let tag_hits = profile
        .preferences
        .iter()
        .filter(|pref| {
            post.has_tag(pref)
                || preference_rule(pref).is_some_and(|rule| post.has_tag(rule.tag))
        })
        .count();

    let mut score = tag_hits as f64 * FEED_TAG_BONUS;
    score += community_engagement(&post.stats) * FEED_POPULARITY_FACTOR;

    if post.stats.create_time.is_some() {
        let age = days_since(post.stats.create_time, now);
        if age < 1.0 {
            score += FEED_FRESH_DAY_BONUS;
        } else if age < 7.0 {
            score += FEED_FRESH_WEEK_BONUS;
        }
    }

    score
}

/// Feed tailored to `profile`.
///
/// Posts the user recently liked or viewed are skipped, and no author
/// appears more than three times.
pub fn personalized_feed<'a>(
    posts: &'a [CommunityPost],
    profile: &UserProfile,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<ScoredPost<'a>> {
    let interactions: Vec<&String> = profile
        .liked_posts
        .iter()
        .chain(&profile.viewed_posts)
        .collect();
    let seen: HashSet<&str> = interactions
        [interactions.len().saturating_sub(RECENT_INTERACTION_WINDOW)..]
        .iter()
        .map(|id| id.as_str())
        .collect();

    let mut scored: Vec<ScoredPost<'a>> = posts
        .iter()
        .filter(|post| post.id.as_deref().is_none_or(|id| !seen.contains(id)))
        .map(|post| ScoredPost {
            post,
            score: personalized_score(post, profile, now),
        })
        .collect();

    sort_descending(&mut scored);

    let mut per_author: HashMap<Option<&str>, usize> = HashMap::new();
    let mut feed = Vec::new();
    for item in scored {
        if feed.len() >= limit {
            break;
        }
        let count = per_author.entry(item.post.user_id.as_deref()).or_insert(0);
        *count += 1;
        if *count <= FEED_MAX_POSTS_PER_AUTHOR {
            feed.push(item);
        }
    }

    feed
}
