use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::nutrition::round_half_up;
use crate::models::EngagementStats;
use crate::scoring::constants::MILLIS_PER_DAY;

/// Per-counter weights of the engagement sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopularityWeights {
    pub like: f64,
    pub collect: f64,
    pub comment: f64,
    pub view: f64,
}

impl Default for PopularityWeights {
    fn default() -> Self {
        Self {
            like: 2.0,
            collect: 3.0,
            comment: 1.5,
            view: 0.5,
        }
    }
}

impl PopularityWeights {
    /// Simplified weighting used by the community feed.
    pub fn community() -> Self {
        Self {
            like: 3.0,
            collect: 2.0,
            comment: 1.0,
            view: 0.1,
        }
    }
}

/// Options for [`popularity_score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopularityOptions {
    pub weights: PopularityWeights,
    pub time_decay: bool,
    /// Multiplier applied per elapsed day.
    pub decay_factor: f64,
}

impl Default for PopularityOptions {
    fn default() -> Self {
        Self {
            weights: PopularityWeights::default(),
            time_decay: true,
            decay_factor: 0.95,
        }
    }
}

/// How the unbounded popularity score enters the composite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PopularityScale {
    /// Use the raw score as-is.
    #[default]
    Raw,
    /// Map `s` to `100 * s / (s + k)`.
    Saturating { k: f64 },
}

impl PopularityScale {
    pub fn apply(&self, score: f64) -> f64 {
        match *self {
            PopularityScale::Raw => score,
            PopularityScale::Saturating { k } => {
                let denominator = score + k;
                if score <= 0.0 || denominator <= 0.0 {
                    0.0
                } else {
                    round_half_up(100.0 * score / denominator)
                }
            }
        }
    }
}

/// Fractional days from `created` to `now`. A missing time counts as now.
pub fn days_since(created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match created {
        Some(created) => (now - created).num_milliseconds() as f64 / MILLIS_PER_DAY,
        None => 0.0,
    }
}

/// Weighted engagement sum, optionally decayed by `decay_factor ^ days`.
///
/// Not bounded to 0..=100. Rounded to the nearest integer.
pub fn popularity_score(stats: &EngagementStats, options: &PopularityOptions, now: DateTime<Utc>) -> f64 {
    let w = &options.weights;
    let mut score = stats.like_count as f64 * w.like
        + stats.collect_count as f64 * w.collect
        + stats.comment_count as f64 * w.comment
        + stats.view_count as f64 * w.view;

    if options.time_decay {
        let days = days_since(stats.create_time, now);
        score *= options.decay_factor.powf(days);
    }

    if !score.is_finite() {
        return 0.0;
    }

    round_half_up(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn stats(like: u64, collect: u64, comment: u64, view: u64, age_days: i64) -> EngagementStats {
        EngagementStats {
            like_count: like,
            collect_count: collect,
            comment_count: comment,
            view_count: view,
            create_time: Some(now() - Duration::days(age_days)),
        }
    }

    #[test]
    fn test_zero_counters() {
        let s = stats(0, 0, 0, 0, 0);
        assert_eq!(popularity_score(&s, &PopularityOptions::default(), now()), 0.0);
    }

    #[test]
    fn test_base_sum_without_decay() {
        let s = stats(10, 5, 4, 20, 30);
        let options = PopularityOptions {
            time_decay: false,
            ..Default::default()
        };
        // 20 + 15 + 6 + 10
        assert_eq!(popularity_score(&s, &options, now()), 51.0);
    }

    #[test]
    fn test_decay_one_day() {
        let s = stats(50, 0, 0, 0, 1);
        assert_eq!(popularity_score(&s, &PopularityOptions::default(), now()), 95.0);
    }

    #[test]
    fn test_decay_uses_fractional_days() {
        let mut s = stats(100, 0, 0, 0, 0);
        s.create_time = Some(now() - Duration::hours(12));
        // 200 * 0.95^0.5 = 194.93
        assert_eq!(popularity_score(&s, &PopularityOptions::default(), now()), 195.0);
    }

    #[test]
    fn test_missing_create_time_no_decay() {
        let mut s = stats(10, 0, 0, 0, 0);
        s.create_time = None;
        assert_eq!(popularity_score(&s, &PopularityOptions::default(), now()), 20.0);
    }

    #[test]
    fn test_community_weights() {
        let s = stats(1, 1, 1, 10, 0);
        let options = PopularityOptions {
            weights: PopularityWeights::community(),
            time_decay: false,
            ..Default::default()
        };
        assert_eq!(popularity_score(&s, &options, now()), 7.0);
    }

    #[test]
    fn test_saturating_scale() {
        let scale = PopularityScale::Saturating { k: 50.0 };
        assert_eq!(scale.apply(0.0), 0.0);
        assert_eq!(scale.apply(50.0), 50.0);
        assert!(scale.apply(1_000_000.0) <= 100.0);
        assert_eq!(PopularityScale::Raw.apply(420.0), 420.0);
    }

    #[test]
    fn test_idempotent() {
        let s = stats(7, 3, 2, 40, 3);
        let options = PopularityOptions::default();
        let a = popularity_score(&s, &options, now());
        let b = popularity_score(&s, &options, now());
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
