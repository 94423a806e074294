mod export;
mod persistence;

pub use export::{write_ranking_csv, write_ranking_json};
pub use persistence::{
    load_config, load_feed_request, load_ranking_request, save_profile, FeedRequest,
    RankingRequest,
};
