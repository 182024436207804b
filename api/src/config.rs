use std::env;
use std::time::Duration;

use crate::app::feed_config::FeedSettings;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the news/review/Q&A/story service
    pub content_service_url: String,
    /// Base URL of the user profile and friend graph service
    pub profile_service_url: String,
    /// Base URL of the reactions/comments service
    pub interaction_service_url: String,
    pub port: u16,
    pub news_limit: usize,
    pub review_limit: usize,
    pub qa_limit: usize,
    pub story_limit: usize,
    pub active_stories_limit: usize,
    /// Per-source fetch deadline in milliseconds
    pub source_timeout_ms: u64,
    /// Seed for friend suggestion tie-breaking
    pub suggestion_seed: u64,
}

/// Read and parse an env var, falling back to `default` when unset or invalid
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            content_service_url: env::var("CONTENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            profile_service_url: env::var("PROFILE_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:5001".to_string()),
            interaction_service_url: env::var("INTERACTION_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:5002".to_string()),
            port: env_or("PORT", 8080),
            news_limit: env_or("FEED_NEWS_LIMIT", 10),
            review_limit: env_or("FEED_REVIEW_LIMIT", 10),
            qa_limit: env_or("FEED_QA_LIMIT", 10),
            story_limit: env_or("FEED_STORY_LIMIT", 5),
            active_stories_limit: env_or("FEED_ACTIVE_STORIES_LIMIT", 20),
            source_timeout_ms: env_or("FEED_SOURCE_TIMEOUT_MS", 2000),
            suggestion_seed: env_or("FEED_SUGGESTION_SEED", 42),
        }
    }

    /// Per-request feed limits
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            news_limit: self.news_limit,
            review_limit: self.review_limit,
            qa_limit: self.qa_limit,
            story_limit: self.story_limit,
            active_stories_limit: self.active_stories_limit,
            source_timeout: Duration::from_millis(self.source_timeout_ms),
            suggestion_seed: self.suggestion_seed,
            ..FeedSettings::default()
        }
    }
}
