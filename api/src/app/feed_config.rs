//! Feed configuration
//!
//! Scoring constants and the configurable limits that bound each request.

use std::time::Duration;

use crate::domain::entities::ContentType;

/// Relevance score every item starts from
pub const BASE_RELEVANCE_SCORE: f64 = 50.0;

/// Added per interest that a content tag contains
pub const TAG_MATCH_BOOST: f64 = 20.0;

/// Added per interest that the content's car make contains
pub const CAR_MAKE_MATCH_BOOST: f64 = 25.0;

/// Upper bound of the relevance score
pub const MAX_RELEVANCE_SCORE: f64 = 100.0;

/// Score above which an item "matches your interests"
pub const STRONG_MATCH_THRESHOLD: f64 = 80.0;

/// Score above which an item is "similar to content you liked"
pub const SIMILAR_MATCH_THRESHOLD: f64 = 60.0;

/// Reviews with more helpful votes than this are flagged trending
pub const REVIEW_TRENDING_HELPFUL_COUNT: i64 = 10;

/// Questions with a higher vote score than this are flagged trending
pub const QUESTION_TRENDING_VOTE_SCORE: i64 = 5;

/// Trending-score bonus for items carrying the trending flag
pub const TRENDING_FLAG_BONUS: f64 = 25.0;

/// Comments preloaded per feed item
pub const INITIAL_COMMENTS_PER_ITEM: i64 = 3;

/// Concurrent comment fetches per page
pub const MAX_CONCURRENT_COMMENT_FETCHES: usize = 4;

/// Popular-content results
pub const POPULAR_CONTENT_LIMIT: usize = 10;

/// Trending topics attached to a personalized feed
pub const PERSONALIZED_TOPIC_COUNT: usize = 10;

/// Trending topics attached to a trending feed
pub const TRENDING_TOPIC_COUNT: usize = 15;

/// Trending topics attached to a friends feed
pub const FRIENDS_TOPIC_COUNT: usize = 5;

/// Friend suggestions attached to a personalized feed
pub const PERSONALIZED_SUGGESTION_COUNT: usize = 5;

/// Friend suggestions attached to a friends feed
pub const FRIENDS_SUGGESTION_COUNT: usize = 3;

/// Authors considered per suggestion request
pub const MAX_SUGGESTION_CANDIDATES: usize = 50;

/// Concurrent profile lookups while ranking suggestions
pub const MAX_CONCURRENT_PROFILE_LOOKUPS: usize = 4;

/// Per-request limits, loaded from configuration
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub news_limit: usize,
    pub review_limit: usize,
    pub qa_limit: usize,
    pub story_limit: usize,
    /// Stories shown in the stories strip
    pub active_stories_limit: usize,
    /// Records read per source when computing topics, stats and suggestions
    pub snapshot_limit: usize,
    /// Deadline for a single source fetch
    pub source_timeout: Duration,
    /// Seed for suggestion tie-breaking
    pub suggestion_seed: u64,
}

impl FeedSettings {
    /// Per-source cap for the primary feed
    pub fn limit_for(&self, content_type: ContentType) -> usize {
        match content_type {
            ContentType::News => self.news_limit,
            ContentType::Review => self.review_limit,
            ContentType::Qa => self.qa_limit,
            ContentType::Story => self.story_limit,
        }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            news_limit: 10,
            review_limit: 10,
            qa_limit: 10,
            story_limit: 5,
            active_stories_limit: 20,
            snapshot_limit: 200,
            source_timeout: Duration::from_millis(2000),
            suggestion_seed: 42,
        }
    }
}
