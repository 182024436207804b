//! Trending topic entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a trending topic was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicCategory {
    /// A popular news tag
    News,
    /// A frequently discussed vehicle make
    Cars,
}

impl TopicCategory {
    pub fn trending_reason(&self) -> &'static str {
        match self {
            TopicCategory::News => "Breaking News",
            TopicCategory::Cars => "Community Interest",
        }
    }
}

impl std::fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopicCategory::News => write!(f, "News"),
            TopicCategory::Cars => write!(f, "Cars"),
        }
    }
}

/// A topic currently drawing community activity
#[derive(Debug, Clone, Serialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub category: TopicCategory,
    pub post_count: i64,
    pub engagement_count: i64,
    pub trending_score: f64,
    pub trending_reason: String,
    pub last_activity_at: DateTime<Utc>,
    pub time_ago: String,
}
