//! Social entities
//!
//! Read-only views of community members, as served by the profile service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Display fields for a community member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: UserId,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub last_active_at: Option<DateTime<Utc>>,
}

/// A member the viewer may want to befriend
#[derive(Debug, Clone, Serialize)]
pub struct SuggestedFriend {
    pub user_id: UserId,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub mutual_friends_count: i64,
    pub common_interests: Vec<String>,
    pub post_count: i64,
    pub suggestion_reason: String,
}
