//! Interaction entities
//!
//! Reactions, comments and moderation actions are owned by the interaction
//! service. The feed engine only forwards them and relays the outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContentId, ContentType, UserId};

/// A reaction-style interaction with a feed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Like,
    Share,
    Bookmark,
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionKind::Like => write!(f, "like"),
            InteractionKind::Share => write!(f, "share"),
            InteractionKind::Bookmark => write!(f, "bookmark"),
        }
    }
}

impl std::str::FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "like" => Ok(InteractionKind::Like),
            "share" => Ok(InteractionKind::Share),
            "bookmark" => Ok(InteractionKind::Bookmark),
            _ => Err(format!(
                "Unknown interaction: {}. Use: like, share, bookmark",
                s
            )),
        }
    }
}

/// The content an interaction refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    pub content_id: ContentId,
    pub content_type: ContentType,
}

/// A comment on a feed item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: ContentId,
    pub author_id: UserId,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub content: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Result of a forwarded interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InteractionOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// A page of comments; `available` is false when the interaction service could not be read
#[derive(Debug, Clone, Serialize)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub available: bool,
}
