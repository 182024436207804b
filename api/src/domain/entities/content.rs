//! Content domain entities
//!
//! Raw records as returned by the content services (news, reviews, Q&A, stories).
//! The feed engine never mutates these; it only reads them and maps them to feed items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a piece of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub Uuid);

impl ContentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ContentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a community member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source family of a feed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentType {
    News,
    Review,
    #[serde(rename = "QA")]
    Qa,
    Story,
}

impl ContentType {
    /// All content types, in aggregation order
    pub const ALL: [ContentType; 4] = [
        ContentType::News,
        ContentType::Review,
        ContentType::Qa,
        ContentType::Story,
    ];

    /// Placeholder author name used when the source record carries none
    pub fn default_author_name(&self) -> &'static str {
        match self {
            ContentType::News => "News Author",
            ContentType::Review => "Reviewer",
            ContentType::Qa => "Question Author",
            ContentType::Story => "Story Author",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::News => write!(f, "News"),
            ContentType::Review => write!(f, "Review"),
            ContentType::Qa => write!(f, "QA"),
            ContentType::Story => write!(f, "Story"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "news" => Ok(ContentType::News),
            "review" | "reviews" => Ok(ContentType::Review),
            "qa" | "question" | "questions" => Ok(ContentType::Qa),
            "story" | "stories" => Ok(ContentType::Story),
            _ => Err(format!(
                "Unknown content type: {}. Use: News, Review, QA, Story",
                s
            )),
        }
    }
}

/// Vehicle a piece of content is about
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl VehicleInfo {
    /// "2021 BMW M3" when make and model are known, just the make otherwise
    pub fn display_name(&self) -> String {
        let make = self.make.as_deref().filter(|m| !m.is_empty());
        let model = self.model.as_deref().filter(|m| !m.is_empty());

        match (make, model) {
            (Some(make), Some(model)) => {
                let year = self.year.map(|y| y.to_string()).unwrap_or_default();
                format!("{} {} {}", year, make, model).trim().to_string()
            }
            (Some(make), None) => make.to_string(),
            _ => String::new(),
        }
    }
}

/// A published news article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: ContentId,
    pub headline: String,
    pub body: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub author_id: UserId,
    pub author_name: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub vehicle: VehicleInfo,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An approved vehicle review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ContentId,
    pub title: String,
    pub comment: String,
    pub reviewer_id: UserId,
    pub reviewer_name: Option<String>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub vehicle: VehicleInfo,
    pub view_count: i64,
    pub helpful_count: i64,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A community question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: ContentId,
    pub title: String,
    pub body: String,
    pub author_id: UserId,
    pub author_name: Option<String>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub vehicle: VehicleInfo,
    pub view_count: i64,
    pub vote_score: i64,
    pub answer_count: i64,
    pub is_solved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An ephemeral story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: ContentId,
    pub caption: Option<String>,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub author_id: UserId,
    pub author_name: Option<String>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub vehicle: VehicleInfo,
    pub location_name: Option<String>,
    pub view_count: i64,
    pub like_count: i64,
    pub reply_count: i64,
    pub share_count: i64,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Story {
    /// A story is expired once its expiry instant has passed
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
