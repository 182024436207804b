//! Feed domain entities
//!
//! Request-scoped shapes produced by the feed engine. Nothing here is persisted;
//! every value is recomputed from current source state on each call.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Comment, ContentId, ContentType, SuggestedFriend, TrendingTopic, UserId};

/// Ordering applied to the merged feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Newest,
    Popular,
    Trending,
    Engagement,
    #[default]
    Relevance,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Newest => write!(f, "newest"),
            SortBy::Popular => write!(f, "popular"),
            SortBy::Trending => write!(f, "trending"),
            SortBy::Engagement => write!(f, "engagement"),
            SortBy::Relevance => write!(f, "relevance"),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortBy::Newest),
            "popular" => Ok(SortBy::Popular),
            "trending" => Ok(SortBy::Trending),
            "engagement" => Ok(SortBy::Engagement),
            "relevance" | "" => Ok(SortBy::Relevance),
            _ => Err(format!(
                "Unknown sort: {}. Use: newest, popular, trending, engagement, relevance",
                s
            )),
        }
    }
}

/// Selection strategy for a feed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    Personalized,
    Trending,
    Friends,
}

impl std::fmt::Display for FeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedMode::Personalized => write!(f, "personalized"),
            FeedMode::Trending => write!(f, "trending"),
            FeedMode::Friends => write!(f, "friends"),
        }
    }
}

/// A feed request as built by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRequest {
    pub viewer_id: Option<UserId>,
    /// Empty means all content types
    pub content_types: BTreeSet<ContentType>,
    /// Topic filter; empty means no filter
    pub tags: Vec<String>,
    pub sort_by: SortBy,
    pub page: i64,
    pub page_size: i64,
}

impl Default for FeedRequest {
    fn default() -> Self {
        Self {
            viewer_id: None,
            content_types: BTreeSet::new(),
            tags: Vec::new(),
            sort_by: SortBy::default(),
            page: 1,
            page_size: 20,
        }
    }
}

impl FeedRequest {
    pub fn for_viewer(viewer_id: UserId) -> Self {
        Self {
            viewer_id: Some(viewer_id),
            ..Self::default()
        }
    }

    /// Content types to aggregate, in aggregation order
    pub fn enabled_types(&self) -> Vec<ContentType> {
        if self.content_types.is_empty() {
            ContentType::ALL.to_vec()
        } else {
            ContentType::ALL
                .into_iter()
                .filter(|t| self.content_types.contains(t))
                .collect()
        }
    }
}

/// One normalized unit of content in a feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub id: ContentId,
    pub content_type: ContentType,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub author_id: UserId,
    pub author_name: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
    pub rating: Option<f64>,
    pub tags: Vec<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
    pub car_display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub time_ago: String,
    pub relevance_score: f64,
    pub trending_score: f64,
    pub reason_for_showing: String,
    pub is_trending: bool,
    pub is_featured: bool,
    pub is_answered: bool,
    pub is_expired: bool,
    /// First few comments, loaded after pagination
    pub initial_comments: Vec<Comment>,
}

impl FeedItem {
    pub fn popularity(&self) -> i64 {
        self.like_count + self.comment_count
    }

    pub fn engagement(&self) -> i64 {
        self.like_count + self.comment_count + self.share_count
    }

    /// Case-insensitive exact tag match against any of `tags`
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags
            .iter()
            .any(|t| tags.iter().any(|wanted| t.eq_ignore_ascii_case(wanted)))
    }
}

/// An ephemeral story as shown in the stories strip
#[derive(Debug, Clone, Serialize)]
pub struct StoryFeedItem {
    pub id: ContentId,
    pub author_id: UserId,
    pub author_name: String,
    pub caption: Option<String>,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
    pub car_display_name: String,
    pub location: Option<String>,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub time_remaining: String,
    pub is_expired: bool,
}

/// Pagination metadata, independent of the content type of the items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub current_page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub start_item: i64,
    pub end_item: i64,
}

impl PaginationInfo {
    /// Build metadata for `total_items`; `page` and `page_size` below 1 are treated as 1
    pub fn new(page: i64, page_size: i64, total_items: i64) -> Self {
        let current_page = page.max(1);
        let page_size = page_size.max(1);
        let total_items = total_items.max(0);
        let total_pages = total_items / page_size + i64::from(total_items % page_size != 0);
        let start_item = (current_page - 1).saturating_mul(page_size).saturating_add(1);
        // A page past the end is an empty range starting at start_item
        let end_item = start_item
            .saturating_add(page_size - 1)
            .min(total_items)
            .max(start_item - 1);

        Self {
            current_page,
            page_size,
            total_items,
            total_pages,
            has_previous_page: current_page > 1,
            has_next_page: current_page < total_pages,
            start_item,
            end_item,
        }
    }
}

/// Aggregate counters over current source state
#[derive(Debug, Clone, Serialize)]
pub struct FeedStats {
    pub total_items: i64,
    pub news_count: i64,
    pub reviews_count: i64,
    pub qa_count: i64,
    pub stories_count: i64,
    pub active_stories_count: i64,
    pub trending_items: i64,
    pub friends_items: i64,
    pub total_likes: i64,
    pub total_comments: i64,
    pub total_shares: i64,
    pub total_views: i64,
    pub last_refresh_at: DateTime<Utc>,
    pub last_refresh_ago: String,
    /// True when at least one source could not be read
    pub partial: bool,
    pub failed_sources: Vec<ContentType>,
}

impl FeedStats {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            total_items: 0,
            news_count: 0,
            reviews_count: 0,
            qa_count: 0,
            stories_count: 0,
            active_stories_count: 0,
            trending_items: 0,
            friends_items: 0,
            total_likes: 0,
            total_comments: 0,
            total_shares: 0,
            total_views: 0,
            last_refresh_at: now,
            last_refresh_ago: "Just now".to_string(),
            partial: false,
            failed_sources: Vec::new(),
        }
    }
}

/// A complete feed page plus its side panels
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub mode: FeedMode,
    pub feed_items: Vec<FeedItem>,
    pub stories: Vec<StoryFeedItem>,
    pub trending_topics: Vec<TrendingTopic>,
    pub suggested_friends: Vec<SuggestedFriend>,
    pub pagination: PaginationInfo,
    pub stats: FeedStats,
    pub has_more_content: bool,
    /// True when the feed was assembled despite one or more failed sources
    pub partial: bool,
    pub failed_sources: Vec<ContentType>,
}

impl FeedResponse {
    /// A well-formed response with no content
    pub fn empty(mode: FeedMode, page: i64, page_size: i64, now: DateTime<Utc>) -> Self {
        Self {
            mode,
            feed_items: Vec::new(),
            stories: Vec::new(),
            trending_topics: Vec::new(),
            suggested_friends: Vec::new(),
            pagination: PaginationInfo::new(page, page_size, 0),
            stats: FeedStats::empty(now),
            has_more_content: false,
            partial: false,
            failed_sources: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_from_str() {
        assert_eq!("newest".parse::<SortBy>().unwrap(), SortBy::Newest);
        assert_eq!("Popular".parse::<SortBy>().unwrap(), SortBy::Popular);
        assert_eq!("".parse::<SortBy>().unwrap(), SortBy::Relevance);
        assert!("random".parse::<SortBy>().is_err());
    }

    #[test]
    fn enabled_types_defaults_to_all() {
        let request = FeedRequest::default();
        assert_eq!(request.enabled_types(), ContentType::ALL.to_vec());
    }

    #[test]
    fn enabled_types_keeps_aggregation_order() {
        let request = FeedRequest {
            content_types: [ContentType::Story, ContentType::News].into_iter().collect(),
            ..FeedRequest::default()
        };
        assert_eq!(
            request.enabled_types(),
            vec![ContentType::News, ContentType::Story]
        );
    }

    #[test]
    fn pagination_middle_page() {
        let info = PaginationInfo::new(2, 10, 25);
        assert_eq!(info.start_item, 11);
        assert_eq!(info.end_item, 20);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next_page);
        assert!(info.has_previous_page);
    }

    #[test]
    fn pagination_last_partial_page() {
        let info = PaginationInfo::new(3, 10, 25);
        assert_eq!(info.start_item, 21);
        assert_eq!(info.end_item, 25);
        assert!(!info.has_next_page);
    }

    #[test]
    fn pagination_empty() {
        let info = PaginationInfo::new(1, 20, 0);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.start_item, 1);
        assert_eq!(info.end_item, 0);
        assert!(!info.has_next_page);
        assert!(!info.has_previous_page);
    }

    #[test]
    fn pagination_out_of_range_page_is_empty_range() {
        let info = PaginationInfo::new(5, 10, 3);
        assert_eq!(info.total_items, 3);
        assert_eq!(info.start_item, 41);
        assert_eq!(info.end_item, 40);
        assert!(!info.has_next_page);
        assert!(info.has_previous_page);
    }

    #[test]
    fn pagination_extreme_page_saturates() {
        let info = PaginationInfo::new(i64::MAX, 100, 7);
        assert_eq!(info.current_page, i64::MAX);
        assert_eq!(info.total_items, 7);
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.start_item, i64::MAX);
        assert_eq!(info.end_item, i64::MAX - 1);
        assert!(!info.has_next_page);

        let wide = PaginationInfo::new(1, i64::MAX, 7);
        assert_eq!(wide.total_pages, 1);
        assert_eq!(wide.end_item, 7);
    }

    #[test]
    fn pagination_clamps_page_below_one() {
        let info = PaginationInfo::new(0, 10, 5);
        assert_eq!(info.current_page, 1);
        assert_eq!(info.start_item, 1);
        assert_eq!(info.end_item, 5);
    }

    #[test]
    fn pagination_invariants_hold_across_inputs() {
        for total in 0..40 {
            for page_size in 1..12 {
                for page in -1..8 {
                    let info = PaginationInfo::new(page, page_size, total);
                    assert!(info.start_item <= info.end_item + 1);
                    assert_eq!(
                        info.total_pages,
                        (total as f64 / page_size as f64).ceil() as i64
                    );
                    assert_eq!(info.has_next_page, info.current_page < info.total_pages);
                }
            }
        }
    }
}
