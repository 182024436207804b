//! Feed handlers
//!
//! Read endpoints: the three feed modes and the side views. The viewer comes
//! from the `X-Viewer-Id` header (see `auth::viewer`).

use std::collections::BTreeSet;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::Viewer;
use crate::domain::entities::{
    ContentType, FeedItem, FeedRequest, FeedResponse, FeedStats, SortBy, StoryFeedItem,
    SuggestedFriend, TrendingTopic,
};
use crate::error::AppError;
use crate::AppState;

/// Largest page a client may request
const MAX_PAGE_SIZE: i64 = 100;

/// Largest topic or suggestion list a client may request
const MAX_LIST_COUNT: usize = 50;

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters shared by the feed endpoints
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// Comma-separated content types, e.g. `News,QA`
    pub content_types: Option<String>,
    /// Comma-separated topic tags
    pub tags: Option<String>,
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl FeedQuery {
    /// Build a feed request for `viewer`, rejecting unknown sorts and types
    pub fn into_request(self, viewer: Viewer) -> Result<FeedRequest, AppError> {
        let sort_by = match self.sort_by.as_deref() {
            Some(raw) => raw.parse::<SortBy>().map_err(AppError::BadRequest)?,
            None => SortBy::default(),
        };

        let content_types = split_list(self.content_types.as_deref())
            .map(|t| t.parse::<ContentType>().map_err(AppError::BadRequest))
            .collect::<Result<BTreeSet<_>, _>>()?;

        let tags = split_list(self.tags.as_deref())
            .map(str::to_string)
            .collect();

        let defaults = FeedRequest::default();
        Ok(FeedRequest {
            viewer_id: viewer.id(),
            content_types,
            tags,
            sort_by,
            page: self.page.unwrap_or(defaults.page),
            page_size: self
                .page_size
                .unwrap_or(defaults.page_size)
                .min(MAX_PAGE_SIZE),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub hours: Option<i64>,
}

// ============================================================================
// Feeds
// ============================================================================

/// GET /feed
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let request = query.into_request(viewer)?;
    Ok(Json(
        state.feed_service.get_personalized_feed(&request).await,
    ))
}

/// GET /feed/trending
pub async fn get_trending_feed(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let request = query.into_request(viewer)?;
    Ok(Json(state.feed_service.get_trending_feed(&request).await))
}

/// GET /feed/friends
///
/// Anonymous callers get an empty feed, not an error.
pub async fn get_friends_feed(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let request = query.into_request(viewer)?;
    Ok(Json(state.feed_service.get_friends_feed(&request).await))
}

// ============================================================================
// Side Views
// ============================================================================

/// GET /feed/stories
pub async fn get_stories(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Json<Vec<StoryFeedItem>> {
    Json(state.feed_service.get_active_stories(viewer.id()).await)
}

/// GET /feed/topics?count=
pub async fn get_topics(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> Json<Vec<TrendingTopic>> {
    let count = query.count.unwrap_or(10).min(MAX_LIST_COUNT);
    Json(state.feed_service.get_trending_topics(count).await)
}

/// GET /feed/suggestions?count=
pub async fn get_suggestions(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<CountQuery>,
) -> Result<Json<Vec<SuggestedFriend>>, AppError> {
    let viewer_id = viewer.require()?;
    let count = query.count.unwrap_or(5).min(MAX_LIST_COUNT);
    Ok(Json(
        state
            .feed_service
            .get_suggested_friends(viewer_id, count)
            .await,
    ))
}

/// GET /feed/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Json<FeedStats> {
    Json(state.feed_service.get_feed_stats(viewer.id()).await)
}

/// GET /feed/popular?hours=
pub async fn get_popular(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<PopularQuery>,
) -> Json<Vec<FeedItem>> {
    let hours = query.hours.unwrap_or(24);
    Json(
        state
            .feed_service
            .get_popular_content(hours, viewer.id())
            .await,
    )
}
