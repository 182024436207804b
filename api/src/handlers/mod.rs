//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod feed;
pub mod interactions;

pub use feed::{
    get_feed, get_friends_feed, get_popular, get_stats, get_stories, get_suggestions, get_topics,
    get_trending_feed,
};
pub use interactions::{add_comment, bookmark, get_comments, hide, interact, mark_seen, report};
