//! Domain entities
//!
//! Pure domain models for the feed engine: raw source records, the unified
//! feed shapes built from them, and the read-only side panels.

pub mod content;
pub mod feed;
pub mod interaction;
pub mod social;
pub mod topic;

pub use content::{
    ContentId, ContentType, NewsArticle, Question, Review, Story, UserId, VehicleInfo,
};
pub use feed::{
    FeedItem, FeedMode, FeedRequest, FeedResponse, FeedStats, PaginationInfo, SortBy,
    StoryFeedItem,
};
pub use interaction::{Comment, CommentPage, ContentRef, InteractionKind, InteractionOutcome};
pub use social::{SuggestedFriend, UserSummary};
pub use topic::{TopicCategory, TrendingTopic};
