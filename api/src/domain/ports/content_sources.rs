//! Content source port traits
//!
//! One trait per content family. Each source is independently failable; the
//! aggregator isolates failures so one broken source never aborts the others.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{NewsArticle, Question, Review, Story, UserId};
use crate::error::SourceError;

/// Filter criteria passed to every content source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFilter {
    /// Maximum number of records to return
    pub limit: usize,
    /// Restrict to content authored by these users
    pub author_ids: Option<Vec<UserId>>,
    /// Restrict to content created at or after this instant
    pub since: Option<DateTime<Utc>>,
}

impl SourceFilter {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn authored_by(mut self, author_ids: Vec<UserId>) -> Self {
        self.author_ids = Some(author_ids);
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Whether a record with this author and creation time passes the filter
    pub fn admits(&self, author_id: &UserId, created_at: DateTime<Utc>) -> bool {
        let author_ok = self
            .author_ids
            .as_ref()
            .map(|ids| ids.contains(author_id))
            .unwrap_or(true);
        let time_ok = self.since.map(|s| created_at >= s).unwrap_or(true);
        author_ok && time_ok
    }
}

/// Published news articles, newest first
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<NewsArticle>, SourceError>;
}

/// Approved reviews, newest first
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Review>, SourceError>;
}

/// Community questions, newest first
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Question>, SourceError>;
}

/// Active (not archived) stories, newest first
#[async_trait]
pub trait StorySource: Send + Sync {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Story>, SourceError>;
}
