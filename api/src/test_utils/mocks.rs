//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::{
    Comment, ContentId, ContentRef, InteractionKind, NewsArticle, Question, Review, Story,
    UserId, UserSummary,
};
use crate::domain::ports::{
    InteractionClient, NewsSource, ProfileProvider, QuestionSource, ReviewSource, SourceFilter,
    StorySource,
};
use crate::error::SourceError;

fn unavailable(what: &str) -> SourceError {
    SourceError::Unavailable(format!("{} is down", what))
}

// ============================================================================
// In-Memory Content Sources
// ============================================================================

/// Author and creation time of a raw record, for filtering
pub trait Authored {
    fn author(&self) -> UserId;
    fn created(&self) -> DateTime<Utc>;
}

impl Authored for NewsArticle {
    fn author(&self) -> UserId {
        self.author_id
    }
    fn created(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Authored for Review {
    fn author(&self) -> UserId {
        self.reviewer_id
    }
    fn created(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Authored for Question {
    fn author(&self) -> UserId {
        self.author_id
    }
    fn created(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Authored for Story {
    fn author(&self) -> UserId {
        self.author_id
    }
    fn created(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A content source backed by a fixed list of records
pub struct InMemorySource<T> {
    records: Vec<T>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

pub type InMemoryNewsSource = InMemorySource<NewsArticle>;
pub type InMemoryReviewSource = InMemorySource<Review>;
pub type InMemoryQuestionSource = InMemorySource<Question>;
pub type InMemoryStorySource = InMemorySource<Story>;

impl<T: Authored + Clone + Send + Sync> InMemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every fetch fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Sleep before answering, for timeout tests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches issued against this source
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn serve(&self, filter: &SourceFilter, name: &str) -> Result<Vec<T>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(unavailable(name));
        }

        Ok(self
            .records
            .iter()
            .filter(|r| filter.admits(&r.author(), r.created()))
            .take(filter.limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NewsSource for InMemorySource<NewsArticle> {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<NewsArticle>, SourceError> {
        self.serve(filter, "news service").await
    }
}

#[async_trait]
impl ReviewSource for InMemorySource<Review> {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Review>, SourceError> {
        self.serve(filter, "review service").await
    }
}

#[async_trait]
impl QuestionSource for InMemorySource<Question> {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Question>, SourceError> {
        self.serve(filter, "Q&A service").await
    }
}

#[async_trait]
impl StorySource for InMemorySource<Story> {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Story>, SourceError> {
        self.serve(filter, "story service").await
    }
}

// ============================================================================
// In-Memory Profile Provider
// ============================================================================

#[derive(Default)]
pub struct InMemoryProfileProvider {
    interests: HashMap<UserId, Vec<String>>,
    friends: HashMap<UserId, Vec<UserId>>,
    summaries: HashMap<UserId, UserSummary>,
    fail: bool,
}

impl InMemoryProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every lookup fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_interests(mut self, user_id: UserId, interests: Vec<String>) -> Self {
        self.interests.insert(user_id, interests);
        self
    }

    pub fn with_friends(mut self, user_id: UserId, friends: Vec<UserId>) -> Self {
        self.friends.insert(user_id, friends);
        self
    }

    pub fn with_summary(mut self, summary: UserSummary) -> Self {
        self.summaries.insert(summary.user_id, summary);
        self
    }
}

#[async_trait]
impl ProfileProvider for InMemoryProfileProvider {
    async fn get_interests(&self, user_id: &UserId) -> Result<Vec<String>, SourceError> {
        if self.fail {
            return Err(unavailable("profile service"));
        }
        Ok(self.interests.get(user_id).cloned().unwrap_or_default())
    }

    async fn get_friend_ids(&self, user_id: &UserId) -> Result<Vec<UserId>, SourceError> {
        if self.fail {
            return Err(unavailable("profile service"));
        }
        Ok(self.friends.get(user_id).cloned().unwrap_or_default())
    }

    async fn get_user_summary(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserSummary>, SourceError> {
        if self.fail {
            return Err(unavailable("profile service"));
        }
        Ok(self.summaries.get(user_id).cloned())
    }
}

// ============================================================================
// Mock Interaction Client
// ============================================================================

#[derive(Default)]
pub struct MockInteractionClient {
    comments: Arc<RwLock<HashMap<ContentId, Vec<Comment>>>>,
    recorded: Arc<RwLock<Vec<InteractionKind>>>,
    seen: Arc<RwLock<Vec<ContentRef>>>,
    hidden: Arc<RwLock<Vec<ContentRef>>>,
    reports: Arc<RwLock<Vec<(ContentRef, String)>>>,
    fail: bool,
}

impl MockInteractionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Pre-populate comments for a piece of content
    pub fn with_comments(self, content_id: ContentId, comments: Vec<Comment>) -> Self {
        self.comments.write().unwrap().insert(content_id, comments);
        self
    }

    pub fn recorded_kinds(&self) -> Vec<InteractionKind> {
        self.recorded.read().unwrap().clone()
    }

    pub fn seen(&self) -> Vec<ContentRef> {
        self.seen.read().unwrap().clone()
    }

    pub fn hidden(&self) -> Vec<ContentRef> {
        self.hidden.read().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<(ContentRef, String)> {
        self.reports.read().unwrap().clone()
    }

    fn check(&self) -> Result<(), SourceError> {
        if self.fail {
            Err(unavailable("interaction service"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InteractionClient for MockInteractionClient {
    async fn mark_seen(&self, _viewer_id: &UserId, target: &ContentRef) -> Result<(), SourceError> {
        self.check()?;
        self.seen.write().unwrap().push(*target);
        Ok(())
    }

    async fn record(
        &self,
        _viewer_id: &UserId,
        _target: &ContentRef,
        kind: InteractionKind,
    ) -> Result<(), SourceError> {
        self.check()?;
        self.recorded.write().unwrap().push(kind);
        Ok(())
    }

    async fn add_comment(
        &self,
        viewer_id: &UserId,
        target: &ContentRef,
        body: &str,
    ) -> Result<Comment, SourceError> {
        self.check()?;
        let comment = Comment {
            id: ContentId::new(),
            author_id: *viewer_id,
            author_name: "Test Commenter".to_string(),
            author_avatar: None,
            content: body.to_string(),
            like_count: 0,
            created_at: Utc::now(),
        };
        self.comments
            .write()
            .unwrap()
            .entry(target.content_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn get_comments(
        &self,
        target: &ContentRef,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Comment>, SourceError> {
        self.check()?;
        let skip = ((page.max(1) - 1) * page_size.max(1)) as usize;
        Ok(self
            .comments
            .read()
            .unwrap()
            .get(&target.content_id)
            .map(|c| {
                c.iter()
                    .skip(skip)
                    .take(page_size.max(1) as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn hide(&self, _viewer_id: &UserId, target: &ContentRef) -> Result<(), SourceError> {
        self.check()?;
        self.hidden.write().unwrap().push(*target);
        Ok(())
    }

    async fn report(
        &self,
        _viewer_id: &UserId,
        target: &ContentRef,
        reason: &str,
    ) -> Result<(), SourceError> {
        self.check()?;
        self.reports
            .write()
            .unwrap()
            .push((*target, reason.to_string()));
        Ok(())
    }
}
