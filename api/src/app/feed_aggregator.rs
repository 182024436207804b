//! Feed aggregation
//!
//! Fans out to the enabled content sources concurrently, isolates failures
//! per source, and maps whatever came back into feed items.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::feed_config::FeedSettings;
use super::feed_item_mapper::{map_news, map_question, map_review, map_story, ScoringContext};
use crate::domain::entities::{ContentType, FeedItem, NewsArticle, Question, Review, Story, UserId};
use crate::domain::ports::{NewsSource, QuestionSource, ReviewSource, SourceFilter, StorySource};
use crate::error::SourceError;

/// Raw records from one fan-out, plus the sources that could not be read
#[derive(Debug, Default)]
pub struct SourceBatch {
    pub news: Vec<NewsArticle>,
    pub reviews: Vec<Review>,
    pub questions: Vec<Question>,
    pub stories: Vec<Story>,
    pub failed_sources: Vec<ContentType>,
}

impl SourceBatch {
    /// Map every record, in aggregation order (news, reviews, QA, stories)
    pub fn to_items(&self, ctx: &ScoringContext<'_>) -> Vec<FeedItem> {
        let mut items = Vec::with_capacity(
            self.news.len() + self.reviews.len() + self.questions.len() + self.stories.len(),
        );
        items.extend(self.news.iter().map(|n| map_news(n, ctx)));
        items.extend(self.reviews.iter().map(|r| map_review(r, ctx)));
        items.extend(self.questions.iter().map(|q| map_question(q, ctx)));
        items.extend(self.stories.iter().map(|s| map_story(s, ctx)));
        items
    }
}

/// Mapped items from the enabled sources
#[derive(Debug, Default)]
pub struct AggregatedFeed {
    pub items: Vec<FeedItem>,
    pub failed_sources: Vec<ContentType>,
}

/// Read-only fan-out over the four content sources
pub struct FeedAggregator<NS, RS, QS, SS>
where
    NS: NewsSource,
    RS: ReviewSource,
    QS: QuestionSource,
    SS: StorySource,
{
    news: Arc<NS>,
    reviews: Arc<RS>,
    questions: Arc<QS>,
    stories: Arc<SS>,
    settings: FeedSettings,
}

impl<NS, RS, QS, SS> FeedAggregator<NS, RS, QS, SS>
where
    NS: NewsSource,
    RS: ReviewSource,
    QS: QuestionSource,
    SS: StorySource,
{
    pub fn new(
        news: Arc<NS>,
        reviews: Arc<RS>,
        questions: Arc<QS>,
        stories: Arc<SS>,
        settings: FeedSettings,
    ) -> Self {
        Self {
            news,
            reviews,
            questions,
            stories,
            settings,
        }
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    /// Fetch the enabled types with their per-source caps and map the results.
    ///
    /// `author_ids` restricts the feed to content by those authors; it is
    /// enforced here as well as forwarded to the sources.
    pub async fn aggregate(
        &self,
        enabled: &[ContentType],
        author_ids: Option<Vec<UserId>>,
        ctx: &ScoringContext<'_>,
    ) -> AggregatedFeed {
        let mut filter = SourceFilter::default();
        if let Some(ids) = author_ids {
            filter = filter.authored_by(ids);
        }

        let batch = self
            .fetch(enabled, &filter, |content_type| {
                self.settings.limit_for(content_type)
            })
            .await;
        let items = batch.to_items(ctx);

        tracing::debug!(
            items = items.len(),
            failed = batch.failed_sources.len(),
            "Aggregated feed sources"
        );

        AggregatedFeed {
            items,
            failed_sources: batch.failed_sources,
        }
    }

    /// Broad read of every source for topics, stats and suggestions
    pub async fn snapshot(&self, filter: &SourceFilter) -> SourceBatch {
        let limit = self.settings.snapshot_limit;
        self.fetch(&ContentType::ALL, filter, |_| limit).await
    }

    /// Current stories, newest first, capped for the stories strip
    pub async fn stories(&self, limit: usize) -> Result<Vec<Story>, SourceError> {
        let filter = SourceFilter::with_limit(limit);
        let mut stories = guarded(
            ContentType::Story,
            self.settings.source_timeout,
            self.stories.fetch(&filter),
        )
        .await?;
        stories.truncate(limit);
        Ok(stories)
    }

    /// Issue one fetch per enabled type concurrently.
    ///
    /// Each fetch runs under the source timeout. A failed or timed-out source
    /// is logged and recorded in `failed_sources`; the others still count.
    pub async fn fetch(
        &self,
        enabled: &[ContentType],
        base: &SourceFilter,
        limit_for: impl Fn(ContentType) -> usize,
    ) -> SourceBatch {
        // An explicit empty author list can match nothing
        if base.author_ids.as_ref().is_some_and(|ids| ids.is_empty()) {
            return SourceBatch::default();
        }

        let timeout = self.settings.source_timeout;
        let filter_for = |content_type: ContentType| SourceFilter {
            limit: limit_for(content_type),
            ..base.clone()
        };
        let news_filter = filter_for(ContentType::News);
        let review_filter = filter_for(ContentType::Review);
        let question_filter = filter_for(ContentType::Qa);
        let story_filter = filter_for(ContentType::Story);

        let (news, reviews, questions, stories) = tokio::join!(
            fetch_if(enabled, ContentType::News, timeout, || {
                self.news.fetch(&news_filter)
            }),
            fetch_if(enabled, ContentType::Review, timeout, || {
                self.reviews.fetch(&review_filter)
            }),
            fetch_if(enabled, ContentType::Qa, timeout, || {
                self.questions.fetch(&question_filter)
            }),
            fetch_if(enabled, ContentType::Story, timeout, || {
                self.stories.fetch(&story_filter)
            }),
        );

        let mut failed = Vec::new();
        let news = settle(ContentType::News, news, &news_filter, &mut failed, |n| {
            (n.author_id, n.created_at)
        });
        let reviews = settle(ContentType::Review, reviews, &review_filter, &mut failed, |r| {
            (r.reviewer_id, r.created_at)
        });
        let questions = settle(ContentType::Qa, questions, &question_filter, &mut failed, |q| {
            (q.author_id, q.created_at)
        });
        let stories = settle(ContentType::Story, stories, &story_filter, &mut failed, |s| {
            (s.author_id, s.created_at)
        });

        SourceBatch {
            news,
            reviews,
            questions,
            stories,
            failed_sources: failed,
        }
    }
}

/// Run a source fetch under a deadline
async fn guarded<T, F>(
    content_type: ContentType,
    timeout: Duration,
    fetch: F,
) -> Result<Vec<T>, SourceError>
where
    F: Future<Output = Result<Vec<T>, SourceError>>,
{
    match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout {
            content_type,
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

/// Fetch only when the type is enabled; a disabled type yields `None`
async fn fetch_if<T, F, Fut>(
    enabled: &[ContentType],
    content_type: ContentType,
    timeout: Duration,
    fetch: F,
) -> Option<Result<Vec<T>, SourceError>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, SourceError>>,
{
    if !enabled.contains(&content_type) {
        return None;
    }
    Some(guarded(content_type, timeout, fetch()).await)
}

/// Keep the records a source returned, bounded and filtered, or record the failure
fn settle<T>(
    content_type: ContentType,
    result: Option<Result<Vec<T>, SourceError>>,
    filter: &SourceFilter,
    failed: &mut Vec<ContentType>,
    key: impl Fn(&T) -> (UserId, DateTime<Utc>),
) -> Vec<T> {
    match result {
        None => Vec::new(),
        Some(Ok(mut records)) => {
            records.retain(|r| {
                let (author, created_at) = key(r);
                filter.admits(&author, created_at)
            });
            records.truncate(filter.limit);
            records
        }
        Some(Err(e)) => {
            tracing::warn!(
                source = %content_type,
                error = %e,
                "Content source failed, continuing without it"
            );
            failed.push(content_type);
            Vec::new()
        }
    }
}
