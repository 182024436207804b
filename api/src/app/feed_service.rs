//! Feed service
//!
//! Orchestrates a feed request end to end: resolves the viewer's interests and
//! friends, aggregates the sources for the selected mode, orders and pages the
//! result, and attaches the side panels (stories, topics, suggestions, stats).
//!
//! Every public operation returns a complete value. Failed sources show up as
//! `partial`/`failed_sources`, a missing viewer or an invalid page size gives
//! an empty response, and profile failures fall back to baseline scoring.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};

use super::feed_aggregator::FeedAggregator;
use super::feed_config::{
    FeedSettings, FRIENDS_SUGGESTION_COUNT, FRIENDS_TOPIC_COUNT, INITIAL_COMMENTS_PER_ITEM,
    MAX_CONCURRENT_COMMENT_FETCHES, PERSONALIZED_SUGGESTION_COUNT, PERSONALIZED_TOPIC_COUNT,
    POPULAR_CONTENT_LIMIT, TRENDING_TOPIC_COUNT,
};
use super::feed_item_mapper::{story_feed_item, ScoringContext};
use super::feed_sorter::{sort_by_trending_score, sort_items};
use super::paginator::{has_more_content, paginate};
use super::stats_service::compute_stats;
use super::suggestion_service::{SuggestionService, SuggestionViewer};
use super::trending_service::extract_topics;
use crate::domain::entities::{
    CommentPage, ContentRef, ContentType, FeedItem, FeedMode, FeedRequest, FeedResponse,
    FeedStats, InteractionKind, InteractionOutcome, SortBy, StoryFeedItem, SuggestedFriend,
    TrendingTopic, UserId,
};
use crate::domain::ports::{
    InteractionClient, NewsSource, ProfileProvider, QuestionSource, ReviewSource, SourceFilter,
    StorySource,
};
use crate::error::SourceError;

/// What the engine knows about the viewer for one request
#[derive(Debug, Clone, Default)]
struct ViewerContext {
    viewer_id: Option<UserId>,
    interests: Vec<String>,
    friend_ids: Vec<UserId>,
}

impl ViewerContext {
    fn anonymous() -> Self {
        Self::default()
    }

    fn suggestion_viewer(&self) -> Option<SuggestionViewer<'_>> {
        self.viewer_id.map(|user_id| SuggestionViewer {
            user_id,
            interests: &self.interests,
            friend_ids: &self.friend_ids,
        })
    }
}

/// Topics, suggestions and stats computed from one snapshot
struct SidePanels {
    trending_topics: Vec<TrendingTopic>,
    suggested_friends: Vec<SuggestedFriend>,
    stats: FeedStats,
}

/// Per-mode policy
struct ModePlan {
    topic_count: usize,
    suggestion_count: usize,
}

impl ModePlan {
    fn for_mode(mode: FeedMode) -> Self {
        match mode {
            FeedMode::Personalized => Self {
                topic_count: PERSONALIZED_TOPIC_COUNT,
                suggestion_count: PERSONALIZED_SUGGESTION_COUNT,
            },
            FeedMode::Trending => Self {
                topic_count: TRENDING_TOPIC_COUNT,
                suggestion_count: 0,
            },
            FeedMode::Friends => Self {
                topic_count: FRIENDS_TOPIC_COUNT,
                suggestion_count: FRIENDS_SUGGESTION_COUNT,
            },
        }
    }
}

/// Service for assembling feeds and forwarding interactions
pub struct FeedService<NS, RS, QS, SS, PP, IC>
where
    NS: NewsSource,
    RS: ReviewSource,
    QS: QuestionSource,
    SS: StorySource,
    PP: ProfileProvider,
    IC: InteractionClient,
{
    aggregator: FeedAggregator<NS, RS, QS, SS>,
    profiles: Arc<PP>,
    interactions: Arc<IC>,
    suggestions: SuggestionService<PP>,
}

impl<NS, RS, QS, SS, PP, IC> FeedService<NS, RS, QS, SS, PP, IC>
where
    NS: NewsSource,
    RS: ReviewSource,
    QS: QuestionSource,
    SS: StorySource,
    PP: ProfileProvider,
    IC: InteractionClient,
{
    pub fn new(
        news: Arc<NS>,
        reviews: Arc<RS>,
        questions: Arc<QS>,
        stories: Arc<SS>,
        profiles: Arc<PP>,
        interactions: Arc<IC>,
        settings: FeedSettings,
    ) -> Self {
        let suggestions = SuggestionService::new(profiles.clone(), settings.suggestion_seed);
        Self {
            aggregator: FeedAggregator::new(news, reviews, questions, stories, settings),
            profiles,
            interactions,
            suggestions,
        }
    }

    fn settings(&self) -> &FeedSettings {
        self.aggregator.settings()
    }

    /// Interest-scored feed ordered by the requested sort
    pub async fn get_personalized_feed(&self, request: &FeedRequest) -> FeedResponse {
        self.get_feed_at(FeedMode::Personalized, request, Utc::now())
            .await
    }

    /// Unpersonalized feed ordered by trending score
    pub async fn get_trending_feed(&self, request: &FeedRequest) -> FeedResponse {
        self.get_feed_at(FeedMode::Trending, request, Utc::now())
            .await
    }

    /// Friend-authored content, newest first. Empty without a viewer.
    pub async fn get_friends_feed(&self, request: &FeedRequest) -> FeedResponse {
        self.get_feed_at(FeedMode::Friends, request, Utc::now())
            .await
    }

    pub async fn get_feed_at(
        &self,
        mode: FeedMode,
        request: &FeedRequest,
        now: DateTime<Utc>,
    ) -> FeedResponse {
        if request.page_size < 1 {
            tracing::debug!(page_size = request.page_size, "Invalid page size, empty feed");
            return FeedResponse::empty(mode, request.page, request.page_size, now);
        }

        let viewer = match mode {
            FeedMode::Personalized => self.resolve_viewer(request.viewer_id).await,
            FeedMode::Trending => ViewerContext::anonymous(),
            FeedMode::Friends => match request.viewer_id {
                Some(id) => self.resolve_viewer(Some(id)).await,
                None => {
                    tracing::debug!("Friends feed without a viewer, empty feed");
                    return FeedResponse::empty(mode, request.page, request.page_size, now);
                }
            },
        };

        let author_ids = match mode {
            FeedMode::Friends => Some(viewer.friend_ids.clone()),
            _ => None,
        };
        let plan = ModePlan::for_mode(mode);
        let enabled = request.enabled_types();
        let ctx = ScoringContext::new(&viewer.interests, now);

        let (aggregated, (stories, stories_failed), panels) = tokio::join!(
            self.aggregator.aggregate(&enabled, author_ids, &ctx),
            self.active_stories_at(now),
            self.side_panels(&viewer, &plan, now),
        );

        let mut items = aggregated.items;
        if !request.tags.is_empty() {
            items.retain(|item| item.has_any_tag(&request.tags));
        }

        match mode {
            FeedMode::Personalized => sort_items(&mut items, request.sort_by),
            FeedMode::Trending => sort_by_trending_score(&mut items),
            FeedMode::Friends => sort_items(&mut items, SortBy::Newest),
        }

        let total = items.len();
        let (mut page_items, pagination) = paginate(items, request.page, request.page_size);
        self.load_initial_comments(&mut page_items).await;

        let mut failed_sources = aggregated.failed_sources;
        if stories_failed {
            failed_sources.push(ContentType::Story);
        }
        failed_sources.sort();
        failed_sources.dedup();

        tracing::debug!(
            mode = %mode,
            total,
            page = pagination.current_page,
            failed = failed_sources.len(),
            "Assembled feed"
        );

        FeedResponse {
            mode,
            feed_items: page_items,
            stories,
            trending_topics: panels.trending_topics,
            suggested_friends: panels.suggested_friends,
            pagination,
            stats: panels.stats,
            has_more_content: has_more_content(request.page, request.page_size, total),
            partial: !failed_sources.is_empty(),
            failed_sources,
        }
    }

    /// Unexpired stories, newest first
    pub async fn get_active_stories(&self, viewer_id: Option<UserId>) -> Vec<StoryFeedItem> {
        tracing::debug!(viewer_id = ?viewer_id, "Loading active stories");
        self.active_stories_at(Utc::now()).await.0
    }

    pub async fn get_trending_topics(&self, count: usize) -> Vec<TrendingTopic> {
        self.get_trending_topics_at(count, Utc::now()).await
    }

    pub async fn get_trending_topics_at(
        &self,
        count: usize,
        now: DateTime<Utc>,
    ) -> Vec<TrendingTopic> {
        let snapshot = self.aggregator.snapshot(&SourceFilter::default()).await;
        let items = snapshot.to_items(&ScoringContext::baseline(now));
        extract_topics(&items, count, now)
    }

    pub async fn get_suggested_friends(
        &self,
        viewer_id: UserId,
        count: usize,
    ) -> Vec<SuggestedFriend> {
        let now = Utc::now();
        let all = SourceFilter::default();
        let (viewer, snapshot) = tokio::join!(
            self.resolve_viewer(Some(viewer_id)),
            self.aggregator.snapshot(&all),
        );
        let items = snapshot.to_items(&ScoringContext::baseline(now));
        match viewer.suggestion_viewer() {
            Some(v) => self.suggestions.suggest(v, &items, count).await,
            None => Vec::new(),
        }
    }

    pub async fn get_feed_stats(&self, viewer_id: Option<UserId>) -> FeedStats {
        self.get_feed_stats_at(viewer_id, Utc::now()).await
    }

    pub async fn get_feed_stats_at(
        &self,
        viewer_id: Option<UserId>,
        now: DateTime<Utc>,
    ) -> FeedStats {
        let all = SourceFilter::default();
        let (viewer, snapshot) = tokio::join!(
            self.resolve_viewer(viewer_id),
            self.aggregator.snapshot(&all),
        );
        let items = snapshot.to_items(&ScoringContext::baseline(now));
        compute_stats(&items, &snapshot.failed_sources, &viewer.friend_ids, now)
    }

    /// Most engaged items created within the last `hours`
    pub async fn get_popular_content(
        &self,
        hours: i64,
        viewer_id: Option<UserId>,
    ) -> Vec<FeedItem> {
        self.get_popular_content_at(hours, viewer_id, Utc::now())
            .await
    }

    pub async fn get_popular_content_at(
        &self,
        hours: i64,
        viewer_id: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Vec<FeedItem> {
        if hours < 1 {
            return Vec::new();
        }

        // A window reaching past the representable range means no lower bound
        let since = Duration::try_hours(hours).and_then(|span| now.checked_sub_signed(span));
        let filter = match since {
            Some(since) => SourceFilter::default().since(since),
            None => SourceFilter::default(),
        };
        let (viewer, snapshot) = tokio::join!(
            self.resolve_viewer(viewer_id),
            self.aggregator.snapshot(&filter),
        );

        let mut items = snapshot.to_items(&ScoringContext::new(&viewer.interests, now));
        items.sort_by_key(|i| std::cmp::Reverse(i.like_count + i.comment_count + i.view_count));
        items.truncate(POPULAR_CONTENT_LIMIT);
        items
    }

    pub async fn mark_as_seen(&self, viewer_id: UserId, target: ContentRef) -> InteractionOutcome {
        relay(
            "mark_seen",
            self.interactions.mark_seen(&viewer_id, &target).await,
        )
    }

    /// Like, share or bookmark
    pub async fn record_interaction(
        &self,
        viewer_id: UserId,
        target: ContentRef,
        kind: InteractionKind,
    ) -> InteractionOutcome {
        relay(
            "record",
            self.interactions.record(&viewer_id, &target, kind).await,
        )
    }

    pub async fn bookmark(&self, viewer_id: UserId, target: ContentRef) -> InteractionOutcome {
        self.record_interaction(viewer_id, target, InteractionKind::Bookmark)
            .await
    }

    pub async fn add_comment(
        &self,
        viewer_id: UserId,
        target: ContentRef,
        body: &str,
    ) -> InteractionOutcome {
        let body = body.trim();
        if body.is_empty() {
            return InteractionOutcome::failed("Comment cannot be empty");
        }
        relay(
            "add_comment",
            self.interactions
                .add_comment(&viewer_id, &target, body)
                .await
                .map(|_| ()),
        )
    }

    pub async fn get_comments(&self, target: ContentRef, page: i64, page_size: i64) -> CommentPage {
        match self
            .interactions
            .get_comments(&target, page.max(1), page_size.max(1))
            .await
        {
            Ok(comments) => CommentPage {
                comments,
                available: true,
            },
            Err(e) => {
                tracing::warn!(
                    content_id = %target.content_id,
                    error = %e,
                    "Failed to load comments"
                );
                CommentPage {
                    comments: Vec::new(),
                    available: false,
                }
            }
        }
    }

    pub async fn hide(&self, viewer_id: UserId, target: ContentRef) -> InteractionOutcome {
        relay("hide", self.interactions.hide(&viewer_id, &target).await)
    }

    pub async fn report(
        &self,
        viewer_id: UserId,
        target: ContentRef,
        reason: &str,
    ) -> InteractionOutcome {
        relay(
            "report",
            self.interactions.report(&viewer_id, &target, reason).await,
        )
    }

    /// Interests and friends for the viewer; lookups that fail are treated as empty
    async fn resolve_viewer(&self, viewer_id: Option<UserId>) -> ViewerContext {
        let Some(viewer_id) = viewer_id else {
            return ViewerContext::anonymous();
        };

        let (interests, friend_ids) = tokio::join!(
            self.profiles.get_interests(&viewer_id),
            self.profiles.get_friend_ids(&viewer_id),
        );

        ViewerContext {
            viewer_id: Some(viewer_id),
            interests: interests.unwrap_or_else(|e| {
                tracing::warn!(
                    viewer_id = %viewer_id,
                    error = %e,
                    "Interest lookup failed, using baseline scoring"
                );
                Vec::new()
            }),
            friend_ids: friend_ids.unwrap_or_else(|e| {
                tracing::warn!(viewer_id = %viewer_id, error = %e, "Friend lookup failed");
                Vec::new()
            }),
        }
    }

    /// Unexpired stories plus whether the story source failed
    async fn active_stories_at(&self, now: DateTime<Utc>) -> (Vec<StoryFeedItem>, bool) {
        match self
            .aggregator
            .stories(self.settings().active_stories_limit)
            .await
        {
            Ok(stories) => {
                let mut active: Vec<StoryFeedItem> = stories
                    .iter()
                    .filter(|s| !s.is_expired_at(now))
                    .map(|s| story_feed_item(s, now))
                    .collect();
                active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                (active, false)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Story source failed, no stories strip");
                (Vec::new(), true)
            }
        }
    }

    async fn side_panels(
        &self,
        viewer: &ViewerContext,
        plan: &ModePlan,
        now: DateTime<Utc>,
    ) -> SidePanels {
        let snapshot = self.aggregator.snapshot(&SourceFilter::default()).await;
        let items = snapshot.to_items(&ScoringContext::baseline(now));

        let trending_topics = extract_topics(&items, plan.topic_count, now);
        let stats = compute_stats(&items, &snapshot.failed_sources, &viewer.friend_ids, now);
        let suggested_friends = match viewer.suggestion_viewer() {
            Some(v) if plan.suggestion_count > 0 => {
                self.suggestions
                    .suggest(v, &items, plan.suggestion_count)
                    .await
            }
            _ => Vec::new(),
        };

        SidePanels {
            trending_topics,
            suggested_friends,
            stats,
        }
    }

    /// Attach the first few comments to each item on the page
    async fn load_initial_comments(&self, items: &mut [FeedItem]) {
        let targets: Vec<ContentRef> = items
            .iter()
            .map(|i| ContentRef {
                content_id: i.id,
                content_type: i.content_type,
            })
            .collect();

        let interactions = &self.interactions;
        let comments: Vec<_> = stream::iter(targets)
            .map(|target| async move {
                interactions
                    .get_comments(&target, 1, INITIAL_COMMENTS_PER_ITEM)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::debug!(
                            content_id = %target.content_id,
                            error = %e,
                            "No initial comments"
                        );
                        Vec::new()
                    })
            })
            .buffered(MAX_CONCURRENT_COMMENT_FETCHES)
            .collect()
            .await;

        for (item, mut loaded) in items.iter_mut().zip(comments) {
            loaded.truncate(INITIAL_COMMENTS_PER_ITEM as usize);
            item.initial_comments = loaded;
        }
    }
}

/// Turn a forwarded call's result into an outcome, logging failures
fn relay(action: &str, result: Result<(), SourceError>) -> InteractionOutcome {
    match result {
        Ok(()) => InteractionOutcome::ok(),
        Err(e) => {
            tracing::warn!(action, error = %e, "Interaction service call failed");
            InteractionOutcome::failed(e.to_string())
        }
    }
}
