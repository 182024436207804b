//! Feed item mapping
//!
//! Converts each source's native record into a [`FeedItem`], attaching the
//! computed fields: relevance, reason for showing, trending flag and score,
//! and the relative creation time.

use chrono::{DateTime, Utc};

use super::feed_config::{
    QUESTION_TRENDING_VOTE_SCORE, REVIEW_TRENDING_HELPFUL_COUNT, TRENDING_FLAG_BONUS,
};
use super::relevance_scorer::{reason_for_showing, relevance_score};
use super::time_format::{time_ago, time_remaining};
use crate::domain::entities::{
    ContentType, FeedItem, NewsArticle, Question, Review, Story, StoryFeedItem, VehicleInfo,
};

/// Viewer context applied to every mapped item
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub interests: &'a [String],
    pub now: DateTime<Utc>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(interests: &'a [String], now: DateTime<Utc>) -> Self {
        Self { interests, now }
    }

    /// No personalization; every item scores the baseline
    pub fn baseline(now: DateTime<Utc>) -> Self {
        Self { interests: &[], now }
    }
}

/// Popularity heuristic used by the trending feed
pub fn item_trending_score(item: &FeedItem) -> f64 {
    let mut score = item.like_count as f64
        + 2.0 * item.comment_count as f64
        + 3.0 * item.share_count as f64
        + item.view_count as f64 / 10.0;
    if item.is_trending {
        score += TRENDING_FLAG_BONUS;
    }
    score
}

/// Item with the fields shared by every content type, before scoring
fn blank_item(
    content_type: ContentType,
    vehicle: &VehicleInfo,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
) -> FeedItem {
    FeedItem {
        id: Default::default(),
        content_type,
        title: String::new(),
        body: String::new(),
        image_url: None,
        author_id: Default::default(),
        author_name: String::new(),
        view_count: 0,
        like_count: 0,
        comment_count: 0,
        share_count: 0,
        rating: None,
        tags: Vec::new(),
        car_make: vehicle.make.clone(),
        car_model: vehicle.model.clone(),
        car_year: vehicle.year,
        car_display_name: vehicle.display_name(),
        created_at,
        updated_at: updated_at.unwrap_or(created_at),
        time_ago: String::new(),
        relevance_score: 0.0,
        trending_score: 0.0,
        reason_for_showing: String::new(),
        is_trending: false,
        is_featured: false,
        is_answered: false,
        is_expired: false,
        initial_comments: Vec::new(),
    }
}

fn finish(mut item: FeedItem, ctx: &ScoringContext<'_>) -> FeedItem {
    item.relevance_score = relevance_score(&item.tags, item.car_make.as_deref(), ctx.interests);
    item.reason_for_showing =
        reason_for_showing(item.relevance_score, ctx.interests, &item.tags).to_string();
    item.trending_score = item_trending_score(&item);
    item.time_ago = time_ago(item.created_at, ctx.now);
    item
}

fn author_name(name: &Option<String>, content_type: ContentType) -> String {
    name.as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(content_type.default_author_name())
        .to_string()
}

pub fn map_news(article: &NewsArticle, ctx: &ScoringContext<'_>) -> FeedItem {
    let mut item = blank_item(
        ContentType::News,
        &article.vehicle,
        article.created_at,
        article.updated_at,
    );
    item.id = article.id;
    item.title = article.headline.clone();
    item.body = article
        .summary
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| article.body.clone());
    item.image_url = article.image_url.clone();
    item.author_id = article.author_id;
    item.author_name = author_name(&article.author_name, ContentType::News);
    item.view_count = article.view_count;
    item.like_count = article.like_count;
    item.comment_count = article.comment_count;
    item.share_count = article.share_count;
    item.tags = article.tags.clone();
    item.is_featured = article.is_featured;
    item.is_trending = article.is_featured;
    finish(item, ctx)
}

pub fn map_review(review: &Review, ctx: &ScoringContext<'_>) -> FeedItem {
    let mut item = blank_item(
        ContentType::Review,
        &review.vehicle,
        review.created_at,
        review.updated_at,
    );
    item.id = review.id;
    item.title = review.title.clone();
    item.body = review.comment.clone();
    item.author_id = review.reviewer_id;
    item.author_name = author_name(&review.reviewer_name, ContentType::Review);
    item.view_count = review.view_count;
    item.like_count = review.helpful_count;
    item.comment_count = review.reply_count;
    item.rating = review.rating;
    item.is_trending = review.helpful_count > REVIEW_TRENDING_HELPFUL_COUNT;
    finish(item, ctx)
}

pub fn map_question(question: &Question, ctx: &ScoringContext<'_>) -> FeedItem {
    let mut item = blank_item(
        ContentType::Qa,
        &question.vehicle,
        question.created_at,
        question.updated_at,
    );
    item.id = question.id;
    item.title = question.title.clone();
    item.body = question.body.clone();
    item.author_id = question.author_id;
    item.author_name = author_name(&question.author_name, ContentType::Qa);
    item.view_count = question.view_count;
    item.like_count = question.vote_score;
    item.comment_count = question.answer_count;
    item.tags = question.tags.clone();
    item.is_answered = question.is_solved;
    item.is_trending = question.vote_score > QUESTION_TRENDING_VOTE_SCORE;
    finish(item, ctx)
}

pub fn map_story(story: &Story, ctx: &ScoringContext<'_>) -> FeedItem {
    let mut item = blank_item(ContentType::Story, &story.vehicle, story.created_at, None);
    item.id = story.id;
    item.title = story.caption.clone().unwrap_or_default();
    item.body = story.caption.clone().unwrap_or_default();
    item.image_url = story
        .thumbnail_url
        .clone()
        .or_else(|| Some(story.media_url.clone()));
    item.author_id = story.author_id;
    item.author_name = author_name(&story.author_name, ContentType::Story);
    item.view_count = story.view_count;
    item.like_count = story.like_count;
    item.comment_count = story.reply_count;
    item.share_count = story.share_count;
    item.tags = story.tags.clone();
    item.is_featured = story.is_featured;
    item.is_trending = story.is_featured;
    item.is_expired = story.is_expired_at(ctx.now);
    finish(item, ctx)
}

/// Story as shown in the stories strip
pub fn story_feed_item(story: &Story, now: DateTime<Utc>) -> StoryFeedItem {
    StoryFeedItem {
        id: story.id,
        author_id: story.author_id,
        author_name: author_name(&story.author_name, ContentType::Story),
        caption: story.caption.clone(),
        media_url: story.media_url.clone(),
        thumbnail_url: story.thumbnail_url.clone(),
        tags: story.tags.clone(),
        car_display_name: story.vehicle.display_name(),
        location: story.location_name.clone(),
        view_count: story.view_count,
        like_count: story.like_count,
        created_at: story.created_at,
        expires_at: story.expires_at,
        time_remaining: time_remaining(story.expires_at, now),
        is_expired: story.is_expired_at(now),
    }
}
