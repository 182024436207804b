//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::mocks::{
    InMemoryNewsSource, InMemoryProfileProvider, InMemoryQuestionSource, InMemoryReviewSource,
    InMemoryStorySource, MockInteractionClient,
};
use crate::app::feed_config::FeedSettings;
use crate::app::FeedService;
use crate::domain::entities::{
    Comment, ContentId, ContentType, FeedItem, NewsArticle, Question, Review, Story, UserId,
    VehicleInfo,
};

/// Feed service wired entirely to in-memory collaborators
pub type TestFeedService = FeedService<
    InMemoryNewsSource,
    InMemoryReviewSource,
    InMemoryQuestionSource,
    InMemoryStorySource,
    InMemoryProfileProvider,
    MockInteractionClient,
>;

/// Create a feed service with default settings over the given mocks
pub fn test_feed_service(
    news: InMemoryNewsSource,
    reviews: InMemoryReviewSource,
    questions: InMemoryQuestionSource,
    stories: InMemoryStorySource,
    profiles: InMemoryProfileProvider,
    interactions: MockInteractionClient,
) -> TestFeedService {
    FeedService::new(
        Arc::new(news),
        Arc::new(reviews),
        Arc::new(questions),
        Arc::new(stories),
        Arc::new(profiles),
        Arc::new(interactions),
        FeedSettings::default(),
    )
}

/// Create a test news article with no tags, make or engagement
pub fn test_news(headline: &str, created_at: DateTime<Utc>) -> NewsArticle {
    NewsArticle {
        id: ContentId::new(),
        headline: headline.to_string(),
        body: format!("{} - full article", headline),
        summary: None,
        image_url: None,
        author_id: UserId::new(),
        author_name: Some("Test Journalist".to_string()),
        category: None,
        tags: Vec::new(),
        vehicle: VehicleInfo::default(),
        view_count: 0,
        like_count: 0,
        comment_count: 0,
        share_count: 0,
        is_featured: false,
        created_at,
        updated_at: None,
    }
}

/// Create a test review
pub fn test_review(title: &str, created_at: DateTime<Utc>) -> Review {
    Review {
        id: ContentId::new(),
        title: title.to_string(),
        comment: format!("{} - review body", title),
        reviewer_id: UserId::new(),
        reviewer_name: Some("Test Reviewer".to_string()),
        rating: Some(4.0),
        vehicle: VehicleInfo::default(),
        view_count: 0,
        helpful_count: 0,
        reply_count: 0,
        created_at,
        updated_at: None,
    }
}

/// Create a test question
pub fn test_question(title: &str, created_at: DateTime<Utc>) -> Question {
    Question {
        id: ContentId::new(),
        title: title.to_string(),
        body: format!("{} - details", title),
        author_id: UserId::new(),
        author_name: Some("Test Asker".to_string()),
        tags: Vec::new(),
        vehicle: VehicleInfo::default(),
        view_count: 0,
        vote_score: 0,
        answer_count: 0,
        is_solved: false,
        created_at,
        updated_at: None,
    }
}

/// Create a test story
pub fn test_story(created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Story {
    Story {
        id: ContentId::new(),
        caption: Some("Sunday drive".to_string()),
        media_url: "https://cdn.example.com/story.jpg".to_string(),
        thumbnail_url: None,
        author_id: UserId::new(),
        author_name: Some("Test Storyteller".to_string()),
        tags: Vec::new(),
        vehicle: VehicleInfo::default(),
        location_name: None,
        view_count: 0,
        like_count: 0,
        reply_count: 0,
        share_count: 0,
        is_featured: false,
        created_at,
        expires_at,
    }
}

/// Create a test comment
pub fn test_comment(content: &str, created_at: DateTime<Utc>) -> Comment {
    Comment {
        id: ContentId::new(),
        author_id: UserId::new(),
        author_name: "Test Commenter".to_string(),
        author_avatar: None,
        content: content.to_string(),
        like_count: 0,
        created_at,
    }
}

/// Create a bare feed item with baseline relevance and no engagement
pub fn test_feed_item(title: &str, created_at: DateTime<Utc>) -> FeedItem {
    FeedItem {
        id: ContentId::new(),
        content_type: ContentType::News,
        title: title.to_string(),
        body: String::new(),
        image_url: None,
        author_id: UserId::new(),
        author_name: "Test Author".to_string(),
        view_count: 0,
        like_count: 0,
        comment_count: 0,
        share_count: 0,
        rating: None,
        tags: Vec::new(),
        car_make: None,
        car_model: None,
        car_year: None,
        car_display_name: String::new(),
        created_at,
        updated_at: created_at,
        time_ago: "Just now".to_string(),
        relevance_score: 50.0,
        trending_score: 0.0,
        reason_for_showing: "Trending in community".to_string(),
        is_trending: false,
        is_featured: false,
        is_answered: false,
        is_expired: false,
        initial_comments: Vec::new(),
    }
}
