//! End-to-end tests for the feed engine
//!
//! Each test wires a `FeedService` to in-memory sources and drives it through
//! the public operations only, the way the HTTP handlers do.
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::app::feed_sorter::sort_items;
    use crate::app::feed_config::FeedSettings;
    use crate::app::FeedService;
    use crate::domain::entities::{
        ContentType, FeedItem, FeedMode, FeedRequest, PaginationInfo, SortBy, UserId,
        VehicleInfo,
    };
    use crate::test_utils::{
        test_feed_item, test_feed_service, test_news, test_question, test_review, test_story,
        InMemoryNewsSource, InMemoryProfileProvider, InMemoryQuestionSource,
        InMemoryReviewSource, InMemoryStorySource, MockInteractionClient, TestFeedService,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn day(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 9, 0, 0).unwrap()
    }

    fn service_with_news(
        news: InMemoryNewsSource,
        profiles: InMemoryProfileProvider,
    ) -> TestFeedService {
        test_feed_service(
            news,
            InMemoryReviewSource::new(vec![]),
            InMemoryQuestionSource::new(vec![]),
            InMemoryStorySource::new(vec![]),
            profiles,
            MockInteractionClient::new(),
        )
    }

    /// Interests BMW and Racing against a Racing-tagged BMW article
    #[tokio::test]
    async fn matching_tag_and_make_scores_95() {
        let now = now();
        let viewer = UserId::new();

        let mut article = test_news("New M3 track package", now - Duration::hours(1));
        article.tags = vec!["Racing".to_string(), "Maintenance".to_string()];
        article.vehicle = VehicleInfo {
            make: Some("BMW".to_string()),
            model: Some("M3".to_string()),
            year: Some(2024),
        };

        let profiles = InMemoryProfileProvider::new()
            .with_interests(viewer, vec!["BMW".to_string(), "Racing".to_string()]);
        let service = service_with_news(InMemoryNewsSource::new(vec![article]), profiles);

        let response = service
            .get_feed_at(FeedMode::Personalized, &FeedRequest::for_viewer(viewer), now)
            .await;

        assert_eq!(response.feed_items.len(), 1);
        let item = &response.feed_items[0];
        assert_eq!(item.relevance_score, 95.0);
        assert_eq!(item.reason_for_showing, "Matches your interests");
        assert_eq!(item.car_display_name, "2024 BMW M3");
        assert!(!response.partial);
    }

    #[tokio::test]
    async fn newest_sort_orders_by_creation_date() {
        let now = now();
        let news = vec![
            test_news("January", day(1, 1)),
            test_news("March", day(3, 1)),
            test_news("February", day(2, 1)),
        ];
        let service = service_with_news(
            InMemoryNewsSource::new(news),
            InMemoryProfileProvider::new(),
        );

        let request = FeedRequest {
            sort_by: SortBy::Newest,
            ..FeedRequest::default()
        };
        let response = service
            .get_feed_at(FeedMode::Personalized, &request, now)
            .await;

        let titles: Vec<&str> = response
            .feed_items
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["March", "February", "January"]);
    }

    #[tokio::test]
    async fn second_page_of_twenty_five() {
        let now = now();
        let news = (0..25)
            .map(|i| test_news(&format!("Article {}", i), now - Duration::minutes(i)))
            .collect();
        // Lift the default per-source cap so all 25 articles make it in
        let settings = FeedSettings {
            news_limit: 25,
            ..FeedSettings::default()
        };
        let service = FeedService::new(
            Arc::new(InMemoryNewsSource::new(news)),
            Arc::new(InMemoryReviewSource::new(vec![])),
            Arc::new(InMemoryQuestionSource::new(vec![])),
            Arc::new(InMemoryStorySource::new(vec![])),
            Arc::new(InMemoryProfileProvider::new()),
            Arc::new(MockInteractionClient::new()),
            settings,
        );

        let request = FeedRequest {
            sort_by: SortBy::Newest,
            page: 2,
            page_size: 10,
            ..FeedRequest::default()
        };
        let response = service
            .get_feed_at(FeedMode::Personalized, &request, now)
            .await;

        assert_eq!(
            response.pagination,
            PaginationInfo {
                current_page: 2,
                page_size: 10,
                total_items: 25,
                total_pages: 3,
                has_previous_page: true,
                has_next_page: true,
                start_item: 11,
                end_item: 20,
            }
        );
        assert_eq!(response.feed_items.len(), 10);
        assert_eq!(response.feed_items[0].title, "Article 10");
        assert!(response.has_more_content);
    }

    #[tokio::test]
    async fn friends_feed_without_viewer_is_empty() {
        let now = now();
        let service = service_with_news(
            InMemoryNewsSource::new(vec![test_news("Anyone", now)]),
            InMemoryProfileProvider::new(),
        );

        let response = service
            .get_feed_at(FeedMode::Friends, &FeedRequest::default(), now)
            .await;

        assert!(response.feed_items.is_empty());
        assert_eq!(response.pagination.total_items, 0);
        assert_eq!(response.mode, FeedMode::Friends);
        assert!(!response.partial);
    }

    #[tokio::test]
    async fn story_countdown_then_expiry() {
        let now = now();
        let story = test_story(now - Duration::hours(23), now + Duration::minutes(10));
        let service = test_feed_service(
            InMemoryNewsSource::new(vec![]),
            InMemoryReviewSource::new(vec![]),
            InMemoryQuestionSource::new(vec![]),
            InMemoryStorySource::new(vec![story]),
            InMemoryProfileProvider::new(),
            MockInteractionClient::new(),
        );

        let before = service
            .get_feed_at(FeedMode::Personalized, &FeedRequest::default(), now)
            .await;
        assert_eq!(before.stories.len(), 1);
        assert_eq!(before.stories[0].time_remaining, "10m left");

        let after = service
            .get_feed_at(
                FeedMode::Personalized,
                &FeedRequest::default(),
                now + Duration::minutes(11),
            )
            .await;
        assert!(after.stories.is_empty());
    }

    #[tokio::test]
    async fn expired_stories_are_not_active() {
        let created = Utc::now() - Duration::hours(30);
        let expired = test_story(created, created + Duration::hours(24));
        let service = test_feed_service(
            InMemoryNewsSource::new(vec![]),
            InMemoryReviewSource::new(vec![]),
            InMemoryQuestionSource::new(vec![]),
            InMemoryStorySource::new(vec![expired]),
            InMemoryProfileProvider::new(),
            MockInteractionClient::new(),
        );

        assert!(service.get_active_stories(None).await.is_empty());
    }

    #[tokio::test]
    async fn failing_reviews_leave_a_partial_feed() {
        let now = now();
        let service = test_feed_service(
            InMemoryNewsSource::new(vec![test_news("Headline", now)]),
            InMemoryReviewSource::failing(),
            InMemoryQuestionSource::new(vec![test_question("Oil type?", now)]),
            InMemoryStorySource::new(vec![test_story(now, now + Duration::hours(12))]),
            InMemoryProfileProvider::new(),
            MockInteractionClient::new(),
        );

        let response = service
            .get_feed_at(FeedMode::Personalized, &FeedRequest::default(), now)
            .await;

        let mut types: Vec<ContentType> =
            response.feed_items.iter().map(|i| i.content_type).collect();
        types.sort();
        assert_eq!(
            types,
            vec![ContentType::News, ContentType::Qa, ContentType::Story]
        );
        assert!(response.partial);
        assert_eq!(response.failed_sources, vec![ContentType::Review]);
        assert!(response.stats.partial);
    }

    #[tokio::test]
    async fn friends_feed_only_shows_friends() {
        let now = now();
        let viewer = UserId::new();
        let friend = UserId::new();

        let mut by_friend = test_news("From a friend", now);
        by_friend.author_id = friend;
        let stranger_news = test_news("From a stranger", now);
        let mut friend_review = test_review("Friend's review", now - Duration::hours(1));
        friend_review.reviewer_id = friend;
        let stranger_review = test_review("Stranger's review", now);

        let service = test_feed_service(
            InMemoryNewsSource::new(vec![by_friend, stranger_news]),
            InMemoryReviewSource::new(vec![stranger_review, friend_review]),
            InMemoryQuestionSource::new(vec![test_question("Stranger asks", now)]),
            InMemoryStorySource::new(vec![]),
            InMemoryProfileProvider::new().with_friends(viewer, vec![friend]),
            MockInteractionClient::new(),
        );

        let response = service
            .get_feed_at(FeedMode::Friends, &FeedRequest::for_viewer(viewer), now)
            .await;

        assert_eq!(response.feed_items.len(), 2);
        assert!(response.feed_items.iter().all(|i| i.author_id == friend));
        assert_eq!(response.feed_items[0].title, "From a friend");
        assert_eq!(response.stats.friends_items, 2);
    }

    #[tokio::test]
    async fn friends_feed_with_no_friends_is_empty() {
        let now = now();
        let viewer = UserId::new();
        let news = InMemoryNewsSource::new(vec![test_news("Someone", now)]);
        let service = service_with_news(news, InMemoryProfileProvider::new());

        let response = service
            .get_feed_at(FeedMode::Friends, &FeedRequest::for_viewer(viewer), now)
            .await;

        assert!(response.feed_items.is_empty());
        assert_eq!(response.pagination.total_items, 0);
    }

    #[test]
    fn sorting_twice_gives_the_same_order() {
        let now = now();
        let items: Vec<FeedItem> = (0..12)
            .map(|i| {
                let mut item = test_feed_item(&format!("item {}", i), now - Duration::hours(i % 3));
                item.like_count = i % 4;
                item.comment_count = i % 2;
                item.is_trending = i % 5 == 0;
                item.relevance_score = 50.0 + (i % 3) as f64 * 10.0;
                item
            })
            .collect();

        for sort_by in [
            SortBy::Newest,
            SortBy::Popular,
            SortBy::Trending,
            SortBy::Engagement,
            SortBy::Relevance,
        ] {
            let mut once = items.clone();
            sort_items(&mut once, sort_by);
            let mut twice = once.clone();
            sort_items(&mut twice, sort_by);

            let ids = |v: &[FeedItem]| v.iter().map(|i| i.id).collect::<Vec<_>>();
            assert_eq!(ids(&once), ids(&twice), "unstable under {}", sort_by);
        }
    }

    #[tokio::test]
    async fn relevance_stays_in_bounds() {
        let now = now();
        let viewer = UserId::new();

        let mut article = test_news("Everything matches", now);
        article.tags = vec!["BMW".to_string(), "Racing".to_string(), "Track".to_string()];
        article.vehicle.make = Some("BMW".to_string());

        let profiles = InMemoryProfileProvider::new().with_interests(
            viewer,
            vec!["BMW".to_string(), "Racing".to_string(), "Track".to_string()],
        );
        let service = service_with_news(InMemoryNewsSource::new(vec![article]), profiles);

        let response = service
            .get_feed_at(FeedMode::Personalized, &FeedRequest::for_viewer(viewer), now)
            .await;

        let score = response.feed_items[0].relevance_score;
        assert!((0.0..=100.0).contains(&score));
    }
}
