//! Trending topic extraction
//!
//! Topics are recomputed from the current source snapshot on every call:
//! popular news tags make up half the list, popular car makes the rest.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::time_format::time_ago;
use crate::domain::entities::{ContentType, FeedItem, TopicCategory, TrendingTopic};

/// Base of the topic trending score
const TOPIC_BASE_SCORE: f64 = 40.0;

/// Added per post carrying the topic
const TOPIC_POST_WEIGHT: f64 = 5.0;

/// Topic trending score ceiling
const TOPIC_MAX_SCORE: f64 = 100.0;

/// Running totals for one candidate topic
#[derive(Debug)]
struct Tally {
    label: String,
    first_seen: usize,
    post_count: i64,
    engagement_count: i64,
    last_activity_at: DateTime<Utc>,
}

impl Tally {
    fn into_topic(self, category: TopicCategory, now: DateTime<Utc>) -> TrendingTopic {
        let trending_score = topic_score(self.post_count, self.engagement_count);
        TrendingTopic {
            topic: self.label,
            category,
            post_count: self.post_count,
            engagement_count: self.engagement_count,
            trending_score,
            trending_reason: category.trending_reason().to_string(),
            last_activity_at: self.last_activity_at,
            time_ago: time_ago(self.last_activity_at, now),
        }
    }
}

/// `min(100, 40 + 5 * posts + engagement / 10)`
pub fn topic_score(post_count: i64, engagement_count: i64) -> f64 {
    (TOPIC_BASE_SCORE + TOPIC_POST_WEIGHT * post_count as f64 + engagement_count as f64 / 10.0)
        .min(TOPIC_MAX_SCORE)
}

/// Group labels case-insensitively, keeping the first spelling seen
fn tally<'a>(labelled: impl Iterator<Item = (&'a str, &'a FeedItem)>) -> Vec<Tally> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();

    for (label, item) in labelled {
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        let key = label.to_lowercase();
        let slot = *index.entry(key).or_insert_with(|| {
            tallies.push(Tally {
                label: label.to_string(),
                first_seen: tallies.len(),
                post_count: 0,
                engagement_count: 0,
                last_activity_at: item.created_at,
            });
            tallies.len() - 1
        });

        let t = &mut tallies[slot];
        t.post_count += 1;
        t.engagement_count += item.engagement();
        t.last_activity_at = t.last_activity_at.max(item.created_at);
    }

    // Most posts first, then engagement, then first appearance
    tallies.sort_by(|a, b| {
        b.post_count
            .cmp(&a.post_count)
            .then_with(|| b.engagement_count.cmp(&a.engagement_count))
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });
    tallies
}

/// Extract up to `count` topics, highest trending score first
pub fn extract_topics(items: &[FeedItem], count: usize, now: DateTime<Utc>) -> Vec<TrendingTopic> {
    let tag_slots = count / 2;
    let make_slots = count - tag_slots;

    let tags = tally(
        items
            .iter()
            .filter(|i| i.content_type == ContentType::News)
            .flat_map(|i| i.tags.iter().map(move |t| (t.as_str(), i))),
    );
    let makes = tally(
        items
            .iter()
            .filter_map(|i| i.car_make.as_deref().map(|m| (m, i))),
    );

    let mut topics: Vec<TrendingTopic> = tags
        .into_iter()
        .take(tag_slots)
        .map(|t| t.into_topic(TopicCategory::News, now))
        .chain(
            makes
                .into_iter()
                .take(make_slots)
                .map(|t| t.into_topic(TopicCategory::Cars, now)),
        )
        .collect();

    topics.sort_by(|a, b| {
        b.trending_score
            .partial_cmp(&a.trending_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    topics.truncate(count);
    topics
}
