//! Feed statistics
//!
//! Read-only counters over a source snapshot.

use chrono::{DateTime, Utc};

use super::time_format::time_ago;
use crate::domain::entities::{ContentType, FeedItem, FeedStats, UserId};

/// Summarize `items` (a baseline-mapped snapshot) for the viewer
pub fn compute_stats(
    items: &[FeedItem],
    failed_sources: &[ContentType],
    friend_ids: &[UserId],
    now: DateTime<Utc>,
) -> FeedStats {
    let mut stats = FeedStats::empty(now);

    for item in items {
        match item.content_type {
            ContentType::News => stats.news_count += 1,
            ContentType::Review => stats.reviews_count += 1,
            ContentType::Qa => stats.qa_count += 1,
            ContentType::Story => {
                stats.stories_count += 1;
                if !item.is_expired {
                    stats.active_stories_count += 1;
                }
            }
        }

        if item.is_trending {
            stats.trending_items += 1;
        }
        if friend_ids.contains(&item.author_id) {
            stats.friends_items += 1;
        }

        stats.total_likes += item.like_count;
        stats.total_comments += item.comment_count;
        stats.total_shares += item.share_count;
        stats.total_views += item.view_count;
    }

    stats.total_items = items.len() as i64;
    stats.last_refresh_ago = time_ago(stats.last_refresh_at, now);
    stats.partial = !failed_sources.is_empty();
    stats.failed_sources = failed_sources.to_vec();
    stats
}
