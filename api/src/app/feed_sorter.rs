//! Feed ordering
//!
//! Pure orderings over the merged list. All sorts are stable, so ties keep
//! their aggregation order.

use std::cmp::Ordering;

use crate::domain::entities::{FeedItem, SortBy};

fn desc_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Order items by the requested key
pub fn sort_items(items: &mut [FeedItem], sort_by: SortBy) {
    match sort_by {
        SortBy::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Popular => items.sort_by_key(|i| std::cmp::Reverse(i.popularity())),
        SortBy::Trending => items.sort_by(|a, b| {
            b.is_trending
                .cmp(&a.is_trending)
                .then_with(|| desc_f64(a.relevance_score, b.relevance_score))
        }),
        SortBy::Engagement => items.sort_by_key(|i| std::cmp::Reverse(i.engagement())),
        SortBy::Relevance => items.sort_by(|a, b| desc_f64(a.relevance_score, b.relevance_score)),
    }
}

/// Trending-mode ordering: trending score, then the trending flag, then relevance
pub fn sort_by_trending_score(items: &mut [FeedItem]) {
    items.sort_by(|a, b| {
        desc_f64(a.trending_score, b.trending_score)
            .then_with(|| b.is_trending.cmp(&a.is_trending))
            .then_with(|| desc_f64(a.relevance_score, b.relevance_score))
    });
}
