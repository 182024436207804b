//! Relevance scoring
//!
//! Deterministic, rule-based affinity between a viewer's interests and a piece
//! of content. No I/O, no state.

use super::feed_config::{
    BASE_RELEVANCE_SCORE, CAR_MAKE_MATCH_BOOST, MAX_RELEVANCE_SCORE, SIMILAR_MATCH_THRESHOLD,
    STRONG_MATCH_THRESHOLD, TAG_MATCH_BOOST,
};

/// Score a content item against the viewer's interests, in [0, 100].
///
/// For each interest, +20 if any tag contains it and +25 if the car make
/// contains it (case-insensitive substring match).
pub fn relevance_score(
    content_tags: &[String],
    car_make: Option<&str>,
    interests: &[String],
) -> f64 {
    let tags: Vec<String> = content_tags.iter().map(|t| t.to_lowercase()).collect();
    let make = car_make.map(|m| m.to_lowercase());

    let mut score = BASE_RELEVANCE_SCORE;
    for interest in interests {
        let interest = interest.to_lowercase();

        if tags.iter().any(|t| t.contains(&interest)) {
            score += TAG_MATCH_BOOST;
        }

        if make.as_deref().is_some_and(|m| m.contains(&interest)) {
            score += CAR_MAKE_MATCH_BOOST;
        }
    }

    score.clamp(0.0, MAX_RELEVANCE_SCORE)
}

/// Human-readable reason an item was shown
pub fn reason_for_showing(
    score: f64,
    interests: &[String],
    content_tags: &[String],
) -> &'static str {
    if score > STRONG_MATCH_THRESHOLD {
        "Matches your interests"
    } else if score > SIMILAR_MATCH_THRESHOLD {
        "Similar to content you liked"
    } else if content_tags.iter().any(|t| interests.contains(t)) {
        "Based on your preferences"
    } else {
        "Trending in community"
    }
}
