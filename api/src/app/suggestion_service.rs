//! Friend suggestions
//!
//! Candidates are recently active authors the viewer is not yet friends with.
//! They are ranked by mutual friends, then by shared interests. Remaining ties
//! are broken by a seeded shuffle, so the same seed and the same source state
//! always give the same suggestions.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::feed_config::{MAX_CONCURRENT_PROFILE_LOOKUPS, MAX_SUGGESTION_CANDIDATES};
use crate::domain::entities::{FeedItem, SuggestedFriend, UserId};
use crate::domain::ports::ProfileProvider;

/// Recent activity of one candidate
#[derive(Debug, Clone)]
struct Candidate {
    user_id: UserId,
    author_name: String,
    post_count: i64,
    /// Lowercased tags and makes from the candidate's content
    signals: Vec<String>,
}

/// The viewer a suggestion list is built for
#[derive(Debug, Clone, Copy)]
pub struct SuggestionViewer<'a> {
    pub user_id: UserId,
    pub interests: &'a [String],
    pub friend_ids: &'a [UserId],
}

pub struct SuggestionService<PP>
where
    PP: ProfileProvider,
{
    profiles: Arc<PP>,
    seed: u64,
}

impl<PP> SuggestionService<PP>
where
    PP: ProfileProvider,
{
    pub fn new(profiles: Arc<PP>, seed: u64) -> Self {
        Self { profiles, seed }
    }

    /// Rank up to `count` people for the viewer from the authors of `recent`
    pub async fn suggest(
        &self,
        viewer: SuggestionViewer<'_>,
        recent: &[FeedItem],
        count: usize,
    ) -> Vec<SuggestedFriend> {
        if count == 0 {
            return Vec::new();
        }

        let mut candidates = collect_candidates(viewer, recent);
        let mut rng = StdRng::seed_from_u64(self.seed);
        candidates.shuffle(&mut rng);
        candidates.truncate(MAX_SUGGESTION_CANDIDATES);

        let viewer_friends: HashSet<UserId> = viewer.friend_ids.iter().copied().collect();
        let profiles = &self.profiles;

        let mut ranked: Vec<SuggestedFriend> = stream::iter(candidates)
            .map(|candidate| {
                let viewer_friends = &viewer_friends;
                async move {
                    let (friends, summary) = tokio::join!(
                        profiles.get_friend_ids(&candidate.user_id),
                        profiles.get_user_summary(&candidate.user_id),
                    );
                    let friends = friends.unwrap_or_else(|e| {
                        tracing::warn!(
                            user_id = %candidate.user_id,
                            error = %e,
                            "Friend lookup failed"
                        );
                        Vec::new()
                    });
                    let summary = summary.unwrap_or_else(|e| {
                        tracing::warn!(
                            user_id = %candidate.user_id,
                            error = %e,
                            "Profile lookup failed"
                        );
                        None
                    });

                    let mutual = friends.iter().filter(|f| viewer_friends.contains(f)).count();
                    let common = common_interests(viewer.interests, &candidate.signals);
                    let reason = suggestion_reason(mutual as i64, &common);

                    let (full_name, avatar_url, bio) = match summary {
                        Some(s) => (s.full_name, s.avatar_url, s.bio),
                        None => (candidate.author_name, None, None),
                    };

                    SuggestedFriend {
                        user_id: candidate.user_id,
                        full_name,
                        avatar_url,
                        bio,
                        mutual_friends_count: mutual as i64,
                        common_interests: common,
                        post_count: candidate.post_count,
                        suggestion_reason: reason,
                    }
                }
            })
            .buffered(MAX_CONCURRENT_PROFILE_LOOKUPS)
            .collect()
            .await;

        // Stable, so the seeded shuffle decides the remaining ties
        ranked.sort_by(|a, b| {
            b.mutual_friends_count
                .cmp(&a.mutual_friends_count)
                .then_with(|| b.common_interests.len().cmp(&a.common_interests.len()))
        });
        ranked.truncate(count);
        ranked
    }
}

fn collect_candidates(viewer: SuggestionViewer<'_>, recent: &[FeedItem]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();

    for item in recent {
        if item.author_id == viewer.user_id || viewer.friend_ids.contains(&item.author_id) {
            continue;
        }

        let position = candidates.iter().position(|c| c.user_id == item.author_id);
        let candidate = match position {
            Some(i) => &mut candidates[i],
            None => {
                candidates.push(Candidate {
                    user_id: item.author_id,
                    author_name: item.author_name.clone(),
                    post_count: 0,
                    signals: Vec::new(),
                });
                let last = candidates.len() - 1;
                &mut candidates[last]
            }
        };

        candidate.post_count += 1;
        candidate
            .signals
            .extend(item.tags.iter().map(|t| t.to_lowercase()));
        if let Some(make) = &item.car_make {
            candidate.signals.push(make.to_lowercase());
        }
    }

    candidates
}

/// Viewer interests found in any of the candidate's tags or makes
fn common_interests(interests: &[String], signals: &[String]) -> Vec<String> {
    interests
        .iter()
        .filter(|interest| {
            let needle = interest.to_lowercase();
            signals.iter().any(|s| s.contains(&needle))
        })
        .cloned()
        .collect()
}

fn suggestion_reason(mutual_friends: i64, common_interests: &[String]) -> String {
    match (mutual_friends, common_interests.first()) {
        (1, _) => "1 mutual friend".to_string(),
        (n, _) if n > 1 => format!("{} mutual friends", n),
        (_, Some(interest)) => format!("Also into {}", interest),
        _ => "Active in the community".to_string(),
    }
}
