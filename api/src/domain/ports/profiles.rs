//! Profile provider port trait
//!
//! Interests and the friend graph live in the user service; the feed engine
//! only reads them.

use async_trait::async_trait;

use crate::domain::entities::{UserId, UserSummary};
use crate::error::SourceError;

#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Interest keywords for a user (car makes, topics)
    async fn get_interests(&self, user_id: &UserId) -> Result<Vec<String>, SourceError>;

    /// Ids of the user's accepted friends
    async fn get_friend_ids(&self, user_id: &UserId) -> Result<Vec<UserId>, SourceError>;

    /// Display fields for a user, if the user exists
    async fn get_user_summary(&self, user_id: &UserId)
        -> Result<Option<UserSummary>, SourceError>;
}
