//! Interaction client port trait
//!
//! All mutation (reactions, comments, bookmarks, hides, reports) belongs to the
//! interaction service. The feed engine forwards calls and relays the result.

use async_trait::async_trait;

use crate::domain::entities::{Comment, ContentRef, InteractionKind, UserId};
use crate::error::SourceError;

#[async_trait]
pub trait InteractionClient: Send + Sync {
    /// Record that the viewer has seen a piece of content
    async fn mark_seen(&self, viewer_id: &UserId, target: &ContentRef) -> Result<(), SourceError>;

    /// Like, share or bookmark a piece of content
    async fn record(
        &self,
        viewer_id: &UserId,
        target: &ContentRef,
        kind: InteractionKind,
    ) -> Result<(), SourceError>;

    /// Add a comment, returning the stored comment
    async fn add_comment(
        &self,
        viewer_id: &UserId,
        target: &ContentRef,
        body: &str,
    ) -> Result<Comment, SourceError>;

    /// List comments, oldest first
    async fn get_comments(
        &self,
        target: &ContentRef,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Comment>, SourceError>;

    /// Hide a piece of content from the viewer's feeds
    async fn hide(&self, viewer_id: &UserId, target: &ContentRef) -> Result<(), SourceError>;

    /// Report a piece of content for moderation
    async fn report(
        &self,
        viewer_id: &UserId,
        target: &ContentRef,
        reason: &str,
    ) -> Result<(), SourceError>;
}
