//! Interaction service client
//!
//! Thin forwarding of reactions, comments and moderation actions.

use async_trait::async_trait;
use serde::Serialize;
use urlencoding::encode;

use super::service_client::ServiceClient;
use crate::domain::entities::{Comment, ContentRef, InteractionKind, UserId};
use crate::domain::ports::InteractionClient;
use crate::error::SourceError;

pub struct InteractionServiceClient {
    service: ServiceClient,
}

impl InteractionServiceClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    fn comments_url(&self, target: &ContentRef, page: i64, page_size: i64) -> String {
        format!(
            "{}?content_type={}&page={}&page_size={}",
            self.service
                .api_url(&format!("/content/{}/comments", target.content_id)),
            encode(&target.content_type.to_string()),
            page,
            page_size
        )
    }
}

/// Request types for the interaction service
#[derive(Serialize)]
struct TargetedRequest<'a> {
    viewer_id: &'a UserId,
    #[serde(flatten)]
    target: &'a ContentRef,
}

#[derive(Serialize)]
struct RecordRequest<'a> {
    viewer_id: &'a UserId,
    #[serde(flatten)]
    target: &'a ContentRef,
    kind: InteractionKind,
}

#[derive(Serialize)]
struct CommentRequest<'a> {
    viewer_id: &'a UserId,
    #[serde(flatten)]
    target: &'a ContentRef,
    content: &'a str,
}

#[derive(Serialize)]
struct ReportRequest<'a> {
    viewer_id: &'a UserId,
    #[serde(flatten)]
    target: &'a ContentRef,
    reason: &'a str,
}

#[async_trait]
impl InteractionClient for InteractionServiceClient {
    async fn mark_seen(&self, viewer_id: &UserId, target: &ContentRef) -> Result<(), SourceError> {
        self.service
            .post_empty(
                &self.service.api_url("/interactions/seen"),
                &TargetedRequest { viewer_id, target },
            )
            .await
    }

    async fn record(
        &self,
        viewer_id: &UserId,
        target: &ContentRef,
        kind: InteractionKind,
    ) -> Result<(), SourceError> {
        self.service
            .post_empty(
                &self.service.api_url("/interactions"),
                &RecordRequest {
                    viewer_id,
                    target,
                    kind,
                },
            )
            .await
    }

    async fn add_comment(
        &self,
        viewer_id: &UserId,
        target: &ContentRef,
        body: &str,
    ) -> Result<Comment, SourceError> {
        self.service
            .post_json(
                &self.service.api_url("/comments"),
                &CommentRequest {
                    viewer_id,
                    target,
                    content: body,
                },
            )
            .await
    }

    async fn get_comments(
        &self,
        target: &ContentRef,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Comment>, SourceError> {
        self.service
            .get_json(&self.comments_url(target, page, page_size))
            .await
    }

    async fn hide(&self, viewer_id: &UserId, target: &ContentRef) -> Result<(), SourceError> {
        self.service
            .post_empty(
                &self.service.api_url("/interactions/hide"),
                &TargetedRequest { viewer_id, target },
            )
            .await
    }

    async fn report(
        &self,
        viewer_id: &UserId,
        target: &ContentRef,
        reason: &str,
    ) -> Result<(), SourceError> {
        self.service
            .post_empty(
                &self.service.api_url("/reports"),
                &ReportRequest {
                    viewer_id,
                    target,
                    reason,
                },
            )
            .await
    }
}
