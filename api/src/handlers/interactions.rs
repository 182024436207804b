//! Interaction handlers
//!
//! Thin passthroughs to the interaction service. Each one needs a viewer and
//! answers with the relayed outcome.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::Viewer;
use crate::domain::entities::{
    CommentPage, ContentId, ContentRef, ContentType, InteractionKind, InteractionOutcome,
};
use crate::error::AppError;
use crate::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Body for seen, bookmark and hide
#[derive(Debug, Deserialize)]
pub struct TargetBody {
    pub content_id: ContentId,
    pub content_type: ContentType,
}

impl TargetBody {
    fn target(&self) -> ContentRef {
        ContentRef {
            content_id: self.content_id,
            content_type: self.content_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InteractBody {
    #[serde(flatten)]
    pub target: TargetBody,
    pub kind: InteractionKind,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    #[serde(flatten)]
    pub target: TargetBody,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportBody {
    #[serde(flatten)]
    pub target: TargetBody,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /feed/seen
pub async fn mark_seen(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(body): Json<TargetBody>,
) -> Result<Json<InteractionOutcome>, AppError> {
    let viewer_id = viewer.require()?;
    Ok(Json(
        state
            .feed_service
            .mark_as_seen(viewer_id, body.target())
            .await,
    ))
}

/// POST /feed/interact
pub async fn interact(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(body): Json<InteractBody>,
) -> Result<Json<InteractionOutcome>, AppError> {
    let viewer_id = viewer.require()?;
    Ok(Json(
        state
            .feed_service
            .record_interaction(viewer_id, body.target.target(), body.kind)
            .await,
    ))
}

/// POST /feed/bookmark
pub async fn bookmark(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(body): Json<TargetBody>,
) -> Result<Json<InteractionOutcome>, AppError> {
    let viewer_id = viewer.require()?;
    Ok(Json(
        state.feed_service.bookmark(viewer_id, body.target()).await,
    ))
}

/// POST /feed/hide
pub async fn hide(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(body): Json<TargetBody>,
) -> Result<Json<InteractionOutcome>, AppError> {
    let viewer_id = viewer.require()?;
    Ok(Json(state.feed_service.hide(viewer_id, body.target()).await))
}

/// POST /feed/report
pub async fn report(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(body): Json<ReportBody>,
) -> Result<Json<InteractionOutcome>, AppError> {
    let viewer_id = viewer.require()?;
    if body.reason.trim().is_empty() {
        return Err(AppError::BadRequest("reason is required".to_string()));
    }
    Ok(Json(
        state
            .feed_service
            .report(viewer_id, body.target.target(), body.reason.trim())
            .await,
    ))
}

/// POST /feed/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(body): Json<CommentBody>,
) -> Result<Json<InteractionOutcome>, AppError> {
    let viewer_id = viewer.require()?;
    Ok(Json(
        state
            .feed_service
            .add_comment(viewer_id, body.target.target(), &body.content)
            .await,
    ))
}

/// GET /feed/comments/:content_type/:content_id
pub async fn get_comments(
    State(state): State<AppState>,
    Path((content_type, content_id)): Path<(String, ContentId)>,
    Query(query): Query<CommentsQuery>,
) -> Result<Json<CommentPage>, AppError> {
    let content_type: ContentType = content_type.parse().map_err(AppError::BadRequest)?;
    let target = ContentRef {
        content_id,
        content_type,
    };
    Ok(Json(
        state
            .feed_service
            .get_comments(
                target,
                query.page.unwrap_or(1),
                query.page_size.unwrap_or(20),
            )
            .await,
    ))
}
