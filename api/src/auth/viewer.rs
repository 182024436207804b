//! Viewer resolution middleware
//!
//! The feed is readable anonymously. When the `X-Viewer-Id` header carries a
//! user id, it is parsed once here and handed to handlers as a [`Viewer`].

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use uuid::Uuid;

use crate::domain::entities::UserId;
use crate::error::AppError;

pub const VIEWER_HEADER: &str = "X-Viewer-Id";

/// The requesting user, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer(pub Option<UserId>);

impl Viewer {
    pub fn id(&self) -> Option<UserId> {
        self.0
    }

    /// The viewer id, for routes that act on the viewer's behalf
    pub fn require(&self) -> Result<UserId, AppError> {
        self.0.ok_or(AppError::Unauthorized)
    }
}

/// Extract the viewer id from the request headers
fn extract_viewer(request: &Request<Body>) -> Result<Viewer, AppError> {
    let Some(raw) = request.headers().get(VIEWER_HEADER) else {
        return Ok(Viewer(None));
    };

    let raw = raw
        .to_str()
        .map_err(|_| AppError::BadRequest(format!("{} is not valid text", VIEWER_HEADER)))?
        .trim();
    if raw.is_empty() {
        return Ok(Viewer(None));
    }

    Uuid::parse_str(raw)
        .map(|id| Viewer(Some(UserId(id))))
        .map_err(|_| AppError::BadRequest(format!("{} must be a UUID", VIEWER_HEADER)))
}

/// Viewer middleware
///
/// Injects a [`Viewer`] into request extensions. A missing header is an
/// anonymous viewer; a malformed one is rejected.
pub async fn viewer_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let viewer = extract_viewer(&request)?;
    request.extensions_mut().insert(viewer);
    Ok(next.run(request).await)
}
