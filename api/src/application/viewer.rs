use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const VIEWER_HEADER: &str = "x-viewer-id";

/// Caller identity stored in request extensions. Private foods are visible
/// only to their owner, so anonymous callers see the public catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewerContext {
    pub viewer_id: Option<Uuid>,
}

/// Reads the optional `X-Viewer-Id` header into a [`ViewerContext`].
pub async fn viewer_middleware(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let viewer_id = match req.headers().get(VIEWER_HEADER) {
        Some(value) => {
            let raw = value
                .to_str()
                .map_err(|_| ApiError::BadRequest(format!("{} is not valid text", VIEWER_HEADER)))?;
            let id = Uuid::parse_str(raw.trim())
                .map_err(|_| ApiError::BadRequest(format!("{} must be a UUID", VIEWER_HEADER)))?;
            Some(id)
        }
        None => None,
    };

    req.extensions_mut().insert(ViewerContext { viewer_id });

    Ok(next.run(req).await)
}
