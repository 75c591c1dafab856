use axum::{extract::FromRequestParts, http::request::Parts};
use std::collections::HashMap;

use super::query_params::QueryParams;
use crate::application::http::server::api_entities::api_error::ApiError;

/// Extractor for the bracketed food search parameters.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(
///     QueryParamsExtractor(query_params): QueryParamsExtractor,
/// ) -> Result<Response<T>, ApiError> {
///     let spec = query_params.to_filter_spec()?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QueryParamsExtractor(pub QueryParams);

impl<S> FromRequestParts<S> for QueryParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let query_map: HashMap<String, String> = serde_urlencoded::from_str(query_string)
            .map_err(|e| ApiError::BadRequest(format!("malformed query string: {}", e)))?;

        Ok(QueryParamsExtractor(QueryParams::from_query_map(&query_map)))
    }
}
