use axum::{Extension, extract::State};
use nutriclinic_core::domain::food::FoodService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    viewer::ViewerContext,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetCategoriesResponse {
    pub data: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "food",
    summary = "List food categories",
    description = "Distinct trimmed category labels of the visible catalog, deduplicated ignoring case and sorted.",
    responses(
        (status = 200, body = GetCategoriesResponse),
        (status = 503, description = "Food catalog unavailable")
    )
)]
pub async fn get_categories(
    State(state): State<AppState>,
    Extension(viewer): Extension<ViewerContext>,
) -> Result<Response<GetCategoriesResponse>, ApiError> {
    let categories = state.service.list_categories(viewer.viewer_id).await?;

    Ok(Response::OK(GetCategoriesResponse { data: categories }))
}
