use axum::{Extension, extract::State};
use nutriclinic_core::domain::food::{Food, FoodService, SearchFoodsInput};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::{
        query_extractor::QueryParamsExtractor,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
    viewer::ViewerContext,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetFoodsResponse {
    pub data: Vec<Food>,
    /// Categories of every food loaded before filtering.
    pub categories: Vec<String>,
    /// The catalog could not be reached; `data` is an empty fallback.
    pub data_unavailable: bool,
}

#[utoipa::path(
    get,
    path = "",
    tag = "food",
    summary = "Search foods",
    description = "Filters the catalog with nutrient ranges (`filter[protein][gte]=10`), a category (`filter[category]=Fruits`) and a name substring (`filter[name][ilike]=rice`), then sorts by one field (`sort=-energy_kcal`). Bounds that are not numbers are ignored.",
    params(
        ("limit" = Option<u32>, Query, description = "Maximum number of foods returned"),
        ("sort" = Option<String>, Query, description = "Sort field, prefix with - for descending"),
    ),
    responses(
        (status = 200, body = GetFoodsResponse),
        (status = 400, description = "Unknown filter field or sort key")
    )
)]
pub async fn get_foods(
    State(state): State<AppState>,
    Extension(viewer): Extension<ViewerContext>,
    QueryParamsExtractor(params): QueryParamsExtractor,
) -> Result<Response<GetFoodsResponse>, ApiError> {
    let spec = params.to_filter_spec()?;

    let result = state
        .service
        .search_foods(SearchFoodsInput {
            viewer_id: viewer.viewer_id,
            spec,
            limit: params.limit,
        })
        .await;

    Ok(Response::OK(GetFoodsResponse {
        data: result.foods,
        categories: result.categories,
        data_unavailable: result.data_unavailable,
    }))
}
