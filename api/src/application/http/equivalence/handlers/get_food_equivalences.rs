use axum::{
    Extension,
    extract::{Path, Query, State},
};
use nutriclinic_core::domain::equivalence::{
    EquivalenceReport, EquivalenceService, GetFoodEquivalencesInput,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    viewer::ViewerContext,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetFoodEquivalencesQuery {
    /// Base portion in grams, 100 when omitted.
    pub quantity: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetEquivalencesResponse {
    pub data: EquivalenceReport,
}

#[utoipa::path(
    get,
    path = "/{food_id}/equivalences",
    tag = "equivalence",
    summary = "Get food equivalences",
    description = "Foods of the same substitution group with the quantity supplying the same energy as the base portion, smallest quantity first.",
    params(
        ("food_id" = Uuid, Path, description = "Base food id"),
        GetFoodEquivalencesQuery
    ),
    responses(
        (status = 200, body = GetEquivalencesResponse),
        (status = 400, description = "Quantity is not a positive number"),
        (status = 404, description = "Food not found"),
        (status = 503, description = "Food catalog unavailable")
    )
)]
pub async fn get_food_equivalences(
    Path(food_id): Path<Uuid>,
    Query(query): Query<GetFoodEquivalencesQuery>,
    State(state): State<AppState>,
    Extension(viewer): Extension<ViewerContext>,
) -> Result<Response<GetEquivalencesResponse>, ApiError> {
    let report = state
        .service
        .get_food_equivalences(GetFoodEquivalencesInput {
            food_id,
            quantity: query.quantity,
            viewer_id: viewer.viewer_id,
        })
        .await?;

    Ok(Response::OK(GetEquivalencesResponse { data: report }))
}
