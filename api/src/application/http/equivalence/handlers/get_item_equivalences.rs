use axum::{
    Extension,
    extract::{Path, State},
};
use nutriclinic_core::domain::equivalence::{EquivalenceService, GetItemEquivalencesInput};
use uuid::Uuid;

use super::get_food_equivalences::GetEquivalencesResponse;
use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    viewer::ViewerContext,
};

#[utoipa::path(
    get,
    path = "/{plan_id}/items/{item_id}/equivalences",
    tag = "equivalence",
    summary = "Get plan item equivalences",
    description = "Equivalences for the item's food, using the item's quantity as the base portion.",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
        ("item_id" = Uuid, Path, description = "Plan item id"),
    ),
    responses(
        (status = 200, body = GetEquivalencesResponse),
        (status = 404, description = "Plan, item or food not found")
    )
)]
pub async fn get_item_equivalences(
    Path((plan_id, item_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
    Extension(viewer): Extension<ViewerContext>,
) -> Result<Response<GetEquivalencesResponse>, ApiError> {
    let report = state
        .service
        .get_item_equivalences(GetItemEquivalencesInput {
            plan_id,
            item_id,
            viewer_id: viewer.viewer_id,
        })
        .await?;

    Ok(Response::OK(GetEquivalencesResponse { data: report }))
}
