use axum::extract::{Path, Query, State};
use nutriclinic_core::domain::meal_plan::{MealPlanService, RemovePlanItemInput};
use uuid::Uuid;

use super::MealPlanResponse;
use crate::application::http::{
    meal_plan::validators::RemoveItemQuery,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    delete,
    path = "/{plan_id}/items/{item_id}",
    tag = "meal_plan",
    summary = "Remove plan item",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
        ("item_id" = Uuid, Path, description = "Plan item id"),
        RemoveItemQuery
    ),
    responses(
        (status = 200, body = MealPlanResponse),
        (status = 404, description = "Meal plan or item not found"),
        (status = 409, description = "Plan changed since expected_version")
    )
)]
pub async fn remove_plan_item(
    Path((plan_id, item_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<RemoveItemQuery>,
    State(state): State<AppState>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let plan = state
        .service
        .remove_item(RemovePlanItemInput {
            plan_id,
            item_id,
            expected_version: query.expected_version,
        })
        .await?;

    Ok(Response::OK(MealPlanResponse { data: plan }))
}
