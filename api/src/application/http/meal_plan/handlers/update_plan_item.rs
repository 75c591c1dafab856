use axum::extract::{Path, State};
use nutriclinic_core::domain::meal_plan::MealPlanService;
use uuid::Uuid;

use super::MealPlanResponse;
use crate::application::http::{
    meal_plan::validators::UpdatePlanItemValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    put,
    path = "/{plan_id}/items/{item_id}",
    tag = "meal_plan",
    summary = "Update plan item",
    description = "Changes only the fields present in the body.",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
        ("item_id" = Uuid, Path, description = "Plan item id"),
    ),
    request_body = UpdatePlanItemValidator,
    responses(
        (status = 200, body = MealPlanResponse),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Meal plan or item not found"),
        (status = 409, description = "Plan changed since expected_version")
    )
)]
pub async fn update_plan_item(
    Path((plan_id, item_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdatePlanItemValidator>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let plan = state
        .service
        .update_item(payload.into_input(plan_id, item_id))
        .await?;

    Ok(Response::OK(MealPlanResponse { data: plan }))
}
