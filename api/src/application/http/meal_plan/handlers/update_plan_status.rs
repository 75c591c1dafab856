use axum::extract::{Path, State};
use nutriclinic_core::domain::meal_plan::{MealPlanService, UpdatePlanStatusInput};
use uuid::Uuid;

use super::MealPlanResponse;
use crate::application::http::{
    meal_plan::validators::UpdatePlanStatusValidator,
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
    path = "/{plan_id}/status",
    tag = "meal_plan",
    summary = "Update plan status",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
    ),
    request_body = UpdatePlanStatusValidator,
    responses(
        (status = 200, body = MealPlanResponse),
        (status = 404, description = "Meal plan not found"),
        (status = 409, description = "Plan changed since expected_version")
    )
)]
pub async fn update_plan_status(
    Path(plan_id): Path<Uuid>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdatePlanStatusValidator>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let plan = state
        .service
        .update_status(UpdatePlanStatusInput {
            plan_id,
            expected_version: payload.expected_version,
            status: payload.status,
        })
        .await?;

    Ok(Response::OK(MealPlanResponse { data: plan }))
}
