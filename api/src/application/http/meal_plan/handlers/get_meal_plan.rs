use axum::extract::{Path, State};
use nutriclinic_core::domain::meal_plan::MealPlanService;
use uuid::Uuid;

use super::MealPlanResponse;
use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{plan_id}",
    tag = "meal_plan",
    summary = "Get meal plan",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
    ),
    responses(
        (status = 200, body = MealPlanResponse),
        (status = 404, description = "Meal plan not found")
    )
)]
pub async fn get_meal_plan(
    Path(plan_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let plan = state.service.get_plan(plan_id).await?;

    Ok(Response::OK(MealPlanResponse { data: plan }))
}
