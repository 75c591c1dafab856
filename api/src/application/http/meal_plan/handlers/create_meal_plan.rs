use axum::extract::State;
use nutriclinic_core::domain::meal_plan::{CreateMealPlanInput, MealPlanService};

use super::MealPlanResponse;
use crate::application::http::{
    meal_plan::validators::CreateMealPlanValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "meal_plan",
    summary = "Create meal plan",
    description = "Creates an active plan with an empty week.",
    request_body = CreateMealPlanValidator,
    responses(
        (status = 201, body = MealPlanResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_meal_plan(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateMealPlanValidator>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let plan = state
        .service
        .create_plan(CreateMealPlanInput {
            patient_id: payload.patient_id,
            title: payload.title,
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;

    Ok(Response::Created(MealPlanResponse { data: plan }))
}
