use axum::extract::{Path, State};
use nutriclinic_core::domain::meal_plan::{MealPlanService, WeekSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetWeekSummaryResponse {
    pub data: WeekSummary,
}

#[utoipa::path(
    get,
    path = "/{plan_id}/week",
    tag = "meal_plan",
    summary = "Get week summary",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
    ),
    responses(
        (status = 200, body = GetWeekSummaryResponse),
        (status = 404, description = "Meal plan not found")
    )
)]
pub async fn get_week_summary(
    Path(plan_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<GetWeekSummaryResponse>, ApiError> {
    let summary = state.service.get_week_summary(plan_id).await?;

    Ok(Response::OK(GetWeekSummaryResponse { data: summary }))
}
