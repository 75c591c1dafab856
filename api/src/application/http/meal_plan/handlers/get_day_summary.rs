use axum::extract::{Path, State};
use nutriclinic_core::domain::meal_plan::{DaySummary, MealPlanService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetDaySummaryResponse {
    pub data: DaySummary,
}

#[utoipa::path(
    get,
    path = "/{plan_id}/days/{day_index}",
    tag = "meal_plan",
    summary = "Get day summary",
    description = "Items of one day grouped by meal slot, with the day's nutrient totals.",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
        ("day_index" = u8, Path, description = "Day of the week, 0 to 6"),
    ),
    responses(
        (status = 200, body = GetDaySummaryResponse),
        (status = 400, description = "Day index out of range"),
        (status = 404, description = "Meal plan not found")
    )
)]
pub async fn get_day_summary(
    Path((plan_id, day_index)): Path<(Uuid, u8)>,
    State(state): State<AppState>,
) -> Result<Response<GetDaySummaryResponse>, ApiError> {
    let summary = state.service.get_day_summary(plan_id, day_index).await?;

    Ok(Response::OK(GetDaySummaryResponse { data: summary }))
}
