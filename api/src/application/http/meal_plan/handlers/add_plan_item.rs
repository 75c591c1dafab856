use axum::{
    Extension,
    extract::{Path, State},
};
use nutriclinic_core::domain::meal_plan::MealPlanService;
use uuid::Uuid;

use super::MealPlanResponse;
use crate::application::{
    http::{
        meal_plan::validators::AddPlanItemValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
    viewer::ViewerContext,
};

#[utoipa::path(
    post,
    path = "/{plan_id}/items",
    tag = "meal_plan",
    summary = "Add plan item",
    description = "Appends a food at the end of a day's meal slot.",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
    ),
    request_body = AddPlanItemValidator,
    responses(
        (status = 201, body = MealPlanResponse),
        (status = 400, description = "Invalid item"),
        (status = 404, description = "Meal plan or food not found"),
        (status = 409, description = "Plan changed since expected_version")
    )
)]
pub async fn add_plan_item(
    Path(plan_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(viewer): Extension<ViewerContext>,
    ValidateJson(payload): ValidateJson<AddPlanItemValidator>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let plan = state.service.add_item(payload.into_input(plan_id, viewer.viewer_id)).await?;

    Ok(Response::Created(MealPlanResponse { data: plan }))
}
