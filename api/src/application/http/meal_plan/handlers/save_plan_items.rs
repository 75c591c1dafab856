use axum::{
    Extension,
    extract::{Path, State},
};
use nutriclinic_core::domain::meal_plan::{MealPlanService, PlanItemDraft, SavePlanItemsInput};
use uuid::Uuid;

use super::MealPlanResponse;
use crate::application::{
    http::{
        meal_plan::validators::SavePlanItemsValidator,
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
    put,
    path = "/{plan_id}/items",
    tag = "meal_plan",
    summary = "Save plan items",
    description = "Replaces the plan's items with the given list. Only the differences are written: new drafts are inserted, changed ones updated and missing ones removed.",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
    ),
    request_body = SavePlanItemsValidator,
    responses(
        (status = 200, body = MealPlanResponse),
        (status = 400, description = "Invalid or duplicated draft"),
        (status = 404, description = "Meal plan, item or food not found"),
        (status = 409, description = "Plan changed since expected_version")
    )
)]
pub async fn save_plan_items(
    Path(plan_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(viewer): Extension<ViewerContext>,
    ValidateJson(payload): ValidateJson<SavePlanItemsValidator>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let plan = state
        .service
        .save_items(SavePlanItemsInput {
            plan_id,
            expected_version: payload.expected_version,
            viewer_id: viewer.viewer_id,
            items: payload.items.into_iter().map(PlanItemDraft::from).collect(),
        })
        .await?;

    Ok(Response::OK(MealPlanResponse { data: plan }))
}
