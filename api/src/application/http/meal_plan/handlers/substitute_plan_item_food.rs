use axum::{
    Extension,
    extract::{Path, State},
};
use nutriclinic_core::domain::meal_plan::{MealPlanService, SubstituteFoodInput};
use uuid::Uuid;

use super::MealPlanResponse;
use crate::application::{
    http::{
        meal_plan::validators::SubstituteFoodValidator,
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
    path = "/{plan_id}/items/{item_id}/substitution",
    tag = "meal_plan",
    summary = "Substitute item food",
    description = "Swaps the item's food and keeps its quantity, unit, slot, time and note.",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan id"),
        ("item_id" = Uuid, Path, description = "Plan item id"),
    ),
    request_body = SubstituteFoodValidator,
    responses(
        (status = 200, body = MealPlanResponse),
        (status = 404, description = "Meal plan, item or replacement food not found"),
        (status = 409, description = "Plan changed since expected_version")
    )
)]
pub async fn substitute_plan_item_food(
    Path((plan_id, item_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
    Extension(viewer): Extension<ViewerContext>,
    ValidateJson(payload): ValidateJson<SubstituteFoodValidator>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let plan = state
        .service
        .substitute_food(SubstituteFoodInput {
            plan_id,
            item_id,
            replacement_food_id: payload.replacement_food_id,
            expected_version: payload.expected_version,
            viewer_id: viewer.viewer_id,
        })
        .await?;

    Ok(Response::OK(MealPlanResponse { data: plan }))
}
