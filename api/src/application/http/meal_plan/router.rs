use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use utoipa::OpenApi;

use super::handlers::{
    add_plan_item::{__path_add_plan_item, add_plan_item},
    create_meal_plan::{__path_create_meal_plan, create_meal_plan},
    get_day_summary::{__path_get_day_summary, get_day_summary},
    get_meal_plan::{__path_get_meal_plan, get_meal_plan},
    get_week_summary::{__path_get_week_summary, get_week_summary},
    remove_plan_item::{__path_remove_plan_item, remove_plan_item},
    save_plan_items::{__path_save_plan_items, save_plan_items},
    substitute_plan_item_food::{__path_substitute_plan_item_food, substitute_plan_item_food},
    update_plan_item::{__path_update_plan_item, update_plan_item},
    update_plan_status::{__path_update_plan_status, update_plan_status},
};
use crate::application::{http::server::app_state::AppState, viewer::viewer_middleware};

#[derive(OpenApi)]
#[openapi(paths(
    create_meal_plan,
    get_meal_plan,
    get_day_summary,
    get_week_summary,
    add_plan_item,
    save_plan_items,
    update_plan_item,
    remove_plan_item,
    substitute_plan_item_food,
    update_plan_status,
))]
pub struct MealPlanApiDoc;

pub fn meal_plan_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/meal-plans", root_path), post(create_meal_plan))
        .route(&format!("{}/meal-plans/{{plan_id}}", root_path), get(get_meal_plan))
        .route(
            &format!("{}/meal-plans/{{plan_id}}/days/{{day_index}}", root_path),
            get(get_day_summary),
        )
        .route(
            &format!("{}/meal-plans/{{plan_id}}/week", root_path),
            get(get_week_summary),
        )
        .route(
            &format!("{}/meal-plans/{{plan_id}}/items", root_path),
            post(add_plan_item).put(save_plan_items),
        )
        .route(
            &format!("{}/meal-plans/{{plan_id}}/items/{{item_id}}", root_path),
            put(update_plan_item).delete(remove_plan_item),
        )
        .route(
            &format!("{}/meal-plans/{{plan_id}}/items/{{item_id}}/substitution", root_path),
            post(substitute_plan_item_food),
        )
        .route(
            &format!("{}/meal-plans/{{plan_id}}/status", root_path),
            put(update_plan_status),
        )
        .layer(middleware::from_fn(viewer_middleware))
}
