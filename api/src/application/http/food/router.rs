use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_categories::{__path_get_categories, get_categories},
    get_food::{__path_get_food, get_food},
    get_foods::{__path_get_foods, get_foods},
};
use crate::application::{http::server::app_state::AppState, viewer::viewer_middleware};

#[derive(OpenApi)]
#[openapi(paths(get_foods, get_categories, get_food))]
pub struct FoodApiDoc;

pub fn food_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/foods", root_path), get(get_foods))
        .route(&format!("{}/foods/categories", root_path), get(get_categories))
        .route(&format!("{}/foods/{{food_id}}", root_path), get(get_food))
        .layer(middleware::from_fn(viewer_middleware))
}
