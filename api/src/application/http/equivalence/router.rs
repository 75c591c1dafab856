use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_food_equivalences::{__path_get_food_equivalences, get_food_equivalences},
    get_item_equivalences::{__path_get_item_equivalences, get_item_equivalences},
};
use crate::application::{http::server::app_state::AppState, viewer::viewer_middleware};

#[derive(OpenApi)]
#[openapi(paths(get_food_equivalences))]
pub struct FoodEquivalenceApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_item_equivalences))]
pub struct ItemEquivalenceApiDoc;

pub fn equivalence_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{}/foods/{{food_id}}/equivalences", root_path),
            get(get_food_equivalences),
        )
        .route(
            &format!("{}/meal-plans/{{plan_id}}/items/{{item_id}}/equivalences", root_path),
            get(get_item_equivalences),
        )
        .layer(middleware::from_fn(viewer_middleware))
}
