use crate::application::http::{
    equivalence::router::{FoodEquivalenceApiDoc, ItemEquivalenceApiDoc},
    food::router::FoodApiDoc,
    health::HealthApiDoc,
    meal_plan::router::MealPlanApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NutriClinic API"
    ),
    nest(
        (path = "/foods", api = FoodApiDoc),
        (path = "/foods", api = FoodEquivalenceApiDoc),
        (path = "/meal-plans", api = MealPlanApiDoc),
        (path = "/meal-plans", api = ItemEquivalenceApiDoc),
        (path = { "" }, api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
