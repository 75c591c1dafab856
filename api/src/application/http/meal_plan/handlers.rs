pub mod add_plan_item;
pub mod create_meal_plan;
pub mod get_day_summary;
pub mod get_meal_plan;
pub mod get_week_summary;
pub mod remove_plan_item;
pub mod save_plan_items;
pub mod substitute_plan_item_food;
pub mod update_plan_item;
pub mod update_plan_status;

use nutriclinic_core::domain::meal_plan::MealPlan;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by every plan read or write.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MealPlanResponse {
    pub data: MealPlan,
}
