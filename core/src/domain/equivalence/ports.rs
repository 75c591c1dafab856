use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError, equivalence::entities::EquivalenceReport,
};

#[derive(Debug, Clone)]
pub struct GetFoodEquivalencesInput {
    pub food_id: Uuid,
    /// Grams of the base food, defaults to 100.
    pub quantity: Option<f64>,
    pub viewer_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct GetItemEquivalencesInput {
    pub plan_id: Uuid,
    pub item_id: Uuid,
    pub viewer_id: Option<Uuid>,
}

/// Service trait for calorie-based food equivalences
pub trait EquivalenceService: Send + Sync {
    fn get_food_equivalences(
        &self,
        input: GetFoodEquivalencesInput,
    ) -> impl Future<Output = Result<EquivalenceReport, CoreError>> + Send;

    /// Uses the plan item's food and quantity as the base portion.
    fn get_item_equivalences(
        &self,
        input: GetItemEquivalencesInput,
    ) -> impl Future<Output = Result<EquivalenceReport, CoreError>> + Send;
}
