use tracing::{error, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    equivalence::{
        calculator::{DEFAULT_BASE_QUANTITY, compute_equivalences},
        entities::EquivalenceReport,
        ports::{EquivalenceService, GetFoodEquivalencesInput, GetItemEquivalencesInput},
    },
    food::{entities::Food, ports::FoodCatalogRepository, value_objects::FoodQuery},
    health::ports::HealthCheckRepository,
    meal_plan::ports::MealPlanRepository,
};

impl<F, P, HC> Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    async fn equivalence_report(
        &self,
        base_food: Food,
        base_quantity: f64,
        viewer_id: Option<Uuid>,
    ) -> Result<EquivalenceReport, CoreError> {
        let group = self
            .substitution_groups
            .classify(base_food.category_label())
            .cloned();

        // no group means no equivalences, skip the catalog round-trip
        if group.is_none() {
            return Ok(EquivalenceReport {
                base_food,
                base_quantity,
                group,
                equivalences: Vec::new(),
            });
        }

        let catalog = self
            .food_catalog_repository
            .query_foods(FoodQuery {
                viewer_id,
                ..Default::default()
            })
            .await
            .map_err(|e| {
                error!("Failed to load food catalog for equivalences: {}", e);
                CoreError::DataUnavailable
            })?;

        let equivalences =
            compute_equivalences(&self.substitution_groups, &base_food, base_quantity, &catalog);

        Ok(EquivalenceReport {
            base_food,
            base_quantity,
            group,
            equivalences,
        })
    }
}

impl<F, P, HC> EquivalenceService for Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self), fields(food_id = %input.food_id))]
    async fn get_food_equivalences(
        &self,
        input: GetFoodEquivalencesInput,
    ) -> Result<EquivalenceReport, CoreError> {
        let quantity = input.quantity.unwrap_or(DEFAULT_BASE_QUANTITY);
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CoreError::Invalid(
                "quantity must be a positive number".to_string(),
            ));
        }

        let base_food = self.visible_food(input.food_id, input.viewer_id).await?;

        self.equivalence_report(base_food, quantity, input.viewer_id)
            .await
    }

    #[instrument(skip(self), fields(plan_id = %input.plan_id, item_id = %input.item_id))]
    async fn get_item_equivalences(
        &self,
        input: GetItemEquivalencesInput,
    ) -> Result<EquivalenceReport, CoreError> {
        let plan = self
            .meal_plan_repository
            .load_plan(input.plan_id)
            .await?
            .ok_or(CoreError::MealPlanNotFound(input.plan_id))?;

        let item = plan
            .item(input.item_id)
            .ok_or(CoreError::PlanItemNotFound(input.item_id))?;

        let base_food = self.visible_food(item.food_id, input.viewer_id).await?;

        self.equivalence_report(base_food, item.quantity, input.viewer_id)
            .await
    }
}
