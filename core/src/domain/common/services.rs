use crate::domain::{
    equivalence::groups::SubstitutionGroups, food::ports::FoodCatalogRepository,
    health::ports::HealthCheckRepository, meal_plan::ports::MealPlanRepository,
};

#[derive(Clone)]
pub struct Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    pub(crate) food_catalog_repository: F,
    pub(crate) meal_plan_repository: P,
    pub(crate) health_check_repository: HC,
    pub(crate) substitution_groups: SubstitutionGroups,
}

impl<F, P, HC> Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    pub fn new(food_catalog_repository: F, meal_plan_repository: P, health_check_repository: HC) -> Self {
        Self {
            food_catalog_repository,
            meal_plan_repository,
            health_check_repository,
            substitution_groups: SubstitutionGroups::default(),
        }
    }
}
