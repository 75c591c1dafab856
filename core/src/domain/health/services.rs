use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food::ports::FoodCatalogRepository,
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    meal_plan::ports::MealPlanRepository,
};

impl<F, P, HC> HealthCheckService for Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
