//! Backend selection. Each store wraps either the Postgres or the in-memory
//! adapter so the service type stays the same for both backends.

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::{entities::Food, ports::FoodCatalogRepository, value_objects::FoodQuery},
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
    meal_plan::{
        entities::{MealPlan, PlanStatus},
        ports::MealPlanRepository,
        substitution::PlanItemChanges,
    },
};
use crate::infrastructure::{
    food::repositories::food_catalog_repository::PostgresFoodCatalogRepository,
    health::repositories::PostgresHealthCheckRepository,
    meal_plan::repositories::meal_plan_repository::PostgresMealPlanRepository,
    memory::{InMemoryFoodCatalogRepository, InMemoryHealthCheckRepository, InMemoryMealPlanRepository},
};

#[derive(Debug, Clone)]
pub enum FoodCatalogStore {
    Postgres(PostgresFoodCatalogRepository),
    Memory(InMemoryFoodCatalogRepository),
}

impl FoodCatalogRepository for FoodCatalogStore {
    async fn query_foods(&self, query: FoodQuery) -> Result<Vec<Food>, CoreError> {
        match self {
            Self::Postgres(repository) => repository.query_foods(query).await,
            Self::Memory(repository) => repository.query_foods(query).await,
        }
    }

    async fn get_food_by_id(&self, food_id: Uuid) -> Result<Option<Food>, CoreError> {
        match self {
            Self::Postgres(repository) => repository.get_food_by_id(food_id).await,
            Self::Memory(repository) => repository.get_food_by_id(food_id).await,
        }
    }

    async fn get_foods_by_ids(&self, food_ids: Vec<Uuid>) -> Result<Vec<Food>, CoreError> {
        match self {
            Self::Postgres(repository) => repository.get_foods_by_ids(food_ids).await,
            Self::Memory(repository) => repository.get_foods_by_ids(food_ids).await,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MealPlanStore {
    Postgres(PostgresMealPlanRepository),
    Memory(InMemoryMealPlanRepository),
}

impl MealPlanRepository for MealPlanStore {
    async fn create_plan(&self, plan: MealPlan) -> Result<MealPlan, CoreError> {
        match self {
            Self::Postgres(repository) => repository.create_plan(plan).await,
            Self::Memory(repository) => repository.create_plan(plan).await,
        }
    }

    async fn load_plan(&self, plan_id: Uuid) -> Result<Option<MealPlan>, CoreError> {
        match self {
            Self::Postgres(repository) => repository.load_plan(plan_id).await,
            Self::Memory(repository) => repository.load_plan(plan_id).await,
        }
    }

    async fn apply_item_changes(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        changes: PlanItemChanges,
    ) -> Result<MealPlan, CoreError> {
        match self {
            Self::Postgres(repository) => {
                repository
                    .apply_item_changes(plan_id, expected_version, changes)
                    .await
            }
            Self::Memory(repository) => {
                repository
                    .apply_item_changes(plan_id, expected_version, changes)
                    .await
            }
        }
    }

    async fn update_item_food(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        item_id: Uuid,
        food_id: Uuid,
    ) -> Result<MealPlan, CoreError> {
        match self {
            Self::Postgres(repository) => {
                repository
                    .update_item_food(plan_id, expected_version, item_id, food_id)
                    .await
            }
            Self::Memory(repository) => {
                repository
                    .update_item_food(plan_id, expected_version, item_id, food_id)
                    .await
            }
        }
    }

    async fn update_plan_status(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        status: PlanStatus,
    ) -> Result<MealPlan, CoreError> {
        match self {
            Self::Postgres(repository) => {
                repository
                    .update_plan_status(plan_id, expected_version, status)
                    .await
            }
            Self::Memory(repository) => {
                repository
                    .update_plan_status(plan_id, expected_version, status)
                    .await
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum HealthCheckStore {
    Postgres(PostgresHealthCheckRepository),
    Memory(InMemoryHealthCheckRepository),
}

impl HealthCheckRepository for HealthCheckStore {
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        match self {
            Self::Postgres(repository) => repository.readness().await,
            Self::Memory(repository) => repository.readness().await,
        }
    }

    async fn health(&self) -> Result<u64, CoreError> {
        match self {
            Self::Postgres(repository) => repository.health().await,
            Self::Memory(repository) => repository.health().await,
        }
    }
}
