use tracing::info;

use crate::{
    domain::common::{NutriclinicConfig, StorageConfig, services::Service},
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        food::repositories::food_catalog_repository::PostgresFoodCatalogRepository,
        health::repositories::PostgresHealthCheckRepository,
        meal_plan::repositories::meal_plan_repository::PostgresMealPlanRepository,
        memory::{
            InMemoryFoodCatalogRepository, InMemoryHealthCheckRepository,
            InMemoryMealPlanRepository,
            fixtures::{self, SeedData},
        },
        store::{FoodCatalogStore, HealthCheckStore, MealPlanStore},
    },
};

pub type NutriclinicService = Service<FoodCatalogStore, MealPlanStore, HealthCheckStore>;

async fn load_seed(config: &NutriclinicConfig) -> Result<Option<SeedData>, anyhow::Error> {
    match &config.seed_path {
        Some(path) => {
            let seed = fixtures::load_seed_file(path).await?;
            info!(
                path = %path,
                foods = seed.foods.len(),
                plans = seed.plans.len(),
                "seed file loaded"
            );
            Ok(Some(seed))
        }
        None => Ok(None),
    }
}

pub async fn create_service(config: NutriclinicConfig) -> Result<NutriclinicService, anyhow::Error> {
    let seed = load_seed(&config).await?;

    let service = match config.storage {
        StorageConfig::Postgres(database) => {
            let postgres = Postgres::new(PostgresConfig::new(database.url())).await?;
            let food_catalog = PostgresFoodCatalogRepository::new(postgres.get_db());

            if let Some(seed) = seed {
                food_catalog.import_foods(seed.foods).await?;
            }

            Service::new(
                FoodCatalogStore::Postgres(food_catalog),
                MealPlanStore::Postgres(PostgresMealPlanRepository::new(postgres.get_db())),
                HealthCheckStore::Postgres(PostgresHealthCheckRepository::new(postgres.get_db())),
            )
        }
        StorageConfig::Memory => {
            let seed = seed.unwrap_or_else(|| SeedData {
                foods: fixtures::sample_foods(),
                plans: Vec::new(),
            });
            info!("using in-memory storage");

            Service::new(
                FoodCatalogStore::Memory(InMemoryFoodCatalogRepository::with_foods(seed.foods)),
                MealPlanStore::Memory(InMemoryMealPlanRepository::with_plans(seed.plans)),
                HealthCheckStore::Memory(InMemoryHealthCheckRepository),
            )
        }
    };

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food::{ports::FoodService, value_objects::SearchFoodsInput};

    #[tokio::test]
    async fn test_memory_service_starts_with_sample_catalog() {
        let service = create_service(NutriclinicConfig {
            storage: StorageConfig::Memory,
            seed_path: None,
        })
        .await
        .unwrap();

        let result = service.search_foods(SearchFoodsInput::default()).await;
        assert_eq!(result.foods.len(), fixtures::sample_foods().len());
    }

    #[tokio::test]
    async fn test_missing_seed_file_fails_startup() {
        let result = create_service(NutriclinicConfig {
            storage: StorageConfig::Memory,
            seed_path: Some("/nonexistent/seed.json".to_string()),
        })
        .await;

        assert!(result.is_err());
    }
}
