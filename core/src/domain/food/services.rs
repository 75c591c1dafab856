use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food::{
        entities::Food,
        filter::{available_categories, filter_and_sort},
        ports::{FoodCatalogRepository, FoodService},
        value_objects::{FoodQuery, FoodSearchResult, SearchFoodsInput},
    },
    health::ports::HealthCheckRepository,
    meal_plan::ports::MealPlanRepository,
};

impl<F, P, HC> Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    /// Loads a food the viewer is allowed to see.
    pub(crate) async fn visible_food(
        &self,
        food_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<Food, CoreError> {
        self.food_catalog_repository
            .get_food_by_id(food_id)
            .await?
            .filter(|food| food.is_visible_to(viewer_id))
            .ok_or(CoreError::FoodNotFound(food_id))
    }
}

impl<F, P, HC> FoodService for Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self, input))]
    async fn search_foods(&self, input: SearchFoodsInput) -> FoodSearchResult {
        // name and category are pushed down to the catalog; ranges and sort
        // are applied in-process so the rules stay identical across stores
        let query = FoodQuery {
            name_contains: input.spec.name_contains.clone(),
            category: None,
            viewer_id: input.viewer_id,
            limit: None,
        };

        let loaded = match self.food_catalog_repository.query_foods(query).await {
            Ok(foods) => foods,
            Err(e) => {
                error!("Food catalog unavailable, falling back to empty list: {}", e);
                return FoodSearchResult::unavailable();
            }
        };

        let categories = available_categories(&loaded);
        let mut foods = filter_and_sort(&loaded, &input.spec);
        if let Some(limit) = input.limit {
            foods.truncate(limit as usize);
        }

        debug!(
            loaded = loaded.len(),
            matched = foods.len(),
            "food search completed"
        );

        FoodSearchResult {
            foods,
            categories,
            data_unavailable: false,
        }
    }

    async fn get_food(&self, food_id: Uuid, viewer_id: Option<Uuid>) -> Result<Food, CoreError> {
        self.visible_food(food_id, viewer_id).await
    }

    async fn list_categories(&self, viewer_id: Option<Uuid>) -> Result<Vec<String>, CoreError> {
        let foods = self
            .food_catalog_repository
            .query_foods(FoodQuery {
                viewer_id,
                ..Default::default()
            })
            .await?;

        Ok(available_categories(&foods))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food::{
        entities::{FoodVisibility, NutrientKey},
        value_objects::{FoodFilterSpec, FoodSortField, RangeFilter},
    };
    use crate::infrastructure::memory::{
        InMemoryFoodCatalogRepository, InMemoryHealthCheckRepository, InMemoryMealPlanRepository,
        fixtures,
    };

    type TestService =
        Service<InMemoryFoodCatalogRepository, InMemoryMealPlanRepository, InMemoryHealthCheckRepository>;

    fn service(catalog: InMemoryFoodCatalogRepository) -> TestService {
        Service::new(
            catalog,
            InMemoryMealPlanRepository::default(),
            InMemoryHealthCheckRepository,
        )
    }

    #[tokio::test]
    async fn test_search_applies_spec_and_derives_categories() {
        let catalog = InMemoryFoodCatalogRepository::with_foods(fixtures::sample_foods());
        let service = service(catalog);

        let result = service
            .search_foods(SearchFoodsInput {
                viewer_id: None,
                spec: FoodFilterSpec::default()
                    .with_range(RangeFilter::new(NutrientKey::EnergyKcal, Some(100.0), None))
                    .sorted_by(FoodSortField::Nutrient(NutrientKey::EnergyKcal), true),
                limit: None,
            })
            .await;

        assert!(!result.data_unavailable);
        let kcal: Vec<f64> = result
            .foods
            .iter()
            .filter_map(|f| f.energy_kcal())
            .collect();
        assert!(kcal.windows(2).all(|w| w[0] <= w[1]));
        assert!(kcal.iter().all(|k| *k >= 100.0));
        assert!(result.categories.contains(&"Cereals and derivatives".to_string()));
    }

    #[tokio::test]
    async fn test_search_falls_back_to_empty_when_catalog_fails() {
        let catalog = InMemoryFoodCatalogRepository::with_foods(fixtures::sample_foods());
        catalog.set_unavailable(true);
        let service = service(catalog);

        let result = service.search_foods(SearchFoodsInput::default()).await;

        assert!(result.data_unavailable);
        assert!(result.foods.is_empty());
        assert!(result.categories.is_empty());
    }

    #[tokio::test]
    async fn test_get_food_not_found() {
        let service = service(InMemoryFoodCatalogRepository::default());
        let missing = Uuid::new_v4();

        let err = service.get_food(missing, None).await.unwrap_err();
        assert_eq!(err, CoreError::FoodNotFound(missing));
    }

    #[tokio::test]
    async fn test_private_food_is_hidden_from_other_viewers() {
        let owner = Uuid::new_v4();
        let mut foods = fixtures::sample_foods();
        foods[0].visibility = FoodVisibility::Private;
        foods[0].owner_id = Some(owner);
        let private_id = foods[0].id;
        let service = service(InMemoryFoodCatalogRepository::with_foods(foods));

        assert_eq!(
            service.get_food(private_id, None).await.unwrap_err(),
            CoreError::FoodNotFound(private_id)
        );
        assert_eq!(
            service
                .get_food(private_id, Some(Uuid::new_v4()))
                .await
                .unwrap_err(),
            CoreError::FoodNotFound(private_id)
        );
        assert_eq!(service.get_food(private_id, Some(owner)).await.unwrap().id, private_id);
    }
}
