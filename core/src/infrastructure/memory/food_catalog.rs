use std::{
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::{entities::Food, ports::FoodCatalogRepository, value_objects::FoodQuery},
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryFoodCatalogRepository {
    foods: Arc<RwLock<Vec<Food>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryFoodCatalogRepository {
    pub fn with_foods(foods: Vec<Food>) -> Self {
        Self {
            foods: Arc::new(RwLock::new(foods)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Simulates a catalog outage: every read fails with `DataUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), CoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::DataUnavailable);
        }
        Ok(())
    }
}

fn matches_query(food: &Food, query: &FoodQuery) -> bool {
    if !food.is_visible_to(query.viewer_id) {
        return false;
    }

    if let Some(needle) = query.name_contains.as_deref().map(str::trim)
        && !needle.is_empty()
        && !food.name.to_lowercase().contains(&needle.to_lowercase())
    {
        return false;
    }

    if let Some(category) = query.category.as_deref().map(str::trim)
        && !category.is_empty()
    {
        return food
            .category_label()
            .is_some_and(|label| label.to_lowercase() == category.to_lowercase());
    }

    true
}

impl FoodCatalogRepository for InMemoryFoodCatalogRepository {
    async fn query_foods(&self, query: FoodQuery) -> Result<Vec<Food>, CoreError> {
        self.ensure_available()?;

        let foods = self.foods.read().await;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        Ok(foods
            .iter()
            .filter(|food| matches_query(food, &query))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_food_by_id(&self, food_id: Uuid) -> Result<Option<Food>, CoreError> {
        self.ensure_available()?;

        Ok(self
            .foods
            .read()
            .await
            .iter()
            .find(|food| food.id == food_id)
            .cloned())
    }

    async fn get_foods_by_ids(&self, food_ids: Vec<Uuid>) -> Result<Vec<Food>, CoreError> {
        self.ensure_available()?;

        let wanted: HashSet<Uuid> = food_ids.into_iter().collect();
        Ok(self
            .foods
            .read()
            .await
            .iter()
            .filter(|food| wanted.contains(&food.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food::entities::FoodVisibility;
    use crate::infrastructure::memory::fixtures;

    #[tokio::test]
    async fn test_private_foods_are_only_listed_for_their_owner() {
        let owner = Uuid::new_v4();
        let mut foods = fixtures::sample_foods();
        foods[0].visibility = FoodVisibility::Private;
        foods[0].owner_id = Some(owner);
        let private_id = foods[0].id;
        let repository = InMemoryFoodCatalogRepository::with_foods(foods);

        let anonymous = repository.query_foods(FoodQuery::default()).await.unwrap();
        assert!(anonymous.iter().all(|f| f.id != private_id));

        let owned = repository
            .query_foods(FoodQuery {
                viewer_id: Some(owner),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(owned.iter().any(|f| f.id == private_id));
    }

    #[tokio::test]
    async fn test_name_and_category_filters_ignore_case() {
        let repository = InMemoryFoodCatalogRepository::with_foods(fixtures::sample_foods());

        let rice = repository
            .query_foods(FoodQuery {
                name_contains: Some("RICE".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!rice.is_empty());
        assert!(rice.iter().all(|f| f.name.to_lowercase().contains("rice")));

        let cereals = repository
            .query_foods(FoodQuery {
                category: Some(" cereals and derivatives".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!cereals.is_empty());
    }

    #[tokio::test]
    async fn test_outage_fails_every_read() {
        let repository = InMemoryFoodCatalogRepository::with_foods(fixtures::sample_foods());
        repository.set_unavailable(true);

        assert_eq!(
            repository.query_foods(FoodQuery::default()).await,
            Err(CoreError::DataUnavailable)
        );
        assert_eq!(
            repository.get_food_by_id(Uuid::new_v4()).await,
            Err(CoreError::DataUnavailable)
        );
    }
}
