use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::{
        entities::Food,
        value_objects::{FoodQuery, FoodSearchResult, SearchFoodsInput},
    },
};

/// Read access to the food catalog owned by the backing store.
#[cfg_attr(test, mockall::automock)]
pub trait FoodCatalogRepository: Send + Sync {
    fn query_foods(
        &self,
        query: FoodQuery,
    ) -> impl Future<Output = Result<Vec<Food>, CoreError>> + Send;

    fn get_food_by_id(
        &self,
        food_id: Uuid,
    ) -> impl Future<Output = Result<Option<Food>, CoreError>> + Send;

    fn get_foods_by_ids(
        &self,
        food_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<Food>, CoreError>> + Send;
}

/// Service trait for food search
pub trait FoodService: Send + Sync {
    /// Never fails for a catalog outage: the result is empty and flagged.
    fn search_foods(
        &self,
        input: SearchFoodsInput,
    ) -> impl Future<Output = FoodSearchResult> + Send;

    /// A private food owned by someone else is reported as not found.
    fn get_food(
        &self,
        food_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> impl Future<Output = Result<Food, CoreError>> + Send;

    fn list_categories(
        &self,
        viewer_id: Option<Uuid>,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}
