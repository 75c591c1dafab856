use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, Func, OnConflict},
};
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::{
        entities::{Food, FoodVisibility},
        ports::FoodCatalogRepository,
        value_objects::FoodQuery,
    },
};
use crate::entity::foods::{
    ActiveModel as FoodActiveModel, Column as FoodColumn, Entity as FoodEntity, Model as FoodModel,
};

#[derive(Debug, Clone)]
pub struct PostgresFoodCatalogRepository {
    pub db: DatabaseConnection,
}

impl PostgresFoodCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts foods whose id is not stored yet; existing rows are kept as is.
    pub async fn import_foods(&self, foods: Vec<Food>) -> Result<u64, CoreError> {
        if foods.is_empty() {
            return Ok(0);
        }

        let models: Vec<FoodActiveModel> = foods.into_iter().map(FoodActiveModel::from).collect();
        let inserted = FoodEntity::insert_many(models)
            .on_conflict(
                OnConflict::column(FoodColumn::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to import foods: {}", e);
                CoreError::InternalServerError
            })?;

        info!(inserted, "food catalog import finished");
        Ok(inserted)
    }
}

/// Escapes LIKE wildcards so user input matches literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped.to_lowercase())
}

fn visibility_condition(viewer_id: Option<Uuid>) -> Condition {
    let public = Condition::all().add(FoodColumn::Visibility.eq(FoodVisibility::Public.as_str()));

    match viewer_id {
        Some(viewer_id) => Condition::any().add(public).add(
            Condition::all()
                .add(FoodColumn::Visibility.eq(FoodVisibility::Private.as_str()))
                .add(FoodColumn::OwnerId.eq(viewer_id)),
        ),
        None => public,
    }
}

fn to_foods(models: Vec<FoodModel>) -> Result<Vec<Food>, CoreError> {
    models
        .into_iter()
        .map(|model| {
            Food::try_from(model).map_err(|e| {
                error!("Failed to map stored food: {}", e);
                CoreError::InternalServerError
            })
        })
        .collect()
}

impl FoodCatalogRepository for PostgresFoodCatalogRepository {
    async fn query_foods(&self, query: FoodQuery) -> Result<Vec<Food>, CoreError> {
        let mut select = FoodEntity::find().filter(visibility_condition(query.viewer_id));

        if let Some(needle) = query.name_contains.as_deref().map(str::trim)
            && !needle.is_empty()
        {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(FoodColumn::Name))).like(like_pattern(needle)),
            );
        }

        if let Some(category) = query.category.as_deref().map(str::trim)
            && !category.is_empty()
        {
            select = select.filter(Expr::cust_with_values(
                "LOWER(TRIM(category)) = ?",
                [category.to_lowercase()],
            ));
        }

        select = select.order_by_asc(FoodColumn::Name);

        if let Some(limit) = query.limit {
            select = select.limit(limit as u64);
        }

        let models = select.all(&self.db).await.map_err(|e| {
            error!("Failed to query foods: {}", e);
            CoreError::DataUnavailable
        })?;

        to_foods(models)
    }

    async fn get_food_by_id(&self, food_id: Uuid) -> Result<Option<Food>, CoreError> {
        let model = FoodEntity::find_by_id(food_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get food by id: {}", e);
                CoreError::DataUnavailable
            })?;

        model
            .map(|model| {
                Food::try_from(model).map_err(|e| {
                    error!("Failed to map stored food {}: {}", food_id, e);
                    CoreError::InternalServerError
                })
            })
            .transpose()
    }

    async fn get_foods_by_ids(&self, food_ids: Vec<Uuid>) -> Result<Vec<Food>, CoreError> {
        if food_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = FoodEntity::find()
            .filter(FoodColumn::Id.is_in(food_ids))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get foods by ids: {}", e);
                CoreError::DataUnavailable
            })?;

        to_foods(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Rice"), "%rice%");
        assert_eq!(like_pattern("100%_fat"), "%100\\%\\_fat%");
    }
}
