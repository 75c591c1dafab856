use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
    sea_query::Expr,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::{
        entities::{MealPlan, PlanStatus},
        ports::MealPlanRepository,
        substitution::PlanItemChanges,
    },
};
use crate::entity::{
    meal_plan_items::{
        ActiveModel as PlanItemActiveModel, Column as PlanItemColumn, Entity as PlanItemEntity,
    },
    meal_plans::{
        ActiveModel as MealPlanActiveModel, Column as MealPlanColumn, Entity as MealPlanEntity,
    },
};
use crate::infrastructure::meal_plan::mappers::to_meal_plan;

#[derive(Debug, Clone)]
pub struct PostgresMealPlanRepository {
    pub db: DatabaseConnection,
}

fn db_error(context: &str, e: DbErr) -> CoreError {
    error!("{}: {}", context, e);
    CoreError::InternalServerError
}

/// A rejected write (constraint violation, aborted commit) leaves the stored
/// plan unchanged, so the caller can reload and retry.
fn write_error(context: &str, e: DbErr) -> CoreError {
    error!("{}: {}", context, e);
    CoreError::PersistenceConflict(format!("{}: {}", context, e))
}

impl PostgresMealPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self) -> Result<DatabaseTransaction, CoreError> {
        self.db
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))
    }

    /// Bumps the plan version inside `txn` when it still equals
    /// `expected_version`. Losing the race rolls the whole write back.
    async fn claim_version(
        &self,
        txn: &DatabaseTransaction,
        plan_id: Uuid,
        expected_version: i64,
    ) -> Result<(), CoreError> {
        let result = MealPlanEntity::update_many()
            .col_expr(MealPlanColumn::Version, Expr::col(MealPlanColumn::Version).add(1))
            .col_expr(MealPlanColumn::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(MealPlanColumn::Id.eq(plan_id))
            .filter(MealPlanColumn::Version.eq(expected_version))
            .exec(txn)
            .await
            .map_err(|e| write_error("Failed to claim plan version", e))?;

        if result.rows_affected == 1 {
            return Ok(());
        }

        let exists = MealPlanEntity::find_by_id(plan_id)
            .one(txn)
            .await
            .map_err(|e| db_error("Failed to check plan", e))?
            .is_some();

        if !exists {
            return Err(CoreError::MealPlanNotFound(plan_id));
        }

        warn!(%plan_id, expected_version, "rejecting write on stale plan version");
        Err(CoreError::PersistenceConflict(format!(
            "plan {} was modified since version {}",
            plan_id, expected_version
        )))
    }

    async fn load_with<C>(&self, conn: &C, plan_id: Uuid) -> Result<Option<MealPlan>, CoreError>
    where
        C: sea_orm::ConnectionTrait,
    {
        let Some(plan) = MealPlanEntity::find_by_id(plan_id)
            .one(conn)
            .await
            .map_err(|e| db_error("Failed to load meal plan", e))?
        else {
            return Ok(None);
        };

        let items = PlanItemEntity::find()
            .filter(PlanItemColumn::PlanId.eq(plan_id))
            .order_by_asc(PlanItemColumn::DayIndex)
            .order_by_asc(PlanItemColumn::OrderIndex)
            .all(conn)
            .await
            .map_err(|e| db_error("Failed to load plan items", e))?;

        to_meal_plan(plan, items).map(Some).map_err(|e| {
            error!("Failed to map stored plan {}: {}", plan_id, e);
            CoreError::InternalServerError
        })
    }

    async fn commit_and_reload(
        &self,
        txn: DatabaseTransaction,
        plan_id: Uuid,
    ) -> Result<MealPlan, CoreError> {
        let plan = self.load_with(&txn, plan_id).await?;

        txn.commit()
            .await
            .map_err(|e| write_error("Failed to commit plan write", e))?;

        plan.ok_or(CoreError::MealPlanNotFound(plan_id))
    }
}

impl MealPlanRepository for PostgresMealPlanRepository {
    async fn create_plan(&self, plan: MealPlan) -> Result<MealPlan, CoreError> {
        let txn = self.begin().await?;

        MealPlanActiveModel::from(&plan)
            .insert(&txn)
            .await
            .map_err(|e| write_error("Failed to create meal plan", e))?;

        if !plan.items.is_empty() {
            PlanItemEntity::insert_many(plan.items.iter().map(PlanItemActiveModel::from))
                .exec_without_returning(&txn)
                .await
                .map_err(|e| write_error("Failed to create plan items", e))?;
        }

        self.commit_and_reload(txn, plan.id).await
    }

    async fn load_plan(&self, plan_id: Uuid) -> Result<Option<MealPlan>, CoreError> {
        self.load_with(&self.db, plan_id).await
    }

    async fn apply_item_changes(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        changes: PlanItemChanges,
    ) -> Result<MealPlan, CoreError> {
        let txn = self.begin().await?;
        self.claim_version(&txn, plan_id, expected_version).await?;

        if !changes.deleted.is_empty() {
            let expected = changes.deleted.len() as u64;
            let result = PlanItemEntity::delete_many()
                .filter(PlanItemColumn::PlanId.eq(plan_id))
                .filter(PlanItemColumn::Id.is_in(changes.deleted.clone()))
                .exec(&txn)
                .await
                .map_err(|e| write_error("Failed to delete plan items", e))?;

            if result.rows_affected != expected {
                return Err(CoreError::PersistenceConflict(
                    "some deleted items were no longer in the plan".to_string(),
                ));
            }
        }

        for item in &changes.updated {
            let result = PlanItemEntity::update_many()
                .set(PlanItemActiveModel::from(item))
                .filter(PlanItemColumn::Id.eq(item.id))
                .filter(PlanItemColumn::PlanId.eq(plan_id))
                .exec(&txn)
                .await
                .map_err(|e| write_error("Failed to update plan item", e))?;

            if result.rows_affected == 0 {
                return Err(CoreError::PlanItemNotFound(item.id));
            }
        }

        if !changes.inserted.is_empty() {
            PlanItemEntity::insert_many(changes.inserted.iter().map(PlanItemActiveModel::from))
                .exec_without_returning(&txn)
                .await
                .map_err(|e| write_error("Failed to insert plan items", e))?;
        }

        self.commit_and_reload(txn, plan_id).await
    }

    async fn update_item_food(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        item_id: Uuid,
        food_id: Uuid,
    ) -> Result<MealPlan, CoreError> {
        let txn = self.begin().await?;
        self.claim_version(&txn, plan_id, expected_version).await?;

        let result = PlanItemEntity::update_many()
            .col_expr(PlanItemColumn::FoodId, Expr::value(food_id))
            .filter(PlanItemColumn::Id.eq(item_id))
            .filter(PlanItemColumn::PlanId.eq(plan_id))
            .exec(&txn)
            .await
            .map_err(|e| write_error("Failed to substitute plan item food", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::PlanItemNotFound(item_id));
        }

        self.commit_and_reload(txn, plan_id).await
    }

    async fn update_plan_status(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        status: PlanStatus,
    ) -> Result<MealPlan, CoreError> {
        let txn = self.begin().await?;
        self.claim_version(&txn, plan_id, expected_version).await?;

        MealPlanEntity::update_many()
            .col_expr(MealPlanColumn::Status, Expr::value(status.as_str()))
            .filter(MealPlanColumn::Id.eq(plan_id))
            .exec(&txn)
            .await
            .map_err(|e| write_error("Failed to update plan status", e))?;

        self.commit_and_reload(txn, plan_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failures_are_persistence_conflicts() {
        let err = write_error(
            "Failed to insert plan items",
            DbErr::Custom("violates foreign key constraint".to_string()),
        );

        match err {
            CoreError::PersistenceConflict(message) => {
                assert!(message.starts_with("Failed to insert plan items"));
                assert!(message.contains("violates foreign key constraint"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_read_failures_stay_internal() {
        let err = db_error("Failed to load meal plan", DbErr::Custom("timeout".to_string()));
        assert_eq!(err, CoreError::InternalServerError);
    }
}
