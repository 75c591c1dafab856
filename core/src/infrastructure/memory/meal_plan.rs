use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::{
        entities::{MealPlan, PlanStatus},
        ports::MealPlanRepository,
        substitution::PlanItemChanges,
    },
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryMealPlanRepository {
    plans: Arc<RwLock<HashMap<Uuid, MealPlan>>>,
}

impl InMemoryMealPlanRepository {
    pub fn with_plans(plans: Vec<MealPlan>) -> Self {
        Self {
            plans: Arc::new(RwLock::new(
                plans.into_iter().map(|plan| (plan.id, plan)).collect(),
            )),
        }
    }

    /// Runs `write` against the stored plan when its version still matches,
    /// then bumps the version.
    async fn write_plan<W>(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        write: W,
    ) -> Result<MealPlan, CoreError>
    where
        W: FnOnce(&mut MealPlan) -> Result<(), CoreError>,
    {
        let mut plans = self.plans.write().await;
        let plan = plans
            .get_mut(&plan_id)
            .ok_or(CoreError::MealPlanNotFound(plan_id))?;

        if plan.version != expected_version {
            warn!(
                %plan_id,
                stored = plan.version,
                expected = expected_version,
                "rejecting write on stale plan version"
            );
            return Err(CoreError::PersistenceConflict(format!(
                "plan {} is at version {}, write expected {}",
                plan_id, plan.version, expected_version
            )));
        }

        // work on a copy so a failed write leaves the stored plan untouched
        let mut next = plan.clone();
        write(&mut next)?;
        next.version += 1;
        next.updated_at = Utc::now();
        *plan = next.clone();

        Ok(next)
    }
}

impl MealPlanRepository for InMemoryMealPlanRepository {
    async fn create_plan(&self, plan: MealPlan) -> Result<MealPlan, CoreError> {
        let mut plans = self.plans.write().await;
        if plans.contains_key(&plan.id) {
            return Err(CoreError::PersistenceConflict(format!(
                "plan {} already exists",
                plan.id
            )));
        }
        plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn load_plan(&self, plan_id: Uuid) -> Result<Option<MealPlan>, CoreError> {
        Ok(self.plans.read().await.get(&plan_id).cloned())
    }

    async fn apply_item_changes(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        changes: PlanItemChanges,
    ) -> Result<MealPlan, CoreError> {
        self.write_plan(plan_id, expected_version, |plan| {
            let missing = changes
                .updated
                .iter()
                .map(|item| item.id)
                .chain(changes.deleted.iter().copied())
                .find(|id| plan.item(*id).is_none());
            if let Some(item_id) = missing {
                return Err(CoreError::PlanItemNotFound(item_id));
            }

            changes.apply_to(&mut plan.items);
            Ok(())
        })
        .await
    }

    async fn update_item_food(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        item_id: Uuid,
        food_id: Uuid,
    ) -> Result<MealPlan, CoreError> {
        self.write_plan(plan_id, expected_version, |plan| {
            let item = plan
                .item_mut(item_id)
                .ok_or(CoreError::PlanItemNotFound(item_id))?;
            item.food_id = food_id;
            Ok(())
        })
        .await
    }

    async fn update_plan_status(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        status: PlanStatus,
    ) -> Result<MealPlan, CoreError> {
        self.write_plan(plan_id, expected_version, |plan| {
            plan.status = status;
            Ok(())
        })
        .await
    }
}
