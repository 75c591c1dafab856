use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::{
        aggregator::{DaySummary, WeekSummary},
        entities::{MealPlan, PlanStatus},
        substitution::PlanItemChanges,
        value_objects::{
            AddPlanItemInput, CreateMealPlanInput, RemovePlanItemInput, SavePlanItemsInput,
            SubstituteFoodInput, UpdatePlanItemInput, UpdatePlanStatusInput,
        },
    },
};

/// Plan store. Every write carries the version the caller loaded; the store
/// applies the write atomically, bumps the version, and fails with
/// `CoreError::PersistenceConflict` when the stored version differs.
#[cfg_attr(test, mockall::automock)]
pub trait MealPlanRepository: Send + Sync {
    fn create_plan(&self, plan: MealPlan)
    -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn load_plan(
        &self,
        plan_id: Uuid,
    ) -> impl Future<Output = Result<Option<MealPlan>, CoreError>> + Send;

    fn apply_item_changes(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        changes: PlanItemChanges,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn update_item_food(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        item_id: Uuid,
        food_id: Uuid,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn update_plan_status(
        &self,
        plan_id: Uuid,
        expected_version: i64,
        status: PlanStatus,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;
}

/// Service trait for meal plan editing and aggregation
pub trait MealPlanService: Send + Sync {
    fn create_plan(
        &self,
        input: CreateMealPlanInput,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn get_plan(&self, plan_id: Uuid) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn get_day_summary(
        &self,
        plan_id: Uuid,
        day_index: u8,
    ) -> impl Future<Output = Result<DaySummary, CoreError>> + Send;

    fn get_week_summary(
        &self,
        plan_id: Uuid,
    ) -> impl Future<Output = Result<WeekSummary, CoreError>> + Send;

    fn add_item(
        &self,
        input: AddPlanItemInput,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn update_item(
        &self,
        input: UpdatePlanItemInput,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn remove_item(
        &self,
        input: RemovePlanItemInput,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn substitute_food(
        &self,
        input: SubstituteFoodInput,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn save_items(
        &self,
        input: SavePlanItemsInput,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    fn update_status(
        &self,
        input: UpdatePlanStatusInput,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;
}
