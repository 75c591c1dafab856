use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::domain::meal_plan::entities::{MealSlot, PlanStatus};

#[derive(Debug, Clone)]
pub struct CreateMealPlanInput {
    pub patient_id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct AddPlanItemInput {
    pub plan_id: Uuid,
    /// Version the client last saw; `None` accepts the current one.
    pub expected_version: Option<i64>,
    pub day_index: u8,
    pub meal_slot: MealSlot,
    pub food_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    pub recommended_time: Option<NaiveTime>,
    pub note: Option<String>,
    /// Private foods are only usable by their owner.
    pub viewer_id: Option<Uuid>,
}

/// Absent fields are left untouched. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlanItemInput {
    pub plan_id: Uuid,
    pub item_id: Uuid,
    pub expected_version: Option<i64>,
    pub day_index: Option<u8>,
    pub meal_slot: Option<MealSlot>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub recommended_time: Option<Option<NaiveTime>>,
    pub note: Option<Option<String>>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct RemovePlanItemInput {
    pub plan_id: Uuid,
    pub item_id: Uuid,
    pub expected_version: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SubstituteFoodInput {
    pub plan_id: Uuid,
    pub item_id: Uuid,
    pub replacement_food_id: Uuid,
    pub expected_version: Option<i64>,
    pub viewer_id: Option<Uuid>,
}

/// Desired state of one item in a full save. Items without an id are new.
#[derive(Debug, Clone)]
pub struct PlanItemDraft {
    pub id: Option<Uuid>,
    pub day_index: u8,
    pub meal_slot: MealSlot,
    pub food_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    pub recommended_time: Option<NaiveTime>,
    pub note: Option<String>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct SavePlanItemsInput {
    pub plan_id: Uuid,
    pub expected_version: Option<i64>,
    pub viewer_id: Option<Uuid>,
    pub items: Vec<PlanItemDraft>,
}

#[derive(Debug, Clone)]
pub struct UpdatePlanStatusInput {
    pub plan_id: Uuid,
    pub expected_version: Option<i64>,
    pub status: PlanStatus,
}
