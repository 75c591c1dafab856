use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{entities::app_errors::CoreError, generate_timestamp};

/// Days in a plan week, indexed 0..=6.
pub const DAYS_PER_WEEK: u8 = 7;

/// Named time-of-day meal. Declaration order is the display order inside a day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
    Supper,
}

impl MealSlot {
    pub const ALL: [MealSlot; 6] = [
        MealSlot::Breakfast,
        MealSlot::MorningSnack,
        MealSlot::Lunch,
        MealSlot::AfternoonSnack,
        MealSlot::Dinner,
        MealSlot::Supper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::MorningSnack => "morning_snack",
            MealSlot::Lunch => "lunch",
            MealSlot::AfternoonSnack => "afternoon_snack",
            MealSlot::Dinner => "dinner",
            MealSlot::Supper => "supper",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| CoreError::Invalid(format!("unknown meal slot: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Active,
    Paused,
    Finished,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Paused => "paused",
            PlanStatus::Finished => "finished",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PlanStatus::Active),
            "paused" => Ok(PlanStatus::Paused),
            "finished" => Ok(PlanStatus::Finished),
            other => Err(CoreError::Invalid(format!("unknown plan status: {}", other))),
        }
    }
}

/// One scheduled food entry of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlanItem {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub day_index: u8,
    pub meal_slot: MealSlot,
    pub food_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    #[schema(value_type = Option<String>, format = "time")]
    pub recommended_time: Option<NaiveTime>,
    pub note: Option<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone)]
pub struct PlanItemConfig {
    pub plan_id: Uuid,
    pub day_index: u8,
    pub meal_slot: MealSlot,
    pub food_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    pub recommended_time: Option<NaiveTime>,
    pub note: Option<String>,
    pub order_index: i32,
}

pub fn validate_day_index(day_index: u8) -> Result<(), CoreError> {
    if day_index >= DAYS_PER_WEEK {
        return Err(CoreError::Invalid(format!(
            "day index must be between 0 and {}, got {}",
            DAYS_PER_WEEK - 1,
            day_index
        )));
    }
    Ok(())
}

pub fn validate_quantity(quantity: f64) -> Result<(), CoreError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(CoreError::Invalid(format!(
            "quantity must be a positive number, got {}",
            quantity
        )));
    }
    Ok(())
}

pub fn validate_unit(unit: &str) -> Result<(), CoreError> {
    if unit.trim().is_empty() {
        return Err(CoreError::Invalid("unit is required".to_string()));
    }
    Ok(())
}

impl PlanItem {
    pub fn new(config: PlanItemConfig) -> Result<Self, CoreError> {
        validate_day_index(config.day_index)?;
        validate_quantity(config.quantity)?;
        validate_unit(&config.unit)?;

        let (_, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            plan_id: config.plan_id,
            day_index: config.day_index,
            meal_slot: config.meal_slot,
            food_id: config.food_id,
            quantity: config.quantity,
            unit: config.unit,
            recommended_time: config.recommended_time,
            note: config.note,
            order_index: config.order_index,
        })
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_day_index(self.day_index)?;
        validate_quantity(self.quantity)?;
        validate_unit(&self.unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPlan {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: PlanStatus,
    pub items: Vec<PlanItem>,
    /// Optimistic concurrency token, bumped by the store on every write.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MealPlanConfig {
    pub patient_id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl MealPlan {
    pub fn new(config: MealPlanConfig) -> Result<Self, CoreError> {
        if let Some(end_date) = config.end_date
            && end_date < config.start_date
        {
            return Err(CoreError::Invalid(
                "end date must not be before start date".to_string(),
            ));
        }

        let (now, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            patient_id: config.patient_id,
            title: config.title,
            start_date: config.start_date,
            end_date: config.end_date,
            status: PlanStatus::Active,
            items: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn item(&self, item_id: Uuid) -> Option<&PlanItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: Uuid) -> Option<&mut PlanItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Next free ordering index inside a day and slot.
    pub fn next_order_index(&self, day_index: u8, meal_slot: MealSlot) -> i32 {
        self.items
            .iter()
            .filter(|item| item.day_index == day_index && item.meal_slot == meal_slot)
            .map(|item| item.order_index + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn food_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.items.iter().map(|item| item.food_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> MealPlan {
        MealPlan::new(MealPlanConfig {
            patient_id: Uuid::new_v4(),
            title: "Week 1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            end_date: None,
        })
        .unwrap()
    }

    fn item_config(plan_id: Uuid) -> PlanItemConfig {
        PlanItemConfig {
            plan_id,
            day_index: 0,
            meal_slot: MealSlot::Lunch,
            food_id: Uuid::new_v4(),
            quantity: 100.0,
            unit: "g".to_string(),
            recommended_time: None,
            note: None,
            order_index: 0,
        }
    }

    #[test]
    fn test_empty_plan_is_valid() {
        let plan = plan();
        assert!(plan.items.is_empty());
        assert_eq!(plan.status, PlanStatus::Active);
        assert_eq!(plan.version, 0);
    }

    #[test]
    fn test_plan_item_rejects_bad_day_and_quantity() {
        let plan = plan();

        let mut config = item_config(plan.id);
        config.day_index = 7;
        assert!(PlanItem::new(config).is_err());

        let mut config = item_config(plan.id);
        config.quantity = 0.0;
        assert!(PlanItem::new(config).is_err());

        let mut config = item_config(plan.id);
        config.unit = " ".to_string();
        assert!(PlanItem::new(config).is_err());
    }

    #[test]
    fn test_next_order_index_is_per_slot() {
        let mut plan = plan();
        let mut first = PlanItem::new(item_config(plan.id)).unwrap();
        first.order_index = 3;
        plan.items.push(first);

        assert_eq!(plan.next_order_index(0, MealSlot::Lunch), 4);
        assert_eq!(plan.next_order_index(0, MealSlot::Dinner), 0);
        assert_eq!(plan.next_order_index(1, MealSlot::Lunch), 0);
    }

    #[test]
    fn test_meal_slot_round_trip_names() {
        assert_eq!("afternoon_snack".parse::<MealSlot>().unwrap(), MealSlot::AfternoonSnack);
        assert!("brunch".parse::<MealSlot>().is_err());
        assert!(MealSlot::Breakfast < MealSlot::Supper);
    }
}
