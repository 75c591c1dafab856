use chrono::{NaiveDate, NaiveTime};
use nutriclinic_core::domain::meal_plan::{
    AddPlanItemInput, MealSlot, PlanItemDraft, PlanStatus, UpdatePlanItemInput,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Marks a field as present even when its value is `null`, so `null` can
/// clear it while an absent field leaves it unchanged.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMealPlanValidator {
    pub patient_id: Uuid,

    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddPlanItemValidator {
    #[serde(default)]
    pub expected_version: Option<i64>,

    #[validate(range(max = 6, message = "day_index must be between 0 and 6"))]
    pub day_index: u8,

    pub meal_slot: MealSlot,

    pub food_id: Uuid,

    #[validate(range(exclusive_min = 0.0, message = "quantity must be positive"))]
    pub quantity: f64,

    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = "time")]
    pub recommended_time: Option<NaiveTime>,

    #[serde(default)]
    pub note: Option<String>,
}

impl AddPlanItemValidator {
    pub fn into_input(self, plan_id: Uuid, viewer_id: Option<Uuid>) -> AddPlanItemInput {
        AddPlanItemInput {
            plan_id,
            expected_version: self.expected_version,
            day_index: self.day_index,
            meal_slot: self.meal_slot,
            food_id: self.food_id,
            quantity: self.quantity,
            unit: self.unit,
            recommended_time: self.recommended_time,
            note: self.note,
            viewer_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanItemValidator {
    #[serde(default)]
    pub expected_version: Option<i64>,

    #[serde(default)]
    #[validate(range(max = 6, message = "day_index must be between 0 and 6"))]
    pub day_index: Option<u8>,

    #[serde(default)]
    pub meal_slot: Option<MealSlot>,

    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "quantity must be positive"))]
    pub quantity: Option<f64>,

    #[serde(default)]
    #[validate(length(min = 1, message = "unit must not be empty"))]
    pub unit: Option<String>,

    /// `null` clears the time.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "time")]
    pub recommended_time: Option<Option<NaiveTime>>,

    /// `null` clears the note.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub note: Option<Option<String>>,

    #[serde(default)]
    pub order_index: Option<i32>,
}

impl UpdatePlanItemValidator {
    pub fn into_input(self, plan_id: Uuid, item_id: Uuid) -> UpdatePlanItemInput {
        UpdatePlanItemInput {
            plan_id,
            item_id,
            expected_version: self.expected_version,
            day_index: self.day_index,
            meal_slot: self.meal_slot,
            quantity: self.quantity,
            unit: self.unit,
            recommended_time: self.recommended_time,
            note: self.note,
            order_index: self.order_index,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlanItemDraftValidator {
    /// Existing item id; omit for new items.
    #[serde(default)]
    pub id: Option<Uuid>,

    #[validate(range(max = 6, message = "day_index must be between 0 and 6"))]
    pub day_index: u8,

    pub meal_slot: MealSlot,

    pub food_id: Uuid,

    #[validate(range(exclusive_min = 0.0, message = "quantity must be positive"))]
    pub quantity: f64,

    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = "time")]
    pub recommended_time: Option<NaiveTime>,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub order_index: Option<i32>,
}

impl From<PlanItemDraftValidator> for PlanItemDraft {
    fn from(draft: PlanItemDraftValidator) -> Self {
        PlanItemDraft {
            id: draft.id,
            day_index: draft.day_index,
            meal_slot: draft.meal_slot,
            food_id: draft.food_id,
            quantity: draft.quantity,
            unit: draft.unit,
            recommended_time: draft.recommended_time,
            note: draft.note,
            order_index: draft.order_index,
        }
    }
}

/// Full desired item list of a plan. Items missing from the list are removed.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SavePlanItemsValidator {
    #[serde(default)]
    pub expected_version: Option<i64>,

    #[validate(nested)]
    pub items: Vec<PlanItemDraftValidator>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubstituteFoodValidator {
    pub replacement_food_id: Uuid,

    #[serde(default)]
    pub expected_version: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanStatusValidator {
    pub status: PlanStatus,

    #[serde(default)]
    pub expected_version: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RemoveItemQuery {
    /// Version the client last saw.
    pub expected_version: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_item_rules() {
        let valid: AddPlanItemValidator = serde_json::from_value(json!({
            "day_index": 6,
            "meal_slot": "lunch",
            "food_id": Uuid::nil(),
            "quantity": 120.0,
            "unit": "g",
            "recommended_time": "12:30:00"
        }))
        .unwrap();
        assert!(valid.validate().is_ok());

        let invalid: AddPlanItemValidator = serde_json::from_value(json!({
            "day_index": 7,
            "meal_slot": "dinner",
            "food_id": Uuid::nil(),
            "quantity": 0.0,
            "unit": ""
        }))
        .unwrap();
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("day_index"));
        assert!(fields.contains_key("quantity"));
        assert!(fields.contains_key("unit"));
    }

    #[test]
    fn test_save_items_validates_each_draft() {
        let body: SavePlanItemsValidator = serde_json::from_value(json!({
            "expected_version": 3,
            "items": [
                { "day_index": 0, "meal_slot": "breakfast", "food_id": Uuid::nil(), "quantity": 50.0, "unit": "g" },
                { "day_index": 0, "meal_slot": "breakfast", "food_id": Uuid::nil(), "quantity": -1.0, "unit": "g" }
            ]
        }))
        .unwrap();

        assert!(body.validate().is_err());
    }

    #[test]
    fn test_update_item_null_clears_and_absent_keeps() {
        let cleared: UpdatePlanItemValidator = serde_json::from_value(json!({
            "note": null,
            "recommended_time": null
        }))
        .unwrap();
        let input = cleared.into_input(Uuid::nil(), Uuid::nil());
        assert_eq!(input.note, Some(None));
        assert_eq!(input.recommended_time, Some(None));

        let untouched: UpdatePlanItemValidator =
            serde_json::from_value(json!({ "quantity": 80.0 })).unwrap();
        let input = untouched.into_input(Uuid::nil(), Uuid::nil());
        assert_eq!(input.note, None);
        assert_eq!(input.recommended_time, None);

        let set: UpdatePlanItemValidator =
            serde_json::from_value(json!({ "note": "no salt", "recommended_time": "08:15:00" }))
                .unwrap();
        let input = set.into_input(Uuid::nil(), Uuid::nil());
        assert_eq!(input.note, Some(Some("no salt".to_string())));
        assert_eq!(input.recommended_time, Some(NaiveTime::from_hms_opt(8, 15, 0)));
    }
}
