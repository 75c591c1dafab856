use chrono::Utc;
use sea_orm::ActiveValue::Set;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::entities::{MealPlan, PlanItem},
};
use crate::entity::{
    meal_plan_items::{ActiveModel as PlanItemActiveModel, Model as PlanItemModel},
    meal_plans::{ActiveModel as MealPlanActiveModel, Model as MealPlanModel},
};

impl TryFrom<PlanItemModel> for PlanItem {
    type Error = CoreError;

    fn try_from(model: PlanItemModel) -> Result<Self, Self::Error> {
        let day_index = u8::try_from(model.day_index)
            .map_err(|_| CoreError::Invalid(format!("stored day index {}", model.day_index)))?;

        Ok(PlanItem {
            id: model.id,
            plan_id: model.plan_id,
            day_index,
            meal_slot: model.meal_slot.parse()?,
            food_id: model.food_id,
            quantity: model.quantity,
            unit: model.unit,
            recommended_time: model.recommended_time,
            note: model.note,
            order_index: model.order_index,
        })
    }
}

impl From<&PlanItem> for PlanItemActiveModel {
    fn from(item: &PlanItem) -> Self {
        PlanItemActiveModel {
            id: Set(item.id),
            plan_id: Set(item.plan_id),
            day_index: Set(i16::from(item.day_index)),
            meal_slot: Set(item.meal_slot.as_str().to_string()),
            food_id: Set(item.food_id),
            quantity: Set(item.quantity),
            unit: Set(item.unit.clone()),
            recommended_time: Set(item.recommended_time),
            note: Set(item.note.clone()),
            order_index: Set(item.order_index),
        }
    }
}

/// Builds the aggregate from the plan row and its item rows.
pub fn to_meal_plan(
    model: MealPlanModel,
    items: Vec<PlanItemModel>,
) -> Result<MealPlan, CoreError> {
    let items = items
        .into_iter()
        .map(PlanItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MealPlan {
        id: model.id,
        patient_id: model.patient_id,
        title: model.title,
        start_date: model.start_date,
        end_date: model.end_date,
        status: model.status.parse()?,
        items,
        version: model.version,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

impl From<&MealPlan> for MealPlanActiveModel {
    fn from(plan: &MealPlan) -> Self {
        MealPlanActiveModel {
            id: Set(plan.id),
            patient_id: Set(plan.patient_id),
            title: Set(plan.title.clone()),
            start_date: Set(plan.start_date),
            end_date: Set(plan.end_date),
            status: Set(plan.status.as_str().to_string()),
            version: Set(plan.version),
            created_at: Set(plan.created_at.fixed_offset()),
            updated_at: Set(plan.updated_at.fixed_offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meal_plan::entities::MealSlot;
    use uuid::Uuid;

    fn item_model(day_index: i16, meal_slot: &str) -> PlanItemModel {
        PlanItemModel {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            day_index,
            meal_slot: meal_slot.to_string(),
            food_id: Uuid::new_v4(),
            quantity: 150.0,
            unit: "g".to_string(),
            recommended_time: None,
            note: None,
            order_index: 1,
        }
    }

    #[test]
    fn test_item_row_maps_slot_and_day() {
        let item = PlanItem::try_from(item_model(4, "morning_snack")).unwrap();
        assert_eq!(item.day_index, 4);
        assert_eq!(item.meal_slot, MealSlot::MorningSnack);
    }

    #[test]
    fn test_corrupt_item_row_is_rejected() {
        assert!(PlanItem::try_from(item_model(-1, "lunch")).is_err());
        assert!(PlanItem::try_from(item_model(0, "elevenses")).is_err());
    }
}
