use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{food::entities::Food, meal_plan::entities::PlanItem};

/// Returns `item` pointing at `replacement`. Quantity, unit, day, slot, time,
/// note and ordering index are left untouched: a suggested equivalent
/// quantity is never applied here, the clinician confirms it separately.
pub fn apply_substitution(item: &PlanItem, replacement: &Food) -> PlanItem {
    PlanItem {
        food_id: replacement.id,
        ..item.clone()
    }
}

/// Item-level difference between the stored and the desired item set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlanItemChanges {
    pub inserted: Vec<PlanItem>,
    pub updated: Vec<PlanItem>,
    pub deleted: Vec<Uuid>,
}

impl PlanItemChanges {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    pub fn insert(item: PlanItem) -> Self {
        Self {
            inserted: vec![item],
            ..Default::default()
        }
    }

    pub fn update(item: PlanItem) -> Self {
        Self {
            updated: vec![item],
            ..Default::default()
        }
    }

    pub fn delete(item_id: Uuid) -> Self {
        Self {
            deleted: vec![item_id],
            ..Default::default()
        }
    }

    /// Applies the changes to an in-memory item list, keeping the position of
    /// updated items and appending inserted ones.
    pub fn apply_to(&self, items: &mut Vec<PlanItem>) {
        let deleted: HashSet<Uuid> = self.deleted.iter().copied().collect();
        items.retain(|item| !deleted.contains(&item.id));

        let updated: HashMap<Uuid, &PlanItem> =
            self.updated.iter().map(|item| (item.id, item)).collect();
        for item in items.iter_mut() {
            if let Some(replacement) = updated.get(&item.id) {
                *item = (*replacement).clone();
            }
        }

        items.extend(self.inserted.iter().cloned());
    }
}

/// Computes the upserts and deletes turning `current` into `desired`.
/// Items are matched by id; unchanged items produce no update.
pub fn diff_plan_items(current: &[PlanItem], desired: &[PlanItem]) -> PlanItemChanges {
    let existing: HashMap<Uuid, &PlanItem> = current.iter().map(|item| (item.id, item)).collect();
    let wanted: HashSet<Uuid> = desired.iter().map(|item| item.id).collect();

    let mut changes = PlanItemChanges::default();

    for item in desired {
        match existing.get(&item.id) {
            None => changes.inserted.push(item.clone()),
            Some(stored) if *stored != item => changes.updated.push(item.clone()),
            Some(_) => {}
        }
    }

    changes.deleted = current
        .iter()
        .filter(|item| !wanted.contains(&item.id))
        .map(|item| item.id)
        .collect();

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        food::entities::{FoodConfig, FoodVisibility, Nutrients},
        meal_plan::entities::{MealSlot, PlanItemConfig},
    };
    use chrono::NaiveTime;

    fn item(order_index: i32) -> PlanItem {
        PlanItem::new(PlanItemConfig {
            plan_id: Uuid::new_v4(),
            day_index: 2,
            meal_slot: MealSlot::AfternoonSnack,
            food_id: Uuid::new_v4(),
            quantity: 120.0,
            unit: "g".to_string(),
            recommended_time: NaiveTime::from_hms_opt(16, 30, 0),
            note: Some("with tea".to_string()),
            order_index,
        })
        .unwrap()
    }

    #[test]
    fn test_substitution_only_changes_food() {
        let original = item(3);
        let replacement = Food::new(FoodConfig {
            name: "Banana".to_string(),
            category: Some("Fruits".to_string()),
            nutrients: Nutrients::default(),
            visibility: FoodVisibility::Public,
            owner_id: None,
        })
        .unwrap();

        let substituted = apply_substitution(&original, &replacement);

        assert_eq!(substituted.food_id, replacement.id);
        assert_eq!(
            PlanItem {
                food_id: original.food_id,
                ..substituted.clone()
            },
            original
        );
        assert_eq!(substituted.quantity.to_bits(), original.quantity.to_bits());
    }

    #[test]
    fn test_diff_classifies_inserts_updates_and_deletes() {
        let kept = item(0);
        let edited = item(1);
        let removed = item(2);
        let current = vec![kept.clone(), edited.clone(), removed.clone()];

        let mut edited_now = edited.clone();
        edited_now.quantity = 80.0;
        let added = item(3);
        let desired = vec![kept.clone(), edited_now.clone(), added.clone()];

        let changes = diff_plan_items(&current, &desired);

        assert_eq!(changes.inserted, vec![added]);
        assert_eq!(changes.updated, vec![edited_now]);
        assert_eq!(changes.deleted, vec![removed.id]);

        let mut applied = current.clone();
        changes.apply_to(&mut applied);
        assert_eq!(applied, desired);
    }

    #[test]
    fn test_diff_of_identical_sets_is_empty() {
        let items = vec![item(0), item(1)];
        assert!(diff_plan_items(&items, &items).is_empty());
    }
}
