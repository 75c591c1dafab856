use std::collections::HashSet;

use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    food::ports::FoodCatalogRepository,
    health::ports::HealthCheckRepository,
    meal_plan::{
        aggregator::{DaySummary, FoodIndex, WeekSummary, day_summary, index_foods, week_summary},
        entities::{
            MealPlan, MealPlanConfig, PlanItem, PlanItemConfig, validate_day_index,
            validate_quantity, validate_unit,
        },
        ports::{MealPlanRepository, MealPlanService},
        substitution::{PlanItemChanges, apply_substitution, diff_plan_items},
        value_objects::{
            AddPlanItemInput, CreateMealPlanInput, RemovePlanItemInput, SavePlanItemsInput,
            SubstituteFoodInput, UpdatePlanItemInput, UpdatePlanStatusInput,
        },
    },
};

/// Fails early when the caller edited a stale copy of the plan. The store
/// checks again at write time.
fn ensure_version(plan: &MealPlan, expected_version: Option<i64>) -> Result<i64, CoreError> {
    match expected_version {
        Some(expected) if expected != plan.version => Err(CoreError::PersistenceConflict(format!(
            "plan {} is at version {}, edit was based on version {}",
            plan.id, plan.version, expected
        ))),
        _ => Ok(plan.version),
    }
}

impl<F, P, HC> Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    async fn load_existing_plan(&self, plan_id: Uuid) -> Result<MealPlan, CoreError> {
        self.meal_plan_repository
            .load_plan(plan_id)
            .await?
            .ok_or(CoreError::MealPlanNotFound(plan_id))
    }

    /// Every referenced food must exist and be visible to the editor.
    async fn require_foods(
        &self,
        food_ids: Vec<Uuid>,
        viewer_id: Option<Uuid>,
    ) -> Result<(), CoreError> {
        if food_ids.is_empty() {
            return Ok(());
        }

        let found: HashSet<Uuid> = self
            .food_catalog_repository
            .get_foods_by_ids(food_ids.clone())
            .await?
            .into_iter()
            .filter(|food| food.is_visible_to(viewer_id))
            .map(|food| food.id)
            .collect();

        match food_ids.into_iter().find(|id| !found.contains(id)) {
            Some(missing) => Err(CoreError::FoodNotFound(missing)),
            None => Ok(()),
        }
    }

    /// Resolves the plan's foods. A catalog outage fails the summary rather
    /// than reporting zero totals.
    async fn resolve_plan_foods(&self, plan: &MealPlan) -> Result<FoodIndex, CoreError> {
        let foods = self
            .food_catalog_repository
            .get_foods_by_ids(plan.food_ids())
            .await
            .map_err(|e| {
                error!("Failed to resolve foods for plan {}: {}", plan.id, e);
                e
            })?;

        Ok(index_foods(foods))
    }

    async fn persist_changes(
        &self,
        plan: &MealPlan,
        version: i64,
        changes: PlanItemChanges,
    ) -> Result<MealPlan, CoreError> {
        if changes.is_empty() {
            debug!(plan_id = %plan.id, "no item changes to persist");
            return Ok(plan.clone());
        }

        debug!(
            plan_id = %plan.id,
            inserted = changes.inserted.len(),
            updated = changes.updated.len(),
            deleted = changes.deleted.len(),
            "persisting plan item changes"
        );

        self.meal_plan_repository
            .apply_item_changes(plan.id, version, changes)
            .await
    }
}

impl<F, P, HC> MealPlanService for Service<F, P, HC>
where
    F: FoodCatalogRepository,
    P: MealPlanRepository,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self))]
    async fn create_plan(&self, input: CreateMealPlanInput) -> Result<MealPlan, CoreError> {
        let plan = MealPlan::new(MealPlanConfig {
            patient_id: input.patient_id,
            title: input.title,
            start_date: input.start_date,
            end_date: input.end_date,
        })?;

        let plan = self.meal_plan_repository.create_plan(plan).await?;
        info!(plan_id = %plan.id, "meal plan created");

        Ok(plan)
    }

    async fn get_plan(&self, plan_id: Uuid) -> Result<MealPlan, CoreError> {
        self.load_existing_plan(plan_id).await
    }

    async fn get_day_summary(&self, plan_id: Uuid, day_index: u8) -> Result<DaySummary, CoreError> {
        validate_day_index(day_index)?;

        let plan = self.load_existing_plan(plan_id).await?;
        let foods = self.resolve_plan_foods(&plan).await?;

        Ok(day_summary(&plan, day_index, &foods))
    }

    async fn get_week_summary(&self, plan_id: Uuid) -> Result<WeekSummary, CoreError> {
        let plan = self.load_existing_plan(plan_id).await?;
        let foods = self.resolve_plan_foods(&plan).await?;

        Ok(week_summary(&plan, &foods))
    }

    #[instrument(skip(self), fields(plan_id = %input.plan_id))]
    async fn add_item(&self, input: AddPlanItemInput) -> Result<MealPlan, CoreError> {
        let plan = self.load_existing_plan(input.plan_id).await?;
        let version = ensure_version(&plan, input.expected_version)?;

        self.visible_food(input.food_id, input.viewer_id).await?;

        let item = PlanItem::new(PlanItemConfig {
            plan_id: plan.id,
            day_index: input.day_index,
            meal_slot: input.meal_slot,
            food_id: input.food_id,
            quantity: input.quantity,
            unit: input.unit,
            recommended_time: input.recommended_time,
            note: input.note,
            order_index: plan.next_order_index(input.day_index, input.meal_slot),
        })?;

        self.persist_changes(&plan, version, PlanItemChanges::insert(item))
            .await
    }

    #[instrument(skip(self), fields(plan_id = %input.plan_id, item_id = %input.item_id))]
    async fn update_item(&self, input: UpdatePlanItemInput) -> Result<MealPlan, CoreError> {
        let plan = self.load_existing_plan(input.plan_id).await?;
        let version = ensure_version(&plan, input.expected_version)?;

        let original = plan
            .item(input.item_id)
            .ok_or(CoreError::PlanItemNotFound(input.item_id))?;
        let mut item = original.clone();

        if let Some(day_index) = input.day_index {
            item.day_index = day_index;
        }
        if let Some(meal_slot) = input.meal_slot {
            item.meal_slot = meal_slot;
        }
        if let Some(quantity) = input.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = input.unit {
            item.unit = unit;
        }
        if let Some(recommended_time) = input.recommended_time {
            item.recommended_time = recommended_time;
        }
        if let Some(note) = input.note {
            item.note = note;
        }
        if let Some(order_index) = input.order_index {
            item.order_index = order_index;
        }
        item.validate()?;

        if item == *original {
            return Ok(plan);
        }

        self.persist_changes(&plan, version, PlanItemChanges::update(item))
            .await
    }

    #[instrument(skip(self), fields(plan_id = %input.plan_id, item_id = %input.item_id))]
    async fn remove_item(&self, input: RemovePlanItemInput) -> Result<MealPlan, CoreError> {
        let plan = self.load_existing_plan(input.plan_id).await?;
        let version = ensure_version(&plan, input.expected_version)?;

        if plan.item(input.item_id).is_none() {
            return Err(CoreError::PlanItemNotFound(input.item_id));
        }

        self.persist_changes(&plan, version, PlanItemChanges::delete(input.item_id))
            .await
    }

    #[instrument(skip(self), fields(plan_id = %input.plan_id, item_id = %input.item_id))]
    async fn substitute_food(&self, input: SubstituteFoodInput) -> Result<MealPlan, CoreError> {
        let plan = self.load_existing_plan(input.plan_id).await?;
        let version = ensure_version(&plan, input.expected_version)?;

        let item = plan
            .item(input.item_id)
            .ok_or(CoreError::PlanItemNotFound(input.item_id))?;
        let previous_food = item.food_id;
        let replacement = self
            .visible_food(input.replacement_food_id, input.viewer_id)
            .await?;

        let substituted = apply_substitution(item, &replacement);
        if previous_food == replacement.id {
            return Ok(plan);
        }

        let updated = self
            .meal_plan_repository
            .update_item_food(plan.id, version, substituted.id, substituted.food_id)
            .await?;

        info!(
            from_food = %previous_food,
            to_food = %replacement.id,
            "plan item food substituted"
        );

        Ok(updated)
    }

    #[instrument(skip(self, input), fields(plan_id = %input.plan_id, items = input.items.len()))]
    async fn save_items(&self, input: SavePlanItemsInput) -> Result<MealPlan, CoreError> {
        let plan = self.load_existing_plan(input.plan_id).await?;
        let version = ensure_version(&plan, input.expected_version)?;

        let mut desired: Vec<PlanItem> = Vec::with_capacity(input.items.len());
        let mut seen: HashSet<Uuid> = HashSet::new();

        for draft in input.items {
            validate_day_index(draft.day_index)?;
            validate_quantity(draft.quantity)?;
            validate_unit(&draft.unit)?;

            let id = match draft.id {
                Some(id) if plan.item(id).is_none() => return Err(CoreError::PlanItemNotFound(id)),
                Some(id) => id,
                None => generate_uuid_v7(),
            };
            if !seen.insert(id) {
                return Err(CoreError::Invalid(format!("item {} appears twice", id)));
            }

            let order_index = draft.order_index.unwrap_or_else(|| {
                desired
                    .iter()
                    .filter(|item| item.day_index == draft.day_index && item.meal_slot == draft.meal_slot)
                    .map(|item| item.order_index + 1)
                    .max()
                    .unwrap_or(0)
            });

            desired.push(PlanItem {
                id,
                plan_id: plan.id,
                day_index: draft.day_index,
                meal_slot: draft.meal_slot,
                food_id: draft.food_id,
                quantity: draft.quantity,
                unit: draft.unit,
                recommended_time: draft.recommended_time,
                note: draft.note,
                order_index,
            });
        }

        let changes = diff_plan_items(&plan.items, &desired);

        let touched_foods: Vec<Uuid> = changes
            .inserted
            .iter()
            .chain(changes.updated.iter())
            .map(|item| item.food_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        self.require_foods(touched_foods, input.viewer_id).await?;

        self.persist_changes(&plan, version, changes).await
    }

    #[instrument(skip(self), fields(plan_id = %input.plan_id))]
    async fn update_status(&self, input: UpdatePlanStatusInput) -> Result<MealPlan, CoreError> {
        let plan = self.load_existing_plan(input.plan_id).await?;
        let version = ensure_version(&plan, input.expected_version)?;

        if plan.status == input.status {
            return Ok(plan);
        }

        self.meal_plan_repository
            .update_plan_status(plan.id, version, input.status)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food::entities::FoodVisibility;
    use crate::domain::meal_plan::{
        entities::{MealSlot, PlanStatus},
        value_objects::PlanItemDraft,
    };
    use chrono::NaiveTime;
    use crate::infrastructure::memory::{
        InMemoryFoodCatalogRepository, InMemoryHealthCheckRepository, InMemoryMealPlanRepository,
        fixtures,
    };
    use approx::assert_relative_eq;

    type TestService =
        Service<InMemoryFoodCatalogRepository, InMemoryMealPlanRepository, InMemoryHealthCheckRepository>;

    fn service() -> (TestService, fixtures::Seed) {
        let seed = fixtures::seed();
        let service = Service::new(
            InMemoryFoodCatalogRepository::with_foods(seed.foods.clone()),
            InMemoryMealPlanRepository::with_plans(vec![seed.plan.clone()]),
            InMemoryHealthCheckRepository,
        );
        (service, seed)
    }

    #[tokio::test]
    async fn test_day_summary_totals_rice_and_chicken() {
        let (service, seed) = service();

        let day = service.get_day_summary(seed.plan.id, 0).await.unwrap();

        assert!(!day.is_empty);
        assert_relative_eq!(day.totals.energy, 377.5);
    }

    #[tokio::test]
    async fn test_empty_day_summary() {
        let (service, seed) = service();

        let day = service.get_day_summary(seed.plan.id, 5).await.unwrap();

        assert!(day.is_empty);
        assert_eq!(day.totals.energy, 0.0);
        assert_eq!(day.totals.fiber, 0.0);
    }

    #[tokio::test]
    async fn test_day_out_of_range_is_invalid() {
        let (service, seed) = service();
        let err = service.get_day_summary(seed.plan.id, 7).await.unwrap_err();
        assert!(matches!(err, CoreError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_add_item_bumps_version_and_totals() {
        let (service, seed) = service();

        let plan = service
            .add_item(AddPlanItemInput {
                plan_id: seed.plan.id,
                expected_version: Some(seed.plan.version),
                day_index: 0,
                meal_slot: MealSlot::Lunch,
                food_id: seed.potato.id,
                quantity: 100.0,
                unit: "g".to_string(),
                recommended_time: None,
                note: None,
                viewer_id: None,
            })
            .await
            .unwrap();

        assert_eq!(plan.version, seed.plan.version + 1);
        let added = plan.items.iter().find(|i| i.food_id == seed.potato.id).unwrap();
        // rice and chicken already sit in the lunch slot
        assert_eq!(added.order_index, 2);

        let day = service.get_day_summary(seed.plan.id, 0).await.unwrap();
        assert_relative_eq!(day.totals.energy, 377.5 + 77.0);
    }

    #[tokio::test]
    async fn test_stale_version_is_a_conflict() {
        let (service, seed) = service();

        let err = service
            .remove_item(RemovePlanItemInput {
                plan_id: seed.plan.id,
                item_id: seed.plan.items[0].id,
                expected_version: Some(seed.plan.version + 3),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::PersistenceConflict(_)));
        let plan = service.get_plan(seed.plan.id).await.unwrap();
        assert_eq!(plan.items.len(), seed.plan.items.len());
    }

    #[tokio::test]
    async fn test_substitution_keeps_quantity_and_schedule() {
        let (service, seed) = service();
        let rice_item = seed
            .plan
            .items
            .iter()
            .find(|i| i.food_id == seed.rice.id)
            .unwrap()
            .clone();

        let plan = service
            .substitute_food(SubstituteFoodInput {
                plan_id: seed.plan.id,
                item_id: rice_item.id,
                replacement_food_id: seed.potato.id,
                expected_version: None,
                viewer_id: None,
            })
            .await
            .unwrap();

        let substituted = plan.item(rice_item.id).unwrap();
        assert_eq!(substituted.food_id, seed.potato.id);
        assert_eq!(
            PlanItem {
                food_id: rice_item.food_id,
                ..substituted.clone()
            },
            rice_item
        );
        assert_eq!(plan.version, seed.plan.version + 1);
    }

    #[tokio::test]
    async fn test_substitution_with_unknown_food_fails() {
        let (service, seed) = service();
        let missing = Uuid::new_v4();

        let err = service
            .substitute_food(SubstituteFoodInput {
                plan_id: seed.plan.id,
                item_id: seed.plan.items[0].id,
                replacement_food_id: missing,
                expected_version: None,
                viewer_id: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::FoodNotFound(missing));
    }

    #[tokio::test]
    async fn test_update_item_changes_only_requested_fields() {
        let (service, seed) = service();
        let target = seed.plan.items[0].clone();

        let plan = service
            .update_item(UpdatePlanItemInput {
                plan_id: seed.plan.id,
                item_id: target.id,
                quantity: Some(60.0),
                note: Some(Some("half portion".to_string())),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = plan.item(target.id).unwrap();
        assert_eq!(updated.quantity, 60.0);
        assert_eq!(updated.note.as_deref(), Some("half portion"));
        assert_eq!(updated.meal_slot, target.meal_slot);
        assert_eq!(updated.food_id, target.food_id);
    }

    #[tokio::test]
    async fn test_update_item_can_clear_note_and_time() {
        let (service, seed) = service();
        let target = seed.plan.items[0].clone();
        service
            .update_item(UpdatePlanItemInput {
                plan_id: seed.plan.id,
                item_id: target.id,
                recommended_time: Some(NaiveTime::from_hms_opt(12, 30, 0)),
                note: Some(Some("after training".to_string())),
                ..Default::default()
            })
            .await
            .unwrap();

        let plan = service
            .update_item(UpdatePlanItemInput {
                plan_id: seed.plan.id,
                item_id: target.id,
                recommended_time: Some(None),
                note: Some(None),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = plan.item(target.id).unwrap();
        assert_eq!(updated.note, None);
        assert_eq!(updated.recommended_time, None);
        assert_eq!(updated.quantity, target.quantity);
    }

    #[tokio::test]
    async fn test_save_items_diffs_against_stored_plan() {
        let (service, seed) = service();
        let kept = seed.plan.items[0].clone();

        let plan = service
            .save_items(SavePlanItemsInput {
                plan_id: seed.plan.id,
                expected_version: Some(seed.plan.version),
                viewer_id: None,
                items: vec![
                    PlanItemDraft {
                        id: Some(kept.id),
                        day_index: kept.day_index,
                        meal_slot: kept.meal_slot,
                        food_id: kept.food_id,
                        quantity: kept.quantity,
                        unit: kept.unit.clone(),
                        recommended_time: kept.recommended_time,
                        note: kept.note.clone(),
                        order_index: Some(kept.order_index),
                    },
                    PlanItemDraft {
                        id: None,
                        day_index: 3,
                        meal_slot: MealSlot::Breakfast,
                        food_id: seed.potato.id,
                        quantity: 200.0,
                        unit: "g".to_string(),
                        recommended_time: None,
                        note: None,
                        order_index: None,
                    },
                ],
            })
            .await
            .unwrap();

        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.item(kept.id), Some(&kept));
        assert!(plan.items.iter().any(|i| i.day_index == 3 && i.food_id == seed.potato.id));
        assert_eq!(plan.version, seed.plan.version + 1);
    }

    #[tokio::test]
    async fn test_save_items_rejects_unknown_food() {
        let (service, seed) = service();
        let missing = Uuid::new_v4();

        let err = service
            .save_items(SavePlanItemsInput {
                plan_id: seed.plan.id,
                expected_version: None,
                viewer_id: None,
                items: vec![PlanItemDraft {
                    id: None,
                    day_index: 1,
                    meal_slot: MealSlot::Dinner,
                    food_id: missing,
                    quantity: 100.0,
                    unit: "g".to_string(),
                    recommended_time: None,
                    note: None,
                    order_index: None,
                }],
            })
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::FoodNotFound(missing));
    }

    #[tokio::test]
    async fn test_summaries_fail_when_catalog_is_unavailable() {
        let (service, seed) = service();
        service.food_catalog_repository.set_unavailable(true);

        let err = service.get_day_summary(seed.plan.id, 0).await.unwrap_err();
        assert_eq!(err, CoreError::DataUnavailable);

        let err = service.get_week_summary(seed.plan.id).await.unwrap_err();
        assert_eq!(err, CoreError::DataUnavailable);
    }

    #[tokio::test]
    async fn test_private_foods_cannot_be_planned_by_other_viewers() {
        let owner = Uuid::new_v4();
        let mut seed = fixtures::seed();
        for food in seed.foods.iter_mut().filter(|f| f.id == seed.potato.id) {
            food.visibility = FoodVisibility::Private;
            food.owner_id = Some(owner);
        }
        let service = Service::new(
            InMemoryFoodCatalogRepository::with_foods(seed.foods.clone()),
            InMemoryMealPlanRepository::with_plans(vec![seed.plan.clone()]),
            InMemoryHealthCheckRepository,
        );
        let add = |viewer_id| AddPlanItemInput {
            plan_id: seed.plan.id,
            expected_version: None,
            day_index: 1,
            meal_slot: MealSlot::Dinner,
            food_id: seed.potato.id,
            quantity: 150.0,
            unit: "g".to_string(),
            recommended_time: None,
            note: None,
            viewer_id,
        };

        let err = service.add_item(add(None)).await.unwrap_err();
        assert_eq!(err, CoreError::FoodNotFound(seed.potato.id));

        let err = service
            .substitute_food(SubstituteFoodInput {
                plan_id: seed.plan.id,
                item_id: seed.plan.items[0].id,
                replacement_food_id: seed.potato.id,
                expected_version: None,
                viewer_id: Some(Uuid::new_v4()),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::FoodNotFound(seed.potato.id));

        let err = service
            .save_items(SavePlanItemsInput {
                plan_id: seed.plan.id,
                expected_version: None,
                viewer_id: None,
                items: vec![PlanItemDraft {
                    id: None,
                    day_index: 2,
                    meal_slot: MealSlot::Lunch,
                    food_id: seed.potato.id,
                    quantity: 100.0,
                    unit: "g".to_string(),
                    recommended_time: None,
                    note: None,
                    order_index: None,
                }],
            })
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::FoodNotFound(seed.potato.id));

        let plan = service.add_item(add(Some(owner))).await.unwrap();
        assert!(plan.items.iter().any(|i| i.food_id == seed.potato.id));
    }

    #[tokio::test]
    async fn test_update_status() {
        let (service, seed) = service();

        let plan = service
            .update_status(UpdatePlanStatusInput {
                plan_id: seed.plan.id,
                expected_version: None,
                status: PlanStatus::Paused,
            })
            .await
            .unwrap();

        assert_eq!(plan.status, PlanStatus::Paused);
    }

    #[tokio::test]
    async fn test_create_plan_starts_empty() {
        let (service, seed) = service();

        let plan = service
            .create_plan(CreateMealPlanInput {
                patient_id: seed.plan.patient_id,
                title: "Maintenance".to_string(),
                start_date: seed.plan.start_date,
                end_date: None,
            })
            .await
            .unwrap();

        let week = service.get_week_summary(plan.id).await.unwrap();
        assert!(week.days.iter().all(|d| d.is_empty));
    }
}
