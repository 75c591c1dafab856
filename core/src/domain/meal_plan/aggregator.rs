//! Day × meal-slot view of a plan and its nutrient totals.
//!
//! Nothing here is cached: every call recomputes from the plan items and the
//! resolved foods it is given.

use std::collections::HashMap;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    food::entities::{Food, NutrientKey},
    meal_plan::entities::{DAYS_PER_WEEK, MealPlan, MealSlot, PlanItem},
};

/// Foods resolved for a plan, keyed by id.
pub type FoodIndex = HashMap<Uuid, Food>;

pub fn index_foods(foods: Vec<Food>) -> FoodIndex {
    foods.into_iter().map(|food| (food.id, food)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutrientTotals {
    pub energy: f64,
    pub protein: f64,
    pub carbohydrate: f64,
    pub lipid: f64,
    pub fiber: f64,
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, other: NutrientTotals) -> NutrientTotals {
        NutrientTotals {
            energy: self.energy + other.energy,
            protein: self.protein + other.protein,
            carbohydrate: self.carbohydrate + other.carbohydrate,
            lipid: self.lipid + other.lipid,
            fiber: self.fiber + other.fiber,
        }
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, other: NutrientTotals) {
        *self = *self + other;
    }
}

impl std::iter::Sum for NutrientTotals {
    fn sum<I: Iterator<Item = NutrientTotals>>(iter: I) -> Self {
        iter.fold(NutrientTotals::default(), Add::add)
    }
}

/// Nutrients supplied by one item: per-100 g values scaled by the quantity.
/// Unknown nutrients, and items whose food is unresolved, contribute zero.
pub fn item_contribution(item: &PlanItem, food: Option<&Food>) -> NutrientTotals {
    let Some(food) = food else {
        return NutrientTotals::default();
    };

    let factor = item.quantity / 100.0;
    let amount = |key: NutrientKey| food.nutrients.get(key).unwrap_or(0.0) * factor;

    NutrientTotals {
        energy: amount(NutrientKey::EnergyKcal),
        protein: amount(NutrientKey::Protein),
        carbohydrate: amount(NutrientKey::Carbohydrate),
        lipid: amount(NutrientKey::Lipid),
        fiber: amount(NutrientKey::Fiber),
    }
}

/// Items of one day ordered by the fixed meal-slot order, then by ordering
/// index, then by their position in the plan.
pub fn items_by_day(plan: &MealPlan, day_index: u8) -> Vec<&PlanItem> {
    let mut items: Vec<&PlanItem> = plan
        .items
        .iter()
        .filter(|item| item.day_index == day_index)
        .collect();

    items.sort_by_key(|item| (item.meal_slot, item.order_index));
    items
}

pub fn daily_totals(plan: &MealPlan, day_index: u8, foods: &FoodIndex) -> NutrientTotals {
    plan.items
        .iter()
        .filter(|item| item.day_index == day_index)
        .map(|item| item_contribution(item, foods.get(&item.food_id)))
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemView {
    pub item: PlanItem,
    /// `None` when the referenced food is no longer in the catalog.
    pub food_name: Option<String>,
    pub contribution: NutrientTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SlotGroup {
    pub meal_slot: MealSlot,
    pub items: Vec<ItemView>,
    pub totals: NutrientTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DaySummary {
    pub day_index: u8,
    /// Only slots holding at least one item, in meal-slot order.
    pub slots: Vec<SlotGroup>,
    pub totals: NutrientTotals,
    /// True when the day has no items at all, as opposed to items that
    /// happen to add up to zero.
    pub is_empty: bool,
}

pub fn day_summary(plan: &MealPlan, day_index: u8, foods: &FoodIndex) -> DaySummary {
    let mut slots: Vec<SlotGroup> = Vec::new();

    for item in items_by_day(plan, day_index) {
        let food = foods.get(&item.food_id);
        let view = ItemView {
            item: item.clone(),
            food_name: food.map(|f| f.name.clone()),
            contribution: item_contribution(item, food),
        };

        match slots.last_mut() {
            Some(group) if group.meal_slot == item.meal_slot => {
                group.totals += view.contribution;
                group.items.push(view);
            }
            _ => slots.push(SlotGroup {
                meal_slot: item.meal_slot,
                totals: view.contribution,
                items: vec![view],
            }),
        }
    }

    let totals = slots.iter().map(|group| group.totals).sum();

    DaySummary {
        day_index,
        is_empty: slots.is_empty(),
        slots,
        totals,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeekSummary {
    pub plan_id: Uuid,
    pub days: Vec<DaySummary>,
    pub totals: NutrientTotals,
    /// Week totals divided by the number of days holding items.
    pub daily_average: NutrientTotals,
}

pub fn week_summary(plan: &MealPlan, foods: &FoodIndex) -> WeekSummary {
    let days: Vec<DaySummary> = (0..DAYS_PER_WEEK)
        .map(|day| day_summary(plan, day, foods))
        .collect();

    let totals: NutrientTotals = days.iter().map(|day| day.totals).sum();
    let planned_days = days.iter().filter(|day| !day.is_empty).count();

    let daily_average = if planned_days == 0 {
        NutrientTotals::default()
    } else {
        let n = planned_days as f64;
        NutrientTotals {
            energy: totals.energy / n,
            protein: totals.protein / n,
            carbohydrate: totals.carbohydrate / n,
            lipid: totals.lipid / n,
            fiber: totals.fiber / n,
        }
    };

    WeekSummary {
        plan_id: plan.id,
        days,
        totals,
        daily_average,
    }
}
