//! Range filter and comparator engine used by food search.
//!
//! The engine is generic over [`FilterRecord`] so the same rules apply to any
//! record exposing nutrient values and text fields. All functions are pure:
//! the caller passes an immutable [`FoodFilterSpec`] and gets a new list back.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::food::{
    entities::{Food, NutrientKey},
    value_objects::{FoodFilterSpec, FoodSortField, RangeFilter},
};

pub trait FilterRecord {
    fn nutrient(&self, key: NutrientKey) -> Option<f64>;
    fn name(&self) -> &str;
    fn category(&self) -> Option<&str>;
}

impl FilterRecord for Food {
    fn nutrient(&self, key: NutrientKey) -> Option<f64> {
        self.nutrients.get(key)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        self.category_label()
    }
}

/// Locale-aware text ordering: case-insensitive first, raw string as tie-break
/// so the ordering stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn matches_range<T: FilterRecord>(record: &T, range: &RangeFilter) -> bool {
    // unknown values compare as zero
    let value = record.nutrient(range.field).unwrap_or(0.0);

    if let Some(min) = range.min
        && value < min
    {
        return false;
    }
    if let Some(max) = range.max
        && value > max
    {
        return false;
    }
    true
}

pub fn matches<T: FilterRecord>(record: &T, spec: &FoodFilterSpec) -> bool {
    if !spec.ranges.iter().all(|range| matches_range(record, range)) {
        return false;
    }

    if let Some(category) = spec
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        let same = record
            .category()
            .is_some_and(|own| own.trim().to_lowercase() == category.to_lowercase());
        if !same {
            return false;
        }
    }

    if let Some(needle) = spec
        .name_contains
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        && !record.name().to_lowercase().contains(&needle.to_lowercase())
    {
        return false;
    }

    true
}

fn compare_by<T: FilterRecord>(a: &T, b: &T, field: FoodSortField) -> Ordering {
    match field {
        FoodSortField::Name => collate(a.name(), b.name()),
        FoodSortField::Category => collate(a.category().unwrap_or(""), b.category().unwrap_or("")),
        FoodSortField::Nutrient(key) => {
            let left = a.nutrient(key).unwrap_or(0.0);
            let right = b.nutrient(key).unwrap_or(0.0);
            left.total_cmp(&right)
        }
    }
}

/// Applies every filter of `spec` (logical AND) and then the optional sort.
/// The sort is stable, equal keys keep their input order in both directions.
pub fn filter_and_sort<T: FilterRecord + Clone>(records: &[T], spec: &FoodFilterSpec) -> Vec<T> {
    let mut selected: Vec<T> = records
        .iter()
        .filter(|record| matches(*record, spec))
        .cloned()
        .collect();

    if let Some(sort) = spec.sort {
        selected.sort_by(|a, b| {
            let ordering = compare_by(a, b, sort.field);
            if sort.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }

    selected
}

/// Distinct category labels of the loaded records: trimmed, blank labels
/// dropped, duplicates removed case-insensitively, sorted with [`collate`].
pub fn available_categories<T: FilterRecord>(records: &[T]) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for label in records
        .iter()
        .filter_map(FilterRecord::category)
        .map(str::trim)
        .filter(|label| !label.is_empty())
    {
        seen.entry(label.to_lowercase())
            .or_insert_with(|| label.to_string());
    }

    let mut categories: Vec<String> = seen.into_values().collect();
    categories.sort_by(|a, b| collate(a, b));
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food::entities::{FoodConfig, FoodVisibility, Nutrients};
    use proptest::prelude::*;

    fn food(name: &str, category: Option<&str>, kcal: Option<f64>, protein: Option<f64>) -> Food {
        Food::new(FoodConfig {
            name: name.to_string(),
            category: category.map(str::to_string),
            nutrients: Nutrients {
                energy_kcal: kcal,
                protein,
                ..Default::default()
            },
            visibility: FoodVisibility::Public,
            owner_id: None,
        })
        .unwrap()
    }

    fn names(foods: &[Food]) -> Vec<&str> {
        foods.iter().map(|f| f.name.as_str()).collect()
    }

    fn sample() -> Vec<Food> {
        vec![
            food("Rice", Some("Cereals"), Some(130.0), Some(2.7)),
            food("potato", Some("Tubers"), Some(77.0), Some(2.0)),
            food("Chicken breast", Some("Meat"), Some(165.0), Some(31.0)),
            food("Lentils", Some("Legumes "), Some(116.0), None),
            food("Apple", None, Some(52.0), Some(0.3)),
        ]
    }

    #[test]
    fn test_range_filters_combine_with_and() {
        let spec = FoodFilterSpec::default()
            .with_range(RangeFilter::new(NutrientKey::EnergyKcal, Some(70.0), None))
            .with_range(RangeFilter::new(NutrientKey::Protein, None, Some(10.0)));

        let result = filter_and_sort(&sample(), &spec);
        assert_eq!(names(&result), vec!["Rice", "potato", "Lentils"]);
    }

    #[test]
    fn test_missing_value_counts_as_zero() {
        let spec = FoodFilterSpec::default()
            .with_range(RangeFilter::new(NutrientKey::Protein, Some(0.0), Some(0.0)));
        let result = filter_and_sort(&sample(), &spec);
        assert_eq!(names(&result), vec!["Lentils"]);
    }

    #[test]
    fn test_category_equality_ignores_case_and_padding() {
        let spec = FoodFilterSpec::default().with_category("legumes");
        let result = filter_and_sort(&sample(), &spec);
        assert_eq!(names(&result), vec!["Lentils"]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let spec = FoodFilterSpec::default().sorted_by(FoodSortField::Name, true);
        let result = filter_and_sort(&sample(), &spec);
        assert_eq!(
            names(&result),
            vec!["Apple", "Chicken breast", "Lentils", "potato", "Rice"]
        );
    }

    #[test]
    fn test_descending_numeric_sort_keeps_ties_in_input_order() {
        let foods = vec![
            food("A", None, Some(100.0), None),
            food("B", None, Some(200.0), None),
            food("C", None, Some(100.0), None),
            food("D", None, None, None),
        ];
        let spec = FoodFilterSpec::default()
            .sorted_by(FoodSortField::Nutrient(NutrientKey::EnergyKcal), false);
        let result = filter_and_sort(&foods, &spec);
        assert_eq!(names(&result), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_available_categories_are_derived_from_loaded_foods() {
        let mut foods = sample();
        foods.push(food("Beans", Some("legumes"), None, None));
        foods.push(food("Blank", Some("   "), None, None));

        assert_eq!(
            available_categories(&foods),
            vec!["Cereals", "Legumes", "Meat", "Tubers"]
        );
    }

    fn arb_food() -> impl Strategy<Value = Food> {
        (
            "[a-zA-Z]{1,8}",
            prop::option::of(prop_oneof![Just("Cereals"), Just("Meat"), Just("Fruits")]),
            prop::option::of(0.0f64..900.0),
            prop::option::of(0.0f64..40.0),
        )
            .prop_map(|(name, category, kcal, protein)| food(&name, category, kcal, protein))
    }

    proptest! {
        #[test]
        fn prop_filtering_is_idempotent(
            foods in prop::collection::vec(arb_food(), 0..30),
            min in prop::option::of(0.0f64..400.0),
            max in prop::option::of(200.0f64..900.0),
        ) {
            let spec = FoodFilterSpec::default()
                .with_range(RangeFilter::new(NutrientKey::EnergyKcal, min, max));
            let once = filter_and_sort(&foods, &spec);
            let twice = filter_and_sort(&once, &spec);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_sort_is_stable(foods in prop::collection::vec(arb_food(), 0..30), ascending in any::<bool>()) {
            let spec = FoodFilterSpec::default().sorted_by(FoodSortField::Category, ascending);
            let sorted = filter_and_sort(&foods, &spec);

            for category in ["", "Cereals", "Fruits", "Meat"] {
                let input_order: Vec<_> = foods
                    .iter()
                    .filter(|f| f.category_label().unwrap_or("") == category)
                    .map(|f| f.id)
                    .collect();
                let output_order: Vec<_> = sorted
                    .iter()
                    .filter(|f| f.category_label().unwrap_or("") == category)
                    .map(|f| f.id)
                    .collect();
                prop_assert_eq!(input_order, output_order);
            }
        }
    }
}
