use crate::domain::{
    equivalence::{
        entities::{EquivalenceBasis, EquivalenceResult},
        groups::SubstitutionGroups,
    },
    food::entities::Food,
};

/// Base portion used when the caller does not pick one, in grams.
pub const DEFAULT_BASE_QUANTITY: f64 = 100.0;

/// Equivalent quantities at or above this many grams are dropped; they come
/// from foods with a very low energy density.
pub const MAX_EQUIVALENT_QUANTITY: f64 = 1000.0;

/// Ranks calorie-equivalent alternatives to `base_quantity` grams of `base`.
///
/// Candidates are the `catalog` foods (other than `base`) that classify into
/// the same substitution group. Every candidate is classified independently on
/// each call. The result is sorted by ascending equivalent quantity, ties keep
/// catalog order.
///
/// An empty list is returned when `base` has no positive energy value, no
/// substitution group, or when `base_quantity` is not a positive number.
pub fn compute_equivalences(
    groups: &SubstitutionGroups,
    base: &Food,
    base_quantity: f64,
    catalog: &[Food],
) -> Vec<EquivalenceResult> {
    let base_kcal = match base.energy_kcal() {
        Some(kcal) if kcal > 0.0 => kcal,
        _ => return Vec::new(),
    };

    if !base_quantity.is_finite() || base_quantity <= 0.0 {
        return Vec::new();
    }

    let Some(group) = groups.classify(base.category_label()) else {
        return Vec::new();
    };

    let base_calories = base_kcal * (base_quantity / 100.0);

    let mut results: Vec<EquivalenceResult> = catalog
        .iter()
        .filter(|candidate| candidate.id != base.id)
        .filter(|candidate| {
            groups
                .classify(candidate.category_label())
                .is_some_and(|candidate_group| candidate_group.id == group.id)
        })
        .filter_map(|candidate| {
            let candidate_kcal = candidate.energy_kcal().filter(|kcal| *kcal > 0.0)?;
            let quantity = (base_calories / candidate_kcal * 100.0).round();

            if quantity <= 0.0 || quantity >= MAX_EQUIVALENT_QUANTITY {
                return None;
            }

            Some(EquivalenceResult {
                food: candidate.clone(),
                equivalent_quantity: quantity as u32,
                basis: EquivalenceBasis::Calories,
            })
        })
        .collect();

    results.sort_by_key(|result| result.equivalent_quantity);
    results
}
