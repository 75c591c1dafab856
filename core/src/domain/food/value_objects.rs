use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::food::entities::{Food, NutrientKey};

/// Query passed to the food catalog. The catalog may apply these server-side;
/// the in-process filter engine refines the result afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodQuery {
    pub name_contains: Option<String>,
    pub category: Option<String>,
    /// Private foods owned by this user are included alongside public ones.
    pub viewer_id: Option<Uuid>,
    pub limit: Option<u32>,
}

/// Inclusive numeric range over one nutrient. A missing bound is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RangeFilter {
    pub field: NutrientKey,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn new(field: NutrientKey, min: Option<f64>, max: Option<f64>) -> Self {
        Self { field, min, max }
    }

    /// Builds a range from raw text bounds. Bounds that do not parse as a
    /// finite number are dropped.
    pub fn from_text(field: NutrientKey, min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            field,
            min: min.and_then(parse_bound),
            max: max.and_then(parse_bound),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

pub fn parse_bound(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // accept a decimal comma as typed in most clinic locales
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", tag = "kind", content = "nutrient")]
pub enum FoodSortField {
    Name,
    Category,
    Nutrient(NutrientKey),
}

impl FoodSortField {
    pub fn parse(field: &str) -> Option<Self> {
        match field.trim() {
            "name" => Some(FoodSortField::Name),
            "category" => Some(FoodSortField::Category),
            other => other.parse::<NutrientKey>().ok().map(FoodSortField::Nutrient),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FoodSortSpec {
    pub field: FoodSortField,
    pub ascending: bool,
}

/// Immutable description of a food search: every filter is ANDed and the
/// sort, when present, is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodFilterSpec {
    pub ranges: Vec<RangeFilter>,
    pub category: Option<String>,
    pub name_contains: Option<String>,
    pub sort: Option<FoodSortSpec>,
}

impl FoodFilterSpec {
    pub fn with_range(mut self, range: RangeFilter) -> Self {
        self.ranges.push(range);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sorted_by(mut self, field: FoodSortField, ascending: bool) -> Self {
        self.sort = Some(FoodSortSpec { field, ascending });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchFoodsInput {
    pub viewer_id: Option<Uuid>,
    pub spec: FoodFilterSpec,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodSearchResult {
    pub foods: Vec<Food>,
    /// Category choices derived from the loaded (pre-filter) food list.
    pub categories: Vec<String>,
    /// Set when the catalog could not be reached and `foods` is an empty
    /// fallback rather than an empty match.
    pub data_unavailable: bool,
}

impl FoodSearchResult {
    pub fn unavailable() -> Self {
        Self {
            data_unavailable: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_bounds_are_absent() {
        let range = RangeFilter::from_text(NutrientKey::Protein, Some("abc"), Some(""));
        assert!(range.is_noop());

        let range = RangeFilter::from_text(NutrientKey::Protein, Some("2,5"), Some("NaN"));
        assert_eq!(range.min, Some(2.5));
        assert_eq!(range.max, None);
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(FoodSortField::parse("name"), Some(FoodSortField::Name));
        assert_eq!(
            FoodSortField::parse("energy_kcal"),
            Some(FoodSortField::Nutrient(NutrientKey::EnergyKcal))
        );
        assert_eq!(FoodSortField::parse("price"), None);
    }
}
