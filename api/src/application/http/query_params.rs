use std::collections::HashMap;
use std::str::FromStr;

use nutriclinic_core::domain::{
    common::entities::app_errors::CoreError,
    food::{FoodFilterSpec, FoodSortField, NutrientKey, RangeFilter, value_objects::parse_bound},
};

/// Largest page a single food search may return.
pub const MAX_LIMIT: u32 = 500;

/// Filter operator for query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,    // equals (default)
    Gte,   // lower bound, inclusive
    Lte,   // upper bound, inclusive
    Ilike, // case-insensitive substring
}

impl FromStr for FilterOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOperator::Eq),
            "gte" | "min" => Ok(FilterOperator::Gte),
            "lte" | "max" => Ok(FilterOperator::Lte),
            "ilike" => Ok(FilterOperator::Ilike),
            _ => Err(()),
        }
    }
}

/// Filter condition for a single field
#[derive(Debug, Clone)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses `field` or `-field`. Only the first entry of a comma-separated
    /// list is kept since foods are sorted by a single key.
    pub fn from_string(s: &str) -> Option<Self> {
        let part = s.split(',').map(str::trim).find(|p| !p.is_empty())?;

        Some(match part.strip_prefix('-') {
            Some(stripped) => SortSpec {
                field: stripped.to_string(),
                direction: SortDirection::Desc,
            },
            None => SortSpec {
                field: part.to_string(),
                direction: SortDirection::Asc,
            },
        })
    }
}

/// Raw food search parameters:
/// - `filter[field]=value` (defaults to eq)
/// - `filter[field][operator]=value`
/// - `sort=field` or `sort=-field`
/// - `limit=20`
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub conditions: Vec<FilterCondition>,
    pub sort: Option<SortSpec>,
    pub limit: Option<u32>,
}

impl QueryParams {
    pub fn from_query_map(query_map: &HashMap<String, String>) -> Self {
        let mut params = QueryParams::default();

        for (key, value) in query_map {
            if let Some(filter_key) = key.strip_prefix("filter[") {
                let Some(end_bracket) = filter_key.find(']') else {
                    continue;
                };
                let field = filter_key[..end_bracket].to_string();
                let remaining = &filter_key[end_bracket + 1..];

                let operator = if remaining.is_empty() {
                    Some(FilterOperator::Eq)
                } else if remaining.starts_with('[') && remaining.ends_with(']') {
                    remaining[1..remaining.len() - 1].parse().ok()
                } else {
                    None
                };

                if let Some(operator) = operator {
                    params.conditions.push(FilterCondition {
                        field,
                        operator,
                        value: value.clone(),
                    });
                }
            } else if key == "sort" {
                params.sort = SortSpec::from_string(value);
            } else if key == "limit"
                && let Ok(limit) = value.parse::<u32>()
            {
                params.limit = Some(limit.clamp(1, MAX_LIMIT));
            }
        }

        params
    }

    /// Builds the immutable search spec. Unknown fields, operators that make
    /// no sense for a field and unknown sort keys are rejected; numeric bounds
    /// that do not parse are simply left out.
    pub fn to_filter_spec(&self) -> Result<FoodFilterSpec, CoreError> {
        let mut spec = FoodFilterSpec::default();

        for condition in &self.conditions {
            let value = condition.value.trim();

            match (condition.field.as_str(), condition.operator) {
                ("name", FilterOperator::Eq | FilterOperator::Ilike) => {
                    spec.name_contains = Some(value.to_string()).filter(|v| !v.is_empty());
                }
                ("category", FilterOperator::Eq) => {
                    spec.category = Some(value.to_string()).filter(|v| !v.is_empty());
                }
                ("name" | "category", operator) => {
                    return Err(CoreError::Invalid(format!(
                        "operator {:?} is not supported on {}",
                        operator, condition.field
                    )));
                }
                (field, operator) => {
                    let key: NutrientKey = field.parse()?;
                    let (sets_min, sets_max) = match operator {
                        FilterOperator::Gte => (true, false),
                        FilterOperator::Lte => (false, true),
                        FilterOperator::Eq => (true, true),
                        FilterOperator::Ilike => {
                            return Err(CoreError::Invalid(format!(
                                "ilike is not supported on nutrient {}",
                                key
                            )));
                        }
                    };

                    // an unparsable value never clears a bound set by another condition
                    let Some(bound) = parse_bound(value) else {
                        continue;
                    };

                    let index = match spec.ranges.iter().position(|r| r.field == key) {
                        Some(index) => index,
                        None => {
                            spec.ranges.push(RangeFilter::new(key, None, None));
                            spec.ranges.len() - 1
                        }
                    };
                    let range = &mut spec.ranges[index];

                    if sets_min {
                        range.min = Some(bound);
                    }
                    if sets_max {
                        range.max = Some(bound);
                    }
                }
            }
        }

        spec.ranges.retain(|range| !range.is_noop());

        if let Some(sort) = &self.sort {
            let field = FoodSortField::parse(&sort.field)
                .ok_or_else(|| CoreError::Invalid(format!("cannot sort by {}", sort.field)))?;
            spec = spec.sorted_by(field, sort.direction == SortDirection::Asc);
        }

        Ok(spec)
    }
}
