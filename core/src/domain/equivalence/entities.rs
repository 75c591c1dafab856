use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{equivalence::groups::SubstitutionGroup, food::entities::Food};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquivalenceBasis {
    Calories,
}

/// An alternative food and the whole-gram quantity of it supplying the same
/// energy as the base portion. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquivalenceResult {
    pub food: Food,
    pub equivalent_quantity: u32,
    pub basis: EquivalenceBasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquivalenceReport {
    pub base_food: Food,
    pub base_quantity: f64,
    /// `None` when the base food has no substitution group.
    pub group: Option<SubstitutionGroup>,
    pub equivalences: Vec<EquivalenceResult>,
}
