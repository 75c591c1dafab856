pub mod aggregator;
pub mod entities;
pub mod ports;
pub mod services;
pub mod substitution;
pub mod value_objects;

pub use aggregator::{DaySummary, NutrientTotals, WeekSummary};
pub use entities::*;
pub use ports::*;
pub use substitution::{PlanItemChanges, apply_substitution, diff_plan_items};
pub use value_objects::*;
