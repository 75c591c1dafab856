use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Food {0} not found")]
    FoodNotFound(Uuid),

    #[error("Meal plan {0} not found")]
    MealPlanNotFound(Uuid),

    #[error("Plan item {0} not found")]
    PlanItemNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Invalid(String),

    /// The food catalog could not be reached or answered with an error.
    #[error("Food catalog unavailable")]
    DataUnavailable,

    /// A write was rejected by the plan store, either because it failed or
    /// because the plan changed since it was loaded.
    #[error("Persistence conflict: {0}")]
    PersistenceConflict(String),

    #[error("Internal server error")]
    InternalServerError,
}
