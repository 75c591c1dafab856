pub mod common;
pub mod equivalence;
pub mod food;
pub mod health;
pub mod meal_plan;
