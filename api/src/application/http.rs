pub mod equivalence;
pub mod food;
pub mod health;
pub mod meal_plan;
pub mod query_extractor;
pub mod query_params;
pub mod server;
