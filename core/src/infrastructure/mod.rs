pub mod db;
pub mod food;
pub mod health;
pub mod meal_plan;
pub mod memory;
pub mod store;
