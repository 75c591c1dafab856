//! In-process stores. Used for local runs without a database and as the
//! backing store of the service tests.

pub mod fixtures;
mod food_catalog;
mod health;
mod meal_plan;

pub use food_catalog::InMemoryFoodCatalogRepository;
pub use health::InMemoryHealthCheckRepository;
pub use meal_plan::InMemoryMealPlanRepository;
