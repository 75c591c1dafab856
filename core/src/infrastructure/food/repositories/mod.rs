pub mod food_catalog_repository;
