pub mod get_food_equivalences;
pub mod get_item_equivalences;
