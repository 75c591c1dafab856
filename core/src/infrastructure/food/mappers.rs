use chrono::Utc;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::entities::{Food, Nutrients},
};
use crate::entity::foods::{ActiveModel as FoodActiveModel, Model as FoodModel};
use sea_orm::ActiveValue::Set;

impl TryFrom<FoodModel> for Food {
    type Error = CoreError;

    fn try_from(model: FoodModel) -> Result<Self, Self::Error> {
        Ok(Food {
            id: model.id,
            name: model.name,
            category: model.category,
            nutrients: Nutrients {
                energy_kcal: model.energy_kcal,
                protein: model.protein,
                carbohydrate: model.carbohydrate,
                lipid: model.lipid,
                fiber: model.fiber,
                saturated_fat: model.saturated_fat,
                sugars: model.sugars,
                cholesterol: model.cholesterol,
                calcium: model.calcium,
                iron: model.iron,
                magnesium: model.magnesium,
                phosphorus: model.phosphorus,
                potassium: model.potassium,
                sodium: model.sodium,
                zinc: model.zinc,
                vitamin_a: model.vitamin_a,
                vitamin_c: model.vitamin_c,
                vitamin_d: model.vitamin_d,
                vitamin_b12: model.vitamin_b12,
                folate: model.folate,
            },
            visibility: model.visibility.parse()?,
            owner_id: model.owner_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

impl From<Food> for FoodActiveModel {
    fn from(food: Food) -> Self {
        let n = food.nutrients;
        FoodActiveModel {
            id: Set(food.id),
            name: Set(food.name),
            category: Set(food.category),
            energy_kcal: Set(n.energy_kcal),
            protein: Set(n.protein),
            carbohydrate: Set(n.carbohydrate),
            lipid: Set(n.lipid),
            fiber: Set(n.fiber),
            saturated_fat: Set(n.saturated_fat),
            sugars: Set(n.sugars),
            cholesterol: Set(n.cholesterol),
            calcium: Set(n.calcium),
            iron: Set(n.iron),
            magnesium: Set(n.magnesium),
            phosphorus: Set(n.phosphorus),
            potassium: Set(n.potassium),
            sodium: Set(n.sodium),
            zinc: Set(n.zinc),
            vitamin_a: Set(n.vitamin_a),
            vitamin_c: Set(n.vitamin_c),
            vitamin_d: Set(n.vitamin_d),
            vitamin_b12: Set(n.vitamin_b12),
            folate: Set(n.folate),
            visibility: Set(food.visibility.as_str().to_string()),
            owner_id: Set(food.owner_id),
            created_at: Set(food.created_at.fixed_offset()),
            updated_at: Set(food.updated_at.fixed_offset()),
        }
    }
}
