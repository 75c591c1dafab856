//! Built-in sample catalog and JSON seed files for the in-memory store.

use std::path::Path;

#[cfg(test)]
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp, generate_uuid_v7},
    food::entities::{Food, FoodVisibility, Nutrients},
    meal_plan::entities::MealPlan,
};
#[cfg(test)]
use crate::domain::meal_plan::entities::{MealSlot, PlanItem, PlanStatus};

/// Contents of a seed file: a catalog and optionally some plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    pub foods: Vec<Food>,
    #[serde(default)]
    pub plans: Vec<MealPlan>,
}

pub async fn load_seed_file(path: impl AsRef<Path>) -> Result<SeedData, CoreError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Failed to read seed file {}: {}", path.display(), e);
        CoreError::DataUnavailable
    })?;

    let seed: SeedData = serde_json::from_str(&raw).map_err(|e| {
        error!("Failed to parse seed file {}: {}", path.display(), e);
        CoreError::Invalid(format!("malformed seed file: {}", e))
    })?;

    for food in &seed.foods {
        food.nutrients.validate()?;
    }
    for plan in &seed.plans {
        for item in &plan.items {
            item.validate()?;
        }
    }

    Ok(seed)
}

fn catalog_food(name: &str, category: &str, nutrients: Nutrients) -> Food {
    let (now, _) = generate_timestamp();
    Food {
        id: generate_uuid_v7(),
        name: name.to_string(),
        category: Some(category.to_string()),
        nutrients,
        visibility: FoodVisibility::Public,
        owner_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn macros(energy_kcal: f64, protein: f64, carbohydrate: f64, lipid: f64, fiber: f64) -> Nutrients {
    Nutrients {
        energy_kcal: Some(energy_kcal),
        protein: Some(protein),
        carbohydrate: Some(carbohydrate),
        lipid: Some(lipid),
        fiber: Some(fiber),
        ..Default::default()
    }
}

/// Small catalog covering every default substitution group.
pub fn sample_foods() -> Vec<Food> {
    vec![
        catalog_food(
            "Rice, white, cooked",
            "Cereals and derivatives",
            Nutrients {
                sodium: Some(1.0),
                iron: Some(0.1),
                ..macros(130.0, 2.7, 28.0, 0.3, 0.4)
            },
        ),
        catalog_food(
            "Potato, boiled",
            "Tubers and roots",
            Nutrients {
                potassium: Some(379.0),
                vitamin_c: Some(7.4),
                ..macros(77.0, 2.0, 17.0, 0.1, 2.2)
            },
        ),
        catalog_food(
            "Bread, french",
            "Cereals and derivatives",
            Nutrients {
                sodium: Some(648.0),
                ..macros(265.0, 8.0, 58.6, 3.1, 2.3)
            },
        ),
        catalog_food(
            "Cassava, cooked",
            "Tubers and roots",
            macros(125.0, 0.6, 30.1, 0.3, 1.6),
        ),
        catalog_food(
            "Chicken breast, grilled",
            "Meat and eggs",
            Nutrients {
                cholesterol: Some(89.0),
                zinc: Some(1.0),
                ..macros(165.0, 31.0, 0.0, 3.6, 0.0)
            },
        ),
        catalog_food(
            "Egg, boiled",
            "Meat and eggs",
            Nutrients {
                cholesterol: Some(373.0),
                vitamin_b12: Some(1.1),
                ..macros(146.0, 13.3, 0.6, 9.5, 0.0)
            },
        ),
        catalog_food(
            "Beans, black, cooked",
            "Legumes",
            Nutrients {
                iron: Some(1.5),
                folate: Some(149.0),
                ..macros(77.0, 4.5, 14.0, 0.5, 8.4)
            },
        ),
        catalog_food("Lentils, cooked", "Legumes", macros(93.0, 6.3, 16.3, 0.5, 7.9)),
        catalog_food(
            "Broccoli, cooked",
            "Vegetables",
            Nutrients {
                vitamin_c: Some(64.9),
                calcium: Some(40.0),
                ..macros(25.0, 2.1, 4.4, 0.5, 3.4)
            },
        ),
        catalog_food(
            "Banana, raw",
            "Fruits and derivatives",
            Nutrients {
                potassium: Some(358.0),
                ..macros(89.0, 1.1, 22.8, 0.3, 2.6)
            },
        ),
        catalog_food("Apple, raw", "Fruits and derivatives", macros(52.0, 0.3, 13.8, 0.2, 2.4)),
        catalog_food(
            "Milk, whole",
            "Milk and dairy",
            Nutrients {
                calcium: Some(113.0),
                vitamin_d: Some(1.3),
                ..macros(61.0, 3.2, 4.8, 3.3, 0.0)
            },
        ),
        catalog_food(
            "Olive oil, extra virgin",
            "Fats and oils",
            Nutrients {
                saturated_fat: Some(13.8),
                ..macros(884.0, 0.0, 0.0, 100.0, 0.0)
            },
        ),
        catalog_food(
            "Honey",
            "Sugars and sweets",
            Nutrients {
                sugars: Some(82.1),
                energy_kcal: Some(304.0),
                carbohydrate: Some(82.4),
                ..Default::default()
            },
        ),
    ]
}

/// Sample catalog plus one plan with rice and chicken at Monday lunch.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct Seed {
    pub foods: Vec<Food>,
    pub plan: MealPlan,
    pub rice: Food,
    pub potato: Food,
    pub chicken: Food,
}

#[cfg(test)]
pub fn seed() -> Seed {
    let foods = sample_foods();
    let find = |prefix: &str| {
        foods
            .iter()
            .find(|food| food.name.starts_with(prefix))
            .cloned()
            .unwrap_or_else(|| catalog_food(prefix, "", Nutrients::default()))
    };
    let rice = find("Rice");
    let potato = find("Potato");
    let chicken = find("Chicken");

    let (now, _) = generate_timestamp();
    let plan_id = generate_uuid_v7();
    let lunch = NaiveTime::from_hms_opt(12, 30, 0);

    let item = |food: &Food, quantity: f64, order_index: i32| PlanItem {
        id: generate_uuid_v7(),
        plan_id,
        day_index: 0,
        meal_slot: MealSlot::Lunch,
        food_id: food.id,
        quantity,
        unit: "g".to_string(),
        recommended_time: lunch,
        note: None,
        order_index,
    };

    let plan = MealPlan {
        id: plan_id,
        patient_id: generate_uuid_v7(),
        title: "Weight maintenance".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default(),
        end_date: None,
        status: PlanStatus::Active,
        items: vec![item(&rice, 100.0, 0), item(&chicken, 150.0, 1)],
        version: 1,
        created_at: now,
        updated_at: now,
    };

    Seed {
        foods,
        plan,
        rice,
        potato,
        chicken,
    }
}
