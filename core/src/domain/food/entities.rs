use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{entities::app_errors::CoreError, generate_timestamp};

/// Nutrient content per 100 g of edible portion.
///
/// Macronutrients are in grams, minerals and cholesterol in milligrams, and
/// vitamins A, D, B12 and folate in micrograms. `None` means the value is
/// unknown for this food, which is not the same as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Nutrients {
    pub energy_kcal: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub lipid: Option<f64>,
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnesium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zinc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_b12: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folate: Option<f64>,
}

impl Nutrients {
    pub fn get(&self, key: NutrientKey) -> Option<f64> {
        match key {
            NutrientKey::EnergyKcal => self.energy_kcal,
            NutrientKey::Protein => self.protein,
            NutrientKey::Carbohydrate => self.carbohydrate,
            NutrientKey::Lipid => self.lipid,
            NutrientKey::Fiber => self.fiber,
            NutrientKey::SaturatedFat => self.saturated_fat,
            NutrientKey::Sugars => self.sugars,
            NutrientKey::Cholesterol => self.cholesterol,
            NutrientKey::Calcium => self.calcium,
            NutrientKey::Iron => self.iron,
            NutrientKey::Magnesium => self.magnesium,
            NutrientKey::Phosphorus => self.phosphorus,
            NutrientKey::Potassium => self.potassium,
            NutrientKey::Sodium => self.sodium,
            NutrientKey::Zinc => self.zinc,
            NutrientKey::VitaminA => self.vitamin_a,
            NutrientKey::VitaminC => self.vitamin_c,
            NutrientKey::VitaminD => self.vitamin_d,
            NutrientKey::VitaminB12 => self.vitamin_b12,
            NutrientKey::Folate => self.folate,
        }
    }

    /// Present values must be finite and non-negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        for key in NutrientKey::ALL {
            if let Some(value) = self.get(key)
                && (!value.is_finite() || value < 0.0)
            {
                return Err(CoreError::Invalid(format!(
                    "nutrient {} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    EnergyKcal,
    Protein,
    Carbohydrate,
    Lipid,
    Fiber,
    SaturatedFat,
    Sugars,
    Cholesterol,
    Calcium,
    Iron,
    Magnesium,
    Phosphorus,
    Potassium,
    Sodium,
    Zinc,
    VitaminA,
    VitaminC,
    VitaminD,
    VitaminB12,
    Folate,
}

impl NutrientKey {
    pub const ALL: [NutrientKey; 20] = [
        NutrientKey::EnergyKcal,
        NutrientKey::Protein,
        NutrientKey::Carbohydrate,
        NutrientKey::Lipid,
        NutrientKey::Fiber,
        NutrientKey::SaturatedFat,
        NutrientKey::Sugars,
        NutrientKey::Cholesterol,
        NutrientKey::Calcium,
        NutrientKey::Iron,
        NutrientKey::Magnesium,
        NutrientKey::Phosphorus,
        NutrientKey::Potassium,
        NutrientKey::Sodium,
        NutrientKey::Zinc,
        NutrientKey::VitaminA,
        NutrientKey::VitaminC,
        NutrientKey::VitaminD,
        NutrientKey::VitaminB12,
        NutrientKey::Folate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKey::EnergyKcal => "energy_kcal",
            NutrientKey::Protein => "protein",
            NutrientKey::Carbohydrate => "carbohydrate",
            NutrientKey::Lipid => "lipid",
            NutrientKey::Fiber => "fiber",
            NutrientKey::SaturatedFat => "saturated_fat",
            NutrientKey::Sugars => "sugars",
            NutrientKey::Cholesterol => "cholesterol",
            NutrientKey::Calcium => "calcium",
            NutrientKey::Iron => "iron",
            NutrientKey::Magnesium => "magnesium",
            NutrientKey::Phosphorus => "phosphorus",
            NutrientKey::Potassium => "potassium",
            NutrientKey::Sodium => "sodium",
            NutrientKey::Zinc => "zinc",
            NutrientKey::VitaminA => "vitamin_a",
            NutrientKey::VitaminC => "vitamin_c",
            NutrientKey::VitaminD => "vitamin_d",
            NutrientKey::VitaminB12 => "vitamin_b12",
            NutrientKey::Folate => "folate",
        }
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NutrientKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        // "energy" and "calories" are accepted for the energy column
        if normalized == "energy" || normalized == "calories" {
            return Ok(NutrientKey::EnergyKcal);
        }
        NutrientKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| CoreError::Invalid(format!("unknown nutrient field: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FoodVisibility {
    #[default]
    Public,
    Private,
}

impl FoodVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodVisibility::Public => "public",
            FoodVisibility::Private => "private",
        }
    }
}

impl FromStr for FoodVisibility {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(FoodVisibility::Public),
            "private" => Ok(FoodVisibility::Private),
            other => Err(CoreError::Invalid(format!("unknown visibility: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    /// Values per 100 g.
    pub nutrients: Nutrients,
    pub visibility: FoodVisibility,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FoodConfig {
    pub name: String,
    pub category: Option<String>,
    pub nutrients: Nutrients,
    pub visibility: FoodVisibility,
    pub owner_id: Option<Uuid>,
}

impl Food {
    pub fn new(config: FoodConfig) -> Result<Self, CoreError> {
        config.nutrients.validate()?;

        if config.name.trim().is_empty() {
            return Err(CoreError::Invalid("food name is required".to_string()));
        }

        let (now, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            name: config.name,
            category: config.category,
            nutrients: config.nutrients,
            visibility: config.visibility,
            owner_id: config.owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn energy_kcal(&self) -> Option<f64> {
        self.nutrients.energy_kcal
    }

    /// Trimmed, non-empty category label.
    pub fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    pub fn is_visible_to(&self, viewer: Option<Uuid>) -> bool {
        match self.visibility {
            FoodVisibility::Public => true,
            FoodVisibility::Private => viewer.is_some() && viewer == self.owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(nutrients: Nutrients) -> FoodConfig {
        FoodConfig {
            name: "Rice, white, cooked".to_string(),
            category: Some("  Cereals and derivatives ".to_string()),
            nutrients,
            visibility: FoodVisibility::Public,
            owner_id: None,
        }
    }

    #[test]
    fn test_negative_nutrient_is_rejected() {
        let nutrients = Nutrients {
            protein: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(Food::new(config(nutrients)), Err(CoreError::Invalid(_))));
    }

    #[test]
    fn test_unknown_nutrient_stays_unknown() {
        let food = Food::new(config(Nutrients {
            energy_kcal: Some(128.0),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(food.nutrients.get(NutrientKey::Fiber), None);
        assert_eq!(food.energy_kcal(), Some(128.0));
        assert_eq!(food.category_label(), Some("Cereals and derivatives"));
    }

    #[test]
    fn test_nutrient_key_parse() {
        assert_eq!("vitamin_b12".parse::<NutrientKey>().unwrap(), NutrientKey::VitaminB12);
        assert_eq!("Calories".parse::<NutrientKey>().unwrap(), NutrientKey::EnergyKcal);
        assert!("umami".parse::<NutrientKey>().is_err());
    }

    #[test]
    fn test_private_food_visibility() {
        let owner = Uuid::new_v4();
        let mut food = Food::new(config(Nutrients::default())).unwrap();
        food.visibility = FoodVisibility::Private;
        food.owner_id = Some(owner);

        assert!(food.is_visible_to(Some(owner)));
        assert!(!food.is_visible_to(Some(Uuid::new_v4())));
        assert!(!food.is_visible_to(None));
    }
}
