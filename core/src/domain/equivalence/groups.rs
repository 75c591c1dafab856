use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A set of food categories treated as nutritionally interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubstitutionGroup {
    pub id: String,
    pub name: String,
    pub reference_labels: Vec<String>,
}

impl SubstitutionGroup {
    pub fn new(id: &str, name: &str, reference_labels: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            reference_labels: reference_labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Bidirectional, case-insensitive substring test against every reference
    /// label. `label` is expected lowercased and trimmed.
    fn matches(&self, label: &str) -> bool {
        self.reference_labels.iter().any(|reference| {
            let reference = reference.trim().to_lowercase();
            !reference.is_empty() && (label.contains(&reference) || reference.contains(label))
        })
    }
}

/// Ordered group table. Classification walks the table in order and the first
/// matching group wins, which settles labels that match several groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubstitutionGroups {
    groups: Vec<SubstitutionGroup>,
}

impl SubstitutionGroups {
    pub fn new(groups: Vec<SubstitutionGroup>) -> Self {
        Self { groups }
    }

    /// Maps a category label to its substitution group. Missing or blank
    /// labels, and labels matching no group, yield `None`.
    pub fn classify(&self, category_label: Option<&str>) -> Option<&SubstitutionGroup> {
        let label = category_label?.trim().to_lowercase();
        if label.is_empty() {
            return None;
        }
        self.groups.iter().find(|group| group.matches(&label))
    }
}

impl Default for SubstitutionGroups {
    fn default() -> Self {
        Self::new(vec![
            SubstitutionGroup::new(
                "starches",
                "Cereals, tubers and starches",
                &[
                    "cereals", "grains", "bread", "pasta", "rice", "tubers", "roots", "starches",
                    "cereais", "tubérculos",
                ],
            ),
            SubstitutionGroup::new(
                "legumes",
                "Legumes",
                &["legumes", "beans", "pulses", "leguminosas"],
            ),
            SubstitutionGroup::new(
                "vegetables",
                "Vegetables",
                &["vegetables", "greens", "leafy", "hortaliças", "verduras"],
            ),
            SubstitutionGroup::new("fruits", "Fruits", &["fruit", "frutas"]),
            SubstitutionGroup::new(
                "proteins",
                "Meat, fish and eggs",
                &[
                    "meat", "poultry", "fish", "seafood", "eggs", "carnes", "pescados", "ovos",
                ],
            ),
            SubstitutionGroup::new(
                "dairy",
                "Milk and dairy",
                &["dairy", "milk", "cheese", "yogurt", "leite"],
            ),
            SubstitutionGroup::new(
                "fats",
                "Fats, oils, nuts and seeds",
                &["fats", "oils", "nuts", "seeds", "gorduras", "óleos", "nozes"],
            ),
            SubstitutionGroup::new(
                "sugars",
                "Sugars and sweets",
                &["sugars", "sweets", "sugary", "açucarados"],
            ),
        ])
    }
}
