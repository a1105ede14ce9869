//! Food templates and the calorie index lookups

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CatalogError;
use crate::config::Locale;

/// Calorie index section a food belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FoodCategory {
    Breakfast,
    Fruits,
    Proteins,
    Carbs,
}

impl FoodCategory {
    /// All categories in display order
    pub const ALL: [FoodCategory; 4] = [
        FoodCategory::Breakfast,
        FoodCategory::Fruits,
        FoodCategory::Proteins,
        FoodCategory::Carbs,
    ];

    /// Get the display name for this category
    pub fn name(&self) -> &'static str {
        match self {
            FoodCategory::Breakfast => "Breakfast",
            FoodCategory::Fruits => "Fruits",
            FoodCategory::Proteins => "Proteins",
            FoodCategory::Carbs => "Carbs",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FoodCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodCategory::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.trim().to_string()))
    }
}

/// A predefined food record that can be logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodTemplate {
    /// Template identifier
    pub id: String,
    /// English name
    pub name: String,
    /// Turkish name
    pub localized_name: String,
    /// Energy per portion
    pub kcal: u32,
    /// Portion description
    pub portion: String,
    /// Calorie index section
    pub category: FoodCategory,
}

impl FoodTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        localized_name: impl Into<String>,
        kcal: u32,
        portion: impl Into<String>,
        category: FoodCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            localized_name: localized_name.into(),
            kcal,
            portion: portion.into(),
            category,
        }
    }

    /// Name to show for the configured locale
    pub fn display_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.name,
            Locale::Tr => &self.localized_name,
        }
    }

    /// Whether the query matches either name, ignoring case
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.localized_name.to_lowercase().contains(&query)
    }
}

/// Calorie density band used to colour index rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalorieBand {
    /// Under 100 kcal
    Low,
    /// 100 to 299 kcal
    Medium,
    /// 300 kcal and above
    High,
}

impl CalorieBand {
    pub fn for_kcal(kcal: u32) -> Self {
        match kcal {
            0..=99 => CalorieBand::Low,
            100..=299 => CalorieBand::Medium,
            _ => CalorieBand::High,
        }
    }

    /// Accent colour as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            CalorieBand::Low => "#34D399",
            CalorieBand::Medium => "#FBBF24",
            CalorieBand::High => "#E63946",
        }
    }
}

/// The built-in calorie index
pub fn default_foods() -> Vec<FoodTemplate> {
    use FoodCategory::*;

    [
        ("1", "Honey", "Bal", 307, "100 gram", Breakfast),
        ("2", "White Cheese", "Beyaz Peynir", 275, "100 gram", Breakfast),
        ("3", "String Cheese", "Dil Peyniri", 271, "100 gram", Breakfast),
        ("4", "Cream", "Kaymak", 624, "100 gram", Breakfast),
        ("5", "Kaşar Cheese", "Kaşar Peyniri", 413, "100 gram", Breakfast),
        ("6", "Marmalade", "Marmelat", 280, "100 gram", Breakfast),
        ("7", "Muesli", "Müsli", 30, "1 tbsp", Breakfast),
        ("8", "Pastrami", "Pastırma", 250, "100 gram", Breakfast),
        ("9", "Molasses", "Pekmez", 60, "1 tbsp", Breakfast),
        ("10", "Egg", "Yumurta", 155, "100 gram", Breakfast),
        ("11", "Apple", "Elma", 52, "100 gram", Fruits),
        ("12", "Banana", "Muz", 89, "100 gram", Fruits),
        ("13", "Orange", "Portakal", 47, "100 gram", Fruits),
        ("14", "Watermelon", "Karpuz", 30, "100 gram", Fruits),
        ("15", "Chicken Breast", "Tavuk Göğsü", 165, "100 gram", Proteins),
        ("16", "Salmon", "Somon", 208, "100 gram", Proteins),
        ("17", "Red Meat", "Kırmızı Et", 250, "100 gram", Proteins),
        ("18", "Rice", "Pilav", 130, "100 gram", Carbs),
        ("19", "Pasta", "Makarna", 158, "100 gram", Carbs),
        ("20", "Bread", "Ekmek", 265, "100 gram", Carbs),
    ]
    .into_iter()
    .map(|(id, name, localized, kcal, portion, category)| {
        FoodTemplate::new(id, name, localized, kcal, portion, category)
    })
    .collect()
}

/// Filter foods by search text and optional category (`None` means all)
pub fn search_foods<'a>(
    foods: &'a [FoodTemplate],
    query: &str,
    category: Option<FoodCategory>,
) -> Vec<&'a FoodTemplate> {
    foods
        .iter()
        .filter(|food| category.map_or(true, |c| food.category == c))
        .filter(|food| food.matches(query))
        .collect()
}

/// Group foods by category, in category display order, skipping empty groups
pub fn group_by_category<'a>(
    foods: &[&'a FoodTemplate],
) -> Vec<(FoodCategory, Vec<&'a FoodTemplate>)> {
    FoodCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let items: Vec<&FoodTemplate> = foods
                .iter()
                .copied()
                .filter(|food| food.category == category)
                .collect();
            (!items.is_empty()).then_some((category, items))
        })
        .collect()
}
