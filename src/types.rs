use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EntryError;

/// Activity classes an entry can belong to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    Energy,
    Transportation,
    Food,
    Waste,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Energy => "Energy",
            Category::Transportation => "Transportation",
            Category::Food => "Food",
            Category::Waste => "Waste",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; anything outside the four categories is rejected.
impl FromStr for Category {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "energy" => Ok(Category::Energy),
            "transportation" => Ok(Category::Transportation),
            "food" => Ok(Category::Food),
            "waste" => Ok(Category::Waste),
            _ => Err(EntryError::UnknownCategory(s.to_string())),
        }
    }
}

/// Electricity drawn by one appliance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricityUsage {
    pub power_watts: f64,
    pub hours_used: f64,
    pub days_used: f64,
    /// Generation source key; `None` means grid average.
    pub energy_source: Option<String>,
    /// Display name only; the power draw is already resolved.
    pub appliance: Option<String>,
}

impl ElectricityUsage {
    pub fn new(power_watts: f64, hours_used: f64) -> Self {
        Self {
            power_watts,
            hours_used,
            days_used: 1.0,
            energy_source: None,
            appliance: None,
        }
    }

    pub fn days(mut self, days_used: f64) -> Self {
        self.days_used = days_used;
        self
    }

    pub fn source(mut self, energy_source: impl Into<String>) -> Self {
        self.energy_source = Some(energy_source.into());
        self
    }

    pub fn appliance(mut self, name: impl Into<String>) -> Self {
        self.appliance = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub transport_type: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodConsumption {
    pub food_type: String,
    pub quantity_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteDisposal {
    pub quantity_kg: f64,
}

/// A category tag plus the fields that category needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum CalculationRequest {
    Energy(ElectricityUsage),
    Transportation(Trip),
    Food(FoodConsumption),
    Waste(WasteDisposal),
}

impl CalculationRequest {
    pub fn category(&self) -> Category {
        match self {
            CalculationRequest::Energy(_) => Category::Energy,
            CalculationRequest::Transportation(_) => Category::Transportation,
            CalculationRequest::Food(_) => Category::Food,
            CalculationRequest::Waste(_) => Category::Waste,
        }
    }

    /// Label shown next to the computed amount.
    pub fn source_label(&self) -> String {
        match self {
            CalculationRequest::Energy(usage) => match &usage.appliance {
                Some(name) => name.clone(),
                None => format!("{}W appliance", usage.power_watts),
            },
            CalculationRequest::Transportation(trip) => trip.transport_type.clone(),
            CalculationRequest::Food(food) => food.food_type.clone(),
            CalculationRequest::Waste(_) => "Waste disposal".to_string(),
        }
    }
}

/// kg CO2 for one request, rounded to 3 decimals, plus its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub category: Category,
    pub kg_co2: f64,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_ignores_case() {
        assert_eq!("energy".parse::<Category>(), Ok(Category::Energy));
        assert_eq!(
            "TRANSPORTATION".parse::<Category>(),
            Ok(Category::Transportation)
        );
        assert_eq!(" Food ".parse::<Category>(), Ok(Category::Food));
        assert_eq!("wAsTe".parse::<Category>(), Ok(Category::Waste));
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(
            "Water".parse::<Category>(),
            Err(EntryError::UnknownCategory("Water".to_string()))
        );
    }

    #[test]
    fn source_labels() {
        let named = CalculationRequest::Energy(
            ElectricityUsage::new(150.0, 1.0).appliance("Refrigerator"),
        );
        assert_eq!(named.source_label(), "Refrigerator");

        let raw = CalculationRequest::Energy(ElectricityUsage::new(1200.0, 1.0));
        assert_eq!(raw.source_label(), "1200W appliance");

        let waste = CalculationRequest::Waste(WasteDisposal { quantity_kg: 3.0 });
        assert_eq!(waste.source_label(), "Waste disposal");
        assert_eq!(waste.category(), Category::Waste);
    }
}
