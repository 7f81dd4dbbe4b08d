//! Carbon-footprint calculators.
//!
//! Every function here is pure: same inputs, same tables, same output. None of
//! them fail. Unknown lookup keys fall back to a default factor and results
//! are clamped to zero, so a result is always a finite number >= 0 with at
//! most three decimals.

use std::sync::Arc;

use tracing::debug;

use crate::factors::{FactorTables, GRID_AVERAGE};
use crate::types::{
    CalculationRequest, CalculationResult, Category, ElectricityUsage, FoodConsumption, Trip,
    WasteDisposal,
};

/// kg CO2 per kg of disposed waste.
pub const WASTE_FACTOR_KG_PER_KG: f64 = 0.5;

/// Rounds half away from zero to three decimals. Negative, NaN and infinite input maps to 0.
pub fn round_kg(kg: f64) -> f64 {
    let rounded = (kg * 1000.0).round() / 1000.0;
    if rounded.is_finite() && rounded > 0.0 {
        rounded
    } else {
        0.0
    }
}

/// E = P/1000 * h * d kWh, times the source's carbon intensity.
pub fn electricity_footprint(
    tables: &FactorTables,
    power_watts: f64,
    hours_used: f64,
    days_used: f64,
    energy_source: Option<&str>,
) -> f64 {
    let source = energy_source.unwrap_or(GRID_AVERAGE);
    let intensity = tables.carbon_intensity(source).unwrap_or_else(|| {
        debug!(source, "unknown energy source, using grid average");
        tables.grid_average()
    });
    let energy_kwh = (power_watts / 1000.0) * hours_used * days_used;
    round_kg(energy_kwh * intensity)
}

pub fn transport_footprint(tables: &FactorTables, transport_type: &str, distance_km: f64) -> f64 {
    let factor = tables.transport_factor(transport_type).unwrap_or_else(|| {
        debug!(transport_type, "unknown transport type, factor 0");
        0.0
    });
    round_kg(factor * distance_km)
}

pub fn food_footprint(tables: &FactorTables, food_type: &str, quantity_kg: f64) -> f64 {
    let factor = tables.food_factor(food_type).unwrap_or_else(|| {
        debug!(food_type, "unknown food type, factor 0");
        0.0
    });
    round_kg(factor * quantity_kg)
}

pub fn waste_footprint(quantity_kg: f64) -> f64 {
    round_kg(quantity_kg * WASTE_FACTOR_KG_PER_KG)
}

/// Anything that knows its own category and footprint.
pub trait CarbonFootprint {
    fn category(&self) -> Category;

    /// kg CO2, rounded to three decimals.
    fn footprint_kg(&self, tables: &FactorTables) -> f64;
}

impl CarbonFootprint for ElectricityUsage {
    fn category(&self) -> Category {
        Category::Energy
    }

    fn footprint_kg(&self, tables: &FactorTables) -> f64 {
        electricity_footprint(
            tables,
            self.power_watts,
            self.hours_used,
            self.days_used,
            self.energy_source.as_deref(),
        )
    }
}

impl CarbonFootprint for Trip {
    fn category(&self) -> Category {
        Category::Transportation
    }

    fn footprint_kg(&self, tables: &FactorTables) -> f64 {
        transport_footprint(tables, &self.transport_type, self.distance_km)
    }
}

impl CarbonFootprint for FoodConsumption {
    fn category(&self) -> Category {
        Category::Food
    }

    fn footprint_kg(&self, tables: &FactorTables) -> f64 {
        food_footprint(tables, &self.food_type, self.quantity_kg)
    }
}

impl CarbonFootprint for WasteDisposal {
    fn category(&self) -> Category {
        Category::Waste
    }

    fn footprint_kg(&self, _tables: &FactorTables) -> f64 {
        waste_footprint(self.quantity_kg)
    }
}

impl CarbonFootprint for CalculationRequest {
    fn category(&self) -> Category {
        CalculationRequest::category(self)
    }

    fn footprint_kg(&self, tables: &FactorTables) -> f64 {
        match self {
            CalculationRequest::Energy(usage) => usage.footprint_kg(tables),
            CalculationRequest::Transportation(trip) => trip.footprint_kg(tables),
            CalculationRequest::Food(food) => food.footprint_kg(tables),
            CalculationRequest::Waste(waste) => waste.footprint_kg(tables),
        }
    }
}

/// Routes a request to its category's calculator.
pub fn compute_footprint(tables: &FactorTables, request: &CalculationRequest) -> CalculationResult {
    CalculationResult {
        category: request.category(),
        kg_co2: request.footprint_kg(tables),
        source: request.source_label(),
    }
}

/// Calculator bound to a shared set of tables.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    tables: Arc<FactorTables>,
}

impl Calculator {
    pub fn new(tables: Arc<FactorTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &FactorTables {
        &self.tables
    }

    pub fn compute(&self, request: &CalculationRequest) -> CalculationResult {
        compute_footprint(&self.tables, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> FactorTables {
        FactorTables::standard()
    }

    #[test]
    fn electricity_grid_average() {
        let kg = electricity_footprint(&tables(), 1000.0, 1.0, 1.0, Some(GRID_AVERAGE));
        assert_eq!(kg, 0.43);
    }

    #[test]
    fn electricity_coal_air_conditioner() {
        let kg = electricity_footprint(&tables(), 3500.0, 2.0, 1.0, Some("COAL"));
        assert_eq!(kg, 6.65);
    }

    #[test]
    fn electricity_defaults_to_grid_average() {
        let t = tables();
        let unset = electricity_footprint(&t, 1000.0, 1.0, 1.0, None);
        let unknown = electricity_footprint(&t, 1000.0, 1.0, 1.0, Some("PEAT"));
        assert_eq!(unset, 0.43);
        assert_eq!(unknown, 0.43);
    }

    #[test]
    fn electricity_scales_with_days() {
        let usage = ElectricityUsage::new(150.0, 24.0).days(7.0).source("WIND");
        // 0.15 kW * 24 h * 7 d = 25.2 kWh * 0.011
        assert_eq!(usage.footprint_kg(&tables()), 0.277);
    }

    #[test]
    fn transport_factors() {
        let t = tables();
        assert_eq!(transport_footprint(&t, "Bicycle", 100.0), 0.0);
        assert_eq!(transport_footprint(&t, "Car (Gasoline)", 50.0), 9.6);
        assert_eq!(transport_footprint(&t, "Hovercraft", 50.0), 0.0);
    }

    #[test]
    fn food_factors() {
        let t = tables();
        assert_eq!(food_footprint(&t, "Beef", 1.0), 27.0);
        assert_eq!(food_footprint(&t, "Vegetables", 2.0), 4.0);
        assert_eq!(food_footprint(&t, "Fish", 0.25), 3.24);
        assert_eq!(food_footprint(&t, "Tofu", 2.0), 0.0);
    }

    #[test]
    fn waste_fixed_factor() {
        assert_eq!(waste_footprint(10.0), 5.0);
        assert_eq!(waste_footprint(0.0013), 0.001);
    }

    #[test]
    fn rounding_to_three_decimals() {
        assert_eq!(round_kg(6.6499999), 6.65);
        assert_eq!(round_kg(0.0004), 0.0);
        assert_eq!(round_kg(0.0005), 0.001);
        assert_eq!(round_kg(1.23456), 1.235);
    }

    #[test]
    fn rounding_never_goes_negative() {
        assert_eq!(round_kg(-3.0), 0.0);
        assert_eq!(round_kg(f64::NAN), 0.0);
        assert_eq!(round_kg(f64::NEG_INFINITY), 0.0);
        assert_eq!(round_kg(f64::INFINITY), 0.0);
        assert_eq!(transport_footprint(&tables(), "Bus", -10.0), 0.0);
    }

    #[test]
    fn dispatch_routes_by_category() {
        let calc = Calculator::default();

        let energy = calc.compute(&CalculationRequest::Energy(
            ElectricityUsage::new(3500.0, 2.0).source("COAL").appliance("Air Conditioner"),
        ));
        assert_eq!(energy.category, Category::Energy);
        assert_eq!(energy.kg_co2, 6.65);
        assert_eq!(energy.source, "Air Conditioner");

        let trip = calc.compute(&CalculationRequest::Transportation(Trip {
            transport_type: "Car (Gasoline)".into(),
            distance_km: 50.0,
        }));
        assert_eq!(trip.kg_co2, 9.6);
        assert_eq!(trip.source, "Car (Gasoline)");

        let food = calc.compute(&CalculationRequest::Food(FoodConsumption {
            food_type: "Beef".into(),
            quantity_kg: 1.0,
        }));
        assert_eq!(food.kg_co2, 27.0);

        let waste = calc.compute(&CalculationRequest::Waste(WasteDisposal { quantity_kg: 10.0 }));
        assert_eq!(waste.kg_co2, 5.0);
        assert_eq!(waste.source, "Waste disposal");
    }

    #[test]
    fn compute_is_idempotent() {
        let t = tables();
        let req = CalculationRequest::Food(FoodConsumption {
            food_type: "Cheese".into(),
            quantity_kg: 0.333,
        });
        assert_eq!(compute_footprint(&t, &req), compute_footprint(&t, &req));
    }
}
