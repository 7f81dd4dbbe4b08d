//! Fixed emission-factor tables.
//!
//! Each table maps a display key to a non-negative factor. Tables keep the
//! order they were declared in so listings stay stable across runs.

use serde::Serialize;

use crate::error::TableError;

/// Key of the default electricity source.
pub const GRID_AVERAGE: &str = "GRID_AVERAGE";

/// kg CO2 per kWh, by generation source.
const CARBON_INTENSITY: &[(&str, f64)] = &[
    ("COAL", 0.95),
    ("NATURAL_GAS", 0.49),
    ("OIL", 0.78),
    ("NUCLEAR", 0.012),
    ("HYDRO", 0.004),
    ("WIND", 0.011),
    ("SOLAR", 0.041),
    (GRID_AVERAGE, 0.43),
];

/// Rated power draw in watts.
const APPLIANCE_RATINGS: &[(&str, f64)] = &[
    ("Air Conditioner", 3500.0),
    ("Refrigerator", 150.0),
    ("Washing Machine", 500.0),
    ("Dishwasher", 1800.0),
    ("Microwave", 1000.0),
    ("Television", 100.0),
    ("Computer", 300.0),
    ("Laptop", 65.0),
    ("Electric Heater", 1500.0),
    ("Water Heater", 4000.0),
    ("Oven", 2000.0),
    ("Toaster", 800.0),
    ("Hair Dryer", 1800.0),
    ("Vacuum Cleaner", 600.0),
    ("Iron", 1200.0),
    ("Light Bulb (LED)", 10.0),
    ("Light Bulb (CFL)", 15.0),
    ("Light Bulb (Incandescent)", 60.0),
    ("Electric Car Charger", 7000.0),
];

/// kg CO2 per km travelled.
const TRANSPORT_EMISSIONS: &[(&str, f64)] = &[
    ("Car (Gasoline)", 0.192),
    ("Car (Diesel)", 0.174),
    ("Car (Electric)", 0.078),
    ("Bus", 0.089),
    ("Train", 0.041),
    ("Flight", 0.195),
    ("Motorcycle", 0.096),
    ("Bicycle", 0.0),
];

/// kg CO2 per kg of food.
const FOOD_EMISSIONS: &[(&str, f64)] = &[
    ("Beef", 27.0),
    ("Lamb", 24.0),
    ("Cheese", 23.5),
    ("Pork", 12.0),
    ("Fish", 12.96),
    ("Chicken", 6.9),
    ("Eggs", 4.8),
    ("Milk", 3.2),
    ("Vegetables", 2.0),
    ("Fruits", 1.5),
    ("Nuts", 2.3),
    ("Grains", 1.5),
    ("Rice", 2.7),
    ("Pasta", 1.6),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorEntry {
    pub key: String,
    pub factor: f64,
}

/// Ordered key -> factor mapping with a unit label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionFactorTable {
    name: &'static str,
    unit: &'static str,
    entries: Vec<FactorEntry>,
}

impl EmissionFactorTable {
    /// Builds a table, rejecting negative or non-finite factors and repeated keys.
    pub fn new<K: Into<String>>(
        name: &'static str,
        unit: &'static str,
        entries: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self, TableError> {
        let mut table = Self {
            name,
            unit,
            entries: Vec::new(),
        };
        for (key, factor) in entries {
            let key = key.into();
            if !factor.is_finite() || factor < 0.0 {
                return Err(TableError::InvalidFactor { key, value: factor });
            }
            if table.get(&key).is_some() {
                return Err(TableError::DuplicateKey(key, name));
            }
            table.entries.push(FactorEntry { key, factor });
        }
        Ok(table)
    }

    // Static rows are checked by `static_tables_are_valid`.
    fn from_static(name: &'static str, unit: &'static str, rows: &[(&str, f64)]) -> Self {
        Self {
            name,
            unit,
            entries: rows
                .iter()
                .map(|&(key, factor)| FactorEntry {
                    key: key.to_string(),
                    factor,
                })
                .collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    /// Exact-match lookup. Unknown keys return `None`.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.factor)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn entries(&self) -> &[FactorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The four tables the calculators read from. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorTables {
    pub energy_sources: EmissionFactorTable,
    pub appliances: EmissionFactorTable,
    pub transport: EmissionFactorTable,
    pub food: EmissionFactorTable,
}

impl FactorTables {
    /// Builds the four tables from explicit entries.
    /// The energy-source table must contain `GRID_AVERAGE`.
    pub fn new(
        energy_sources: EmissionFactorTable,
        appliances: EmissionFactorTable,
        transport: EmissionFactorTable,
        food: EmissionFactorTable,
    ) -> Result<Self, TableError> {
        if !energy_sources.contains(GRID_AVERAGE) {
            return Err(TableError::MissingKey(GRID_AVERAGE, energy_sources.name));
        }
        Ok(Self {
            energy_sources,
            appliances,
            transport,
            food,
        })
    }

    /// The built-in tables.
    pub fn standard() -> Self {
        Self {
            energy_sources: EmissionFactorTable::from_static(
                "energy source",
                "kg CO2/kWh",
                CARBON_INTENSITY,
            ),
            appliances: EmissionFactorTable::from_static("appliance", "W", APPLIANCE_RATINGS),
            transport: EmissionFactorTable::from_static(
                "transport",
                "kg CO2/km",
                TRANSPORT_EMISSIONS,
            ),
            food: EmissionFactorTable::from_static("food", "kg CO2/kg", FOOD_EMISSIONS),
        }
    }

    /// Intensity for `source`, or `None` when the key is unknown.
    pub fn carbon_intensity(&self, source: &str) -> Option<f64> {
        self.energy_sources.get(source)
    }

    /// Intensity of `GRID_AVERAGE`.
    pub fn grid_average(&self) -> f64 {
        self.energy_sources.get(GRID_AVERAGE).unwrap_or(0.0)
    }

    pub fn appliance_power_watts(&self, appliance: &str) -> Option<f64> {
        self.appliances.get(appliance)
    }

    pub fn transport_factor(&self, transport_type: &str) -> Option<f64> {
        self.transport.get(transport_type)
    }

    pub fn food_factor(&self, food_type: &str) -> Option<f64> {
        self.food.get(food_type)
    }

    pub fn appliance_names(&self) -> Vec<&str> {
        self.appliances.keys()
    }

    pub fn transport_types(&self) -> Vec<&str> {
        self.transport.keys()
    }

    pub fn energy_sources(&self) -> Vec<&str> {
        self.energy_sources.keys()
    }

    pub fn food_types(&self) -> Vec<&str> {
        self.food.keys()
    }
}

impl Default for FactorTables {
    fn default() -> Self {
        Self::standard()
    }
}
