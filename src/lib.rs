#![forbid(unsafe_code)]

//! Carbon-footprint engine for the EcoTrack activity tracker.
//!
//! Entries arrive as loosely-typed payloads, are checked by [`InputGuard`],
//! and become a [`CalculationRequest`]. The calculators turn a request into
//! kilograms of CO2 using the fixed [`FactorTables`]; they are pure and never
//! fail. [`report`] aggregates recorded entries into the dashboard statistics.

pub mod calculator;
pub mod config;
pub mod error;
pub mod factors;
pub mod guards;
pub mod report;
pub mod types;

pub use calculator::{
    compute_footprint, electricity_footprint, food_footprint, round_kg, transport_footprint,
    waste_footprint, Calculator, CarbonFootprint, WASTE_FACTOR_KG_PER_KG,
};
pub use config::{Config, OutputFormat};
pub use error::{ConfigError, EntryError, TableError};
pub use factors::{EmissionFactorTable, FactorEntry, FactorTables, GRID_AVERAGE};
pub use guards::{record_entry, EntryPayload, InputGuard, RecordedEntry, AMOUNT_UNIT};
pub use report::{CategoryTotal, Month, Report, TotalSummary};
pub use types::{
    CalculationRequest, CalculationResult, Category, ElectricityUsage, FoodConsumption, Trip,
    WasteDisposal,
};
