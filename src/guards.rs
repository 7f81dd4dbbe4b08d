//! Boundary validation for entry payloads.
//!
//! The calculators never fail, so everything that can be wrong with a payload
//! is caught here: missing fields, negative numbers, unknown categories and
//! appliance names that resolve to no power rating.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::compute_footprint;
use crate::error::EntryError;
use crate::factors::FactorTables;
use crate::types::{
    CalculationRequest, Category, ElectricityUsage, FoodConsumption, Trip, WasteDisposal,
};

/// Unit stored alongside every recorded amount.
pub const AMOUNT_UNIT: &str = "kg CO2";

/// Entry body as a client sends it. Only `category` is always required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appliance_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_used: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_used: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_kg: Option<f64>,
}

impl EntryPayload {
    pub fn from_json(json: &str) -> Result<Self, EntryError> {
        serde_json::from_str(json).map_err(|e| EntryError::Malformed(e.to_string()))
    }
}

/// A computed entry, shaped like the row the tracker stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEntry {
    pub category: Category,
    pub amount: f64,
    pub unit: String,
    pub source: String,
    pub description: String,
    pub date: NaiveDate,
}

/// InputGuard: turns untrusted payloads into typed calculation requests.
pub struct InputGuard;

impl InputGuard {
    pub fn validate_entry(
        payload: &EntryPayload,
        tables: &FactorTables,
    ) -> Result<CalculationRequest, EntryError> {
        let category: Category = payload.category.parse()?;
        let request = match category {
            Category::Energy => CalculationRequest::Energy(Self::electricity(payload, tables)?),
            Category::Transportation => {
                let transport_type = non_empty(&payload.transport_type);
                let (Some(transport_type), Some(distance)) = (transport_type, payload.distance)
                else {
                    return Err(EntryError::MissingTransport);
                };
                CalculationRequest::Transportation(Trip {
                    transport_type: transport_type.to_string(),
                    distance_km: non_negative("distance", distance)?,
                })
            }
            Category::Food => {
                let food_type = non_empty(&payload.food_type);
                let (Some(food_type), Some(quantity)) = (food_type, payload.quantity) else {
                    return Err(EntryError::MissingFood);
                };
                CalculationRequest::Food(FoodConsumption {
                    food_type: food_type.to_string(),
                    quantity_kg: non_negative("quantity", quantity)?,
                })
            }
            Category::Waste => {
                let quantity_kg = payload
                    .quantity_kg
                    .ok_or(EntryError::MissingWasteQuantity)?;
                CalculationRequest::Waste(WasteDisposal {
                    quantity_kg: non_negative("quantityKg", quantity_kg)?,
                })
            }
        };
        Ok(request)
    }

    /// An explicit `powerWatts` wins over the appliance's rated power.
    fn electricity(
        payload: &EntryPayload,
        tables: &FactorTables,
    ) -> Result<ElectricityUsage, EntryError> {
        let appliance = non_empty(&payload.appliance_name);
        if appliance.is_none() && payload.power_watts.is_none() {
            return Err(EntryError::MissingPower);
        }
        let hours_used = payload.hours_used.ok_or(EntryError::MissingHours)?;

        let power_watts = match (payload.power_watts, appliance) {
            (Some(watts), _) => watts,
            (None, Some(name)) => tables
                .appliance_power_watts(name)
                .ok_or_else(|| EntryError::UnknownAppliance(name.to_string()))?,
            (None, None) => return Err(EntryError::MissingPower),
        };
        if !power_watts.is_finite() || power_watts <= 0.0 {
            return Err(EntryError::NonPositivePower(power_watts));
        }

        Ok(ElectricityUsage {
            power_watts,
            hours_used: non_negative("hoursUsed", hours_used)?,
            days_used: match payload.days_used {
                Some(days) => non_negative("daysUsed", days)?,
                None => 1.0,
            },
            energy_source: non_empty(&payload.energy_source).map(str::to_string),
            appliance: appliance.map(str::to_string),
        })
    }

    /// Accepts a calendar date or a full RFC 3339 timestamp.
    pub fn parse_date(raw: &str) -> Result<NaiveDate, EntryError> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
            .map_err(|_| EntryError::InvalidDate(raw.to_string()))
    }
}

/// Validates a payload, computes its footprint and assembles the stored entry.
/// `today` is used when the payload carries no date.
pub fn record_entry(
    payload: &EntryPayload,
    tables: &FactorTables,
    today: NaiveDate,
) -> Result<RecordedEntry, EntryError> {
    let request = InputGuard::validate_entry(payload, tables)?;
    let date = match payload.date.as_deref() {
        Some(raw) => InputGuard::parse_date(raw)?,
        None => today,
    };
    let result = compute_footprint(tables, &request);
    debug!(category = %result.category, amount = result.kg_co2, "entry recorded");

    let description = non_empty(&payload.description)
        .map(str::to_string)
        .unwrap_or_else(|| result.source.clone());
    Ok(RecordedEntry {
        category: result.category,
        amount: result.kg_co2,
        unit: AMOUNT_UNIT.to_string(),
        source: result.source,
        description,
        date,
    })
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, EntryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EntryError::NegativeValue { field, value })
    }
}
