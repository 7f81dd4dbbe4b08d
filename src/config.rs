use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::ConfigError;

pub const ENTRIES_VAR: &str = "ECOTRACK_ENTRIES";
pub const FORMAT_VAR: &str = "ECOTRACK_FORMAT";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("expected text or json, got {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub entries_path: PathBuf,
    pub format: OutputFormat,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `load`, reading values through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            entries_path: try_load(&lookup, ENTRIES_VAR, "data/carbon_entries.jsonl")?,
            format: try_load(&lookup, FORMAT_VAR, "text")?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
        }
    })
}
