// src/models.rs
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Greenhouse gases tracked by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmissionType {
    #[serde(rename = "CO2", alias = "CO₂")]
    Co2,
    #[serde(rename = "N2O", alias = "N₂O")]
    N2o,
    #[serde(rename = "CH4", alias = "CH₄")]
    Ch4,
}

impl EmissionType {
    pub const ALL: [EmissionType; 3] = [EmissionType::Co2, EmissionType::N2o, EmissionType::Ch4];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionType::Co2 => "CO2",
            EmissionType::N2o => "N2O",
            EmissionType::Ch4 => "CH4",
        }
    }

    /// Chemical notation with subscripts, as shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            EmissionType::Co2 => "CO₂",
            EmissionType::N2o => "N₂O",
            EmissionType::Ch4 => "CH₄",
        }
    }

    fn lookup(raw: &str) -> Option<Self> {
        match raw {
            "CO2" | "CO₂" => Some(EmissionType::Co2),
            "N2O" | "N₂O" => Some(EmissionType::N2o),
            "CH4" | "CH₄" => Some(EmissionType::Ch4),
            _ => None,
        }
    }

    /// Lenient mapping used when normalizing API rows. Anything unrecognized
    /// is treated as CO2.
    pub fn from_api(raw: &str) -> Self {
        Self::lookup(raw).unwrap_or_else(|| {
            debug!("Unrecognized emission type {:?}, defaulting to CO2", raw);
            EmissionType::Co2
        })
    }
}

impl fmt::Display for EmissionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmissionType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| FilterError::UnknownEmissionType(s.to_string()))
    }
}

/// One normalized measurement. `emissions` is in megatonnes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    pub year: i32,
    pub emissions: f64,
    pub emission_type: EmissionType,
    pub country: String,
    pub activity: String,
}

/// A row as the upstream API sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEmissionRecord {
    pub id: i64,
    pub year: i32,
    pub emissions: String,
    pub emission_type: String,
    pub country: String,
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ApiEmissionRecord>,
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("unknown emission type: {0}")]
    UnknownEmissionType(String),
    #[error("unknown filter field: {0}")]
    UnknownField(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Country,
    EmissionType,
    Activity,
}

impl FromStr for FilterField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" => Ok(FilterField::Country),
            "emissionType" | "emission_type" => Ok(FilterField::EmissionType),
            "activity" => Ok(FilterField::Activity),
            other => Err(FilterError::UnknownField(other.to_string())),
        }
    }
}

/// Blank or whitespace-only filter values mean "no constraint".
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(raw.as_deref()).map(str::to_string))
}

fn blank_emission_type_as_none<'de, D>(
    deserializer: D,
) -> Result<Option<EmissionType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    non_blank(raw.as_deref())
        .map(str::parse::<EmissionType>)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Equality constraints picked by the user. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionFilters {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "blank_emission_type_as_none")]
    pub emission_type: Option<EmissionType>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub activity: Option<String>,
}

impl EmissionFilters {
    /// Set or unset a single field. Other fields are left alone; a blank
    /// value unsets the field.
    pub fn update(&mut self, field: FilterField, value: Option<&str>) -> Result<(), FilterError> {
        let value = non_blank(value);
        match field {
            FilterField::Country => self.country = value.map(str::to_string),
            FilterField::Activity => self.activity = value.map(str::to_string),
            FilterField::EmissionType => {
                self.emission_type = value.map(str::parse::<EmissionType>).transpose()?;
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = EmissionFilters::default();
    }

    pub fn has_active(&self) -> bool {
        non_blank(self.country.as_deref()).is_some()
            || self.emission_type.is_some()
            || non_blank(self.activity.as_deref()).is_some()
    }
}

/// Per-gas sums for one year. All three gases are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ByType {
    #[serde(rename = "CO2")]
    pub co2: f64,
    #[serde(rename = "N2O")]
    pub n2o: f64,
    #[serde(rename = "CH4")]
    pub ch4: f64,
}

impl ByType {
    pub fn get(&self, emission_type: EmissionType) -> f64 {
        match emission_type {
            EmissionType::Co2 => self.co2,
            EmissionType::N2o => self.n2o,
            EmissionType::Ch4 => self.ch4,
        }
    }

    pub fn add(&mut self, emission_type: EmissionType, value: f64) {
        match emission_type {
            EmissionType::Co2 => self.co2 += value,
            EmissionType::N2o => self.n2o += value,
            EmissionType::Ch4 => self.ch4 += value,
        }
    }

    pub fn sum(&self) -> f64 {
        self.co2 + self.n2o + self.ch4
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedEmission {
    pub year: i32,
    pub total: f64,
    pub by_type: ByType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_emissions: f64,
    pub avg_emissions: f64,
    /// Percent change between the two most recent years in the series.
    pub yoy_change: f64,
    pub record_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub activities: Vec<String>,
    pub emission_types: Vec<EmissionType>,
}
