// src/services/filters.rs
use crate::models::{non_blank, EmissionFilters, EmissionRecord};

/// True when the record satisfies every constraint that is set. Blank
/// country or activity values are no constraint.
pub fn matches(record: &EmissionRecord, filters: &EmissionFilters) -> bool {
    if let Some(country) = non_blank(filters.country.as_deref()) {
        if record.country != country {
            return false;
        }
    }
    if let Some(emission_type) = filters.emission_type {
        if record.emission_type != emission_type {
            return false;
        }
    }
    if let Some(activity) = non_blank(filters.activity.as_deref()) {
        if record.activity != activity {
            return false;
        }
    }
    true
}

pub fn filter_emissions(
    records: &[EmissionRecord],
    filters: &EmissionFilters,
) -> Vec<EmissionRecord> {
    records
        .iter()
        .filter(|record| matches(record, filters))
        .cloned()
        .collect()
}
