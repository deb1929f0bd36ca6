// src/services/dashboard.rs
use serde::Serialize;

use super::calculations::{aggregate_by_year, build_filter_options, calculate_statistics};
use super::filters::filter_emissions;
use crate::models::{AggregatedEmission, EmissionFilters, EmissionRecord, FilterOptions, Statistics};

/// Rows shown in the records table when no limit is given.
pub const DEFAULT_TABLE_ROWS: usize = 50;

/// Everything the presentation layer needs for one filter selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub emissions: Vec<EmissionRecord>,
    pub aggregated: Vec<AggregatedEmission>,
    pub statistics: Statistics,
    pub filter_options: FilterOptions,
    pub filters: EmissionFilters,
}

impl DashboardView {
    /// Run the full pipeline over `records`. Filter options come from the
    /// unfiltered set so they stay stable while the selection narrows.
    pub fn build(records: &[EmissionRecord], filters: &EmissionFilters) -> Self {
        let emissions = filter_emissions(records, filters);
        let aggregated = aggregate_by_year(&emissions);
        let statistics = calculate_statistics(&emissions, &aggregated);

        DashboardView {
            filter_options: build_filter_options(records),
            filters: filters.clone(),
            emissions,
            aggregated,
            statistics,
        }
    }
}

/// The records table: most recent years first, capped at a row limit.
#[derive(Debug, Clone, Serialize)]
pub struct RecordTable {
    pub showing: usize,
    pub total: usize,
    pub rows: Vec<EmissionRecord>,
}

impl RecordTable {
    pub fn build(records: &[EmissionRecord], limit: usize) -> Self {
        let mut rows = records.to_vec();
        // stable, so rows within a year keep their input order
        rows.sort_by(|a, b| b.year.cmp(&a.year));
        rows.truncate(limit);

        RecordTable {
            showing: rows.len(),
            total: records.len(),
            rows,
        }
    }
}
