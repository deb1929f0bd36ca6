// src/services/calculations.rs
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    AggregatedEmission, ByType, EmissionRecord, EmissionType, FilterOptions, Statistics,
};

/// Group records by year, ascending.
pub fn aggregate_by_year(records: &[EmissionRecord]) -> Vec<AggregatedEmission> {
    let mut by_year: BTreeMap<i32, AggregatedEmission> = BTreeMap::new();

    for record in records {
        let entry = by_year.entry(record.year).or_insert_with(|| AggregatedEmission {
            year: record.year,
            total: 0.0,
            by_type: ByType::default(),
        });
        entry.total += record.emissions;
        entry.by_type.add(record.emission_type, record.emissions);
    }

    debug!("Aggregated {} records into {} years", records.len(), by_year.len());
    by_year.into_values().collect()
}

pub fn calculate_total_emissions(records: &[EmissionRecord]) -> f64 {
    records.iter().map(|r| r.emissions).sum()
}

pub fn calculate_average_emissions(records: &[EmissionRecord]) -> f64 {
    if records.is_empty() {
        0.0
    } else {
        calculate_total_emissions(records) / records.len() as f64
    }
}

/// Percent change between the last two entries of a year-ascending series.
/// Those are the two most recent years present, not necessarily adjacent.
pub fn calculate_year_over_year_change(aggregated: &[AggregatedEmission]) -> f64 {
    let [.., previous, latest] = aggregated else {
        return 0.0;
    };

    if previous.total == 0.0 {
        warn!(
            "Year-over-year change from {} to {} is undefined (zero base), reporting 0",
            previous.year, latest.year
        );
        return 0.0;
    }

    (latest.total - previous.total) / previous.total * 100.0
}

pub fn calculate_statistics(
    records: &[EmissionRecord],
    aggregated: &[AggregatedEmission],
) -> Statistics {
    Statistics {
        total_emissions: calculate_total_emissions(records),
        avg_emissions: calculate_average_emissions(records),
        yoy_change: calculate_year_over_year_change(aggregated),
        record_count: records.len(),
    }
}

/// Distinct countries in byte-wise (UTF-8) order, which matches code-point
/// order and can differ from UTF-16 sorting only for astral-plane characters.
pub fn unique_countries(records: &[EmissionRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Distinct activities, ordered like `unique_countries`.
pub fn unique_activities(records: &[EmissionRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = records.iter().map(|r| r.activity.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Gas types present in the data, ordered by their code string.
pub fn unique_emission_types(records: &[EmissionRecord]) -> Vec<EmissionType> {
    let mut types: Vec<EmissionType> = EmissionType::ALL
        .into_iter()
        .filter(|t| records.iter().any(|r| r.emission_type == *t))
        .collect();
    types.sort_by_key(|t| t.as_str());
    types
}

/// Build filter options from the full, unfiltered dataset.
pub fn build_filter_options(records: &[EmissionRecord]) -> FilterOptions {
    FilterOptions {
        countries: unique_countries(records),
        activities: unique_activities(records),
        emission_types: unique_emission_types(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        year: i32,
        emissions: f64,
        emission_type: EmissionType,
        country: &str,
    ) -> EmissionRecord {
        EmissionRecord {
            year,
            emissions,
            emission_type,
            country: country.to_string(),
            activity: "Energy".to_string(),
        }
    }

    fn series(points: &[(i32, f64)]) -> Vec<AggregatedEmission> {
        points
            .iter()
            .map(|&(year, total)| AggregatedEmission {
                year,
                total,
                by_type: ByType { co2: total, ..Default::default() },
            })
            .collect()
    }

    #[test]
    fn aggregates_one_year_across_gases() {
        let records = vec![
            record(2020, 10.0, EmissionType::Co2, "USA"),
            record(2020, 5.0, EmissionType::Ch4, "USA"),
        ];
        let aggregated = aggregate_by_year(&records);
        assert_eq!(
            aggregated,
            vec![AggregatedEmission {
                year: 2020,
                total: 15.0,
                by_type: ByType { co2: 10.0, n2o: 0.0, ch4: 5.0 },
            }]
        );
    }

    #[test]
    fn aggregate_sorts_years_ascending() {
        let records = vec![
            record(2022, 1.0, EmissionType::N2o, "USA"),
            record(2018, 2.0, EmissionType::Co2, "USA"),
            record(2020, 3.0, EmissionType::Co2, "USA"),
            record(2018, 4.0, EmissionType::Ch4, "USA"),
        ];
        let years: Vec<i32> = aggregate_by_year(&records).iter().map(|a| a.year).collect();
        assert_eq!(years, vec![2018, 2020, 2022]);
    }

    #[test]
    fn aggregate_of_empty_is_empty() {
        assert!(aggregate_by_year(&[]).is_empty());
    }

    #[test]
    fn totals_and_average_of_empty_are_zero() {
        assert_eq!(calculate_total_emissions(&[]), 0.0);
        assert_eq!(calculate_average_emissions(&[]), 0.0);
    }

    #[test]
    fn yoy_needs_two_years() {
        assert_eq!(calculate_year_over_year_change(&[]), 0.0);
        assert_eq!(calculate_year_over_year_change(&series(&[(2020, 100.0)])), 0.0);
    }

    #[test]
    fn yoy_uses_last_two_entries() {
        assert_eq!(
            calculate_year_over_year_change(&series(&[(2020, 100.0), (2021, 120.0)])),
            20.0
        );
        // 2019 is missing, so 2018 is the comparison year
        let gapped = series(&[(2017, 1.0), (2018, 200.0), (2020, 150.0)]);
        let change = calculate_year_over_year_change(&gapped);
        assert!((change - -25.0).abs() < 1e-9);
    }

    #[test]
    fn yoy_zero_base_reports_zero() {
        assert_eq!(
            calculate_year_over_year_change(&series(&[(2020, 0.0), (2021, 50.0)])),
            0.0
        );
    }

    #[test]
    fn statistics_bundle() {
        let records = vec![
            record(2020, 10.0, EmissionType::Co2, "USA"),
            record(2020, 5.0, EmissionType::Ch4, "USA"),
        ];
        let aggregated = aggregate_by_year(&records);
        let stats = calculate_statistics(&records, &aggregated);
        assert_eq!(
            stats,
            Statistics {
                total_emissions: 15.0,
                avg_emissions: 7.5,
                yoy_change: 0.0,
                record_count: 2,
            }
        );
    }

    #[test]
    fn unique_countries_sorted_and_deduplicated() {
        let records = vec![
            record(2020, 1.0, EmissionType::Co2, "USA"),
            record(2020, 1.0, EmissionType::Co2, "Brazil"),
            record(2021, 1.0, EmissionType::Co2, "USA"),
        ];
        assert_eq!(unique_countries(&records), vec!["Brazil", "USA"]);
        assert_eq!(unique_activities(&records), vec!["Energy"]);
    }

    #[test]
    fn unique_countries_use_code_point_order() {
        let records = vec![
            record(2020, 1.0, EmissionType::Co2, "Österreich"),
            record(2020, 1.0, EmissionType::Co2, "Zambia"),
            record(2020, 1.0, EmissionType::Co2, "Argentina"),
        ];
        assert_eq!(unique_countries(&records), vec!["Argentina", "Zambia", "Österreich"]);
    }

    #[test]
    fn unique_emission_types_only_lists_present_gases() {
        let records = vec![
            record(2020, 1.0, EmissionType::N2o, "USA"),
            record(2020, 1.0, EmissionType::Co2, "USA"),
            record(2021, 1.0, EmissionType::N2o, "USA"),
        ];
        assert_eq!(
            unique_emission_types(&records),
            vec![EmissionType::Co2, EmissionType::N2o]
        );

        let all = vec![
            record(2020, 1.0, EmissionType::N2o, "USA"),
            record(2020, 1.0, EmissionType::Co2, "USA"),
            record(2020, 1.0, EmissionType::Ch4, "USA"),
        ];
        assert_eq!(
            unique_emission_types(&all),
            vec![EmissionType::Ch4, EmissionType::Co2, EmissionType::N2o]
        );
    }
}
