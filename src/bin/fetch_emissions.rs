// src/bin/fetch_emissions.rs
//
// Usage: fetch_emissions [field=value ...]
// e.g. fetch_emissions country=Brazil emissionType=CH4
use anyhow::{anyhow, Context};
use dotenv::dotenv;
use log::{error, info};
use std::env;

use ghg_emissions_dashboard::config::AppConfig;
use ghg_emissions_dashboard::models::{EmissionFilters, EmissionRecord, EmissionType, FilterField};
use ghg_emissions_dashboard::services::dashboard::DashboardView;
use ghg_emissions_dashboard::services::emissions::EmissionsService;

fn parse_filters(args: impl Iterator<Item = String>) -> anyhow::Result<EmissionFilters> {
    let mut filters = EmissionFilters::default();
    for arg in args {
        let (field, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("expected field=value, got {:?}", arg))?;
        let field: FilterField = field.parse()?;
        filters
            .update(field, Some(value))
            .with_context(|| format!("invalid filter {:?}", arg))?;
    }
    Ok(filters)
}

fn print_summary(records: &[EmissionRecord], filters: &EmissionFilters) {
    let view = DashboardView::build(records, filters);
    let stats = &view.statistics;

    println!("Filters:            {:?}", view.filters);
    println!("Total Emissions:    {:.1} Mt", stats.total_emissions);
    println!("Average per Record: {:.2} Mt", stats.avg_emissions);
    println!("YoY Change:         {:+.1}%", stats.yoy_change);
    println!("Data Points:        {}", stats.record_count);
    println!();

    for entry in &view.aggregated {
        let by_type: Vec<String> = EmissionType::ALL
            .iter()
            .map(|t| format!("{} {:.2}", t.label(), entry.by_type.get(*t)))
            .collect();
        println!("{}: {:.2} Mt ({})", entry.year, entry.total, by_type.join(", "));
    }

    println!();
    println!("Countries:  {}", view.filter_options.countries.join(", "));
    println!("Activities: {}", view.filter_options.activities.join(", "));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut filters = parse_filters(env::args().skip(1))?;

    let config = AppConfig::from_env()?;
    let service = EmissionsService::new(&config)?;
    info!("Testing emissions fetch from {}", service.endpoint());

    let records = match service.fetch_emissions().await {
        Ok(records) => records,
        Err(e) => {
            error!("ERROR: Failed to fetch emissions: {}", e);
            return Err(e.into());
        }
    };

    print_summary(&records, &filters);

    if filters.has_active() {
        info!("Comparing against the unfiltered dataset");
        filters.clear();
        println!();
        print_summary(&records, &filters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_field_value_pairs() {
        let filters = parse_filters(args(&["country=Brazil", "emissionType=CH₄"])).unwrap();
        assert_eq!(filters.country.as_deref(), Some("Brazil"));
        assert_eq!(filters.emission_type, Some(EmissionType::Ch4));
        assert!(filters.has_active());
    }

    #[test]
    fn blank_value_leaves_field_unset() {
        let filters = parse_filters(args(&["country=", "activity="])).unwrap();
        assert!(!filters.has_active());
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_filters(args(&["country"])).is_err());
        assert!(parse_filters(args(&["year=2020"])).is_err());
        assert!(parse_filters(args(&["emissionType=SF6"])).is_err());
    }
}
