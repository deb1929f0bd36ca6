// src/handlers/dashboard.rs
use log::info;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::load_dataset;
use crate::models::EmissionFilters;
use crate::services::calculations::{aggregate_by_year, build_filter_options, calculate_statistics};
use crate::services::dashboard::DashboardView;
use crate::services::filters::filter_emissions;
use crate::services::store::EmissionsStore;

pub async fn get_dashboard(
    filters: EmissionFilters,
    store: Arc<EmissionsStore>,
) -> Result<Json, Rejection> {
    info!("Handling request for dashboard with filters {:?}", filters);
    let dataset = load_dataset(&store).await?;
    let view = DashboardView::build(&dataset.records, &filters);
    Ok(warp::reply::json(&view))
}

pub async fn get_statistics(
    filters: EmissionFilters,
    store: Arc<EmissionsStore>,
) -> Result<Json, Rejection> {
    info!("Handling request for statistics with filters {:?}", filters);
    let dataset = load_dataset(&store).await?;
    let filtered = filter_emissions(&dataset.records, &filters);
    let aggregated = aggregate_by_year(&filtered);
    let statistics = calculate_statistics(&filtered, &aggregated);
    info!(
        "Statistics: total {:.1} Mt, avg {:.2} Mt, yoy {:+.1}%, {} records",
        statistics.total_emissions,
        statistics.avg_emissions,
        statistics.yoy_change,
        statistics.record_count
    );
    Ok(warp::reply::json(&statistics))
}

pub async fn get_filter_options(store: Arc<EmissionsStore>) -> Result<Json, Rejection> {
    info!("Handling request for filter options");
    let dataset = load_dataset(&store).await?;
    Ok(warp::reply::json(&build_filter_options(&dataset.records)))
}
