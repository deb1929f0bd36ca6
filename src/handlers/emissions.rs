// src/handlers/emissions.rs
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use super::load_dataset;
use crate::models::EmissionFilters;
use crate::services::calculations::aggregate_by_year;
use crate::services::dashboard::{RecordTable, DEFAULT_TABLE_ROWS};
use crate::services::filters::filter_emissions;
use crate::services::store::EmissionsStore;

#[derive(Debug, Deserialize)]
pub struct TableQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    record_count: usize,
    fetched_at: DateTime<Utc>,
}

pub async fn get_emissions(
    filters: EmissionFilters,
    store: Arc<EmissionsStore>,
) -> Result<Json, Rejection> {
    info!("Handling request for emissions with filters {:?}", filters);
    let dataset = load_dataset(&store).await?;
    Ok(warp::reply::json(&filter_emissions(&dataset.records, &filters)))
}

pub async fn get_aggregated(
    filters: EmissionFilters,
    store: Arc<EmissionsStore>,
) -> Result<Json, Rejection> {
    info!("Handling request for aggregated emissions with filters {:?}", filters);
    let dataset = load_dataset(&store).await?;
    let filtered = filter_emissions(&dataset.records, &filters);
    Ok(warp::reply::json(&aggregate_by_year(&filtered)))
}

pub async fn get_table(
    query: TableQuery,
    filters: EmissionFilters,
    store: Arc<EmissionsStore>,
) -> Result<Json, Rejection> {
    let limit = query.limit.unwrap_or(DEFAULT_TABLE_ROWS);
    info!("Handling request for records table (limit {})", limit);
    let dataset = load_dataset(&store).await?;
    let filtered = filter_emissions(&dataset.records, &filters);
    Ok(warp::reply::json(&RecordTable::build(&filtered, limit)))
}

pub async fn refresh_emissions(store: Arc<EmissionsStore>) -> Result<Json, Rejection> {
    info!("Handling request to refresh emissions");
    match store.refresh().await {
        Ok(dataset) => Ok(warp::reply::json(&RefreshResponse {
            record_count: dataset.records.len(),
            fetched_at: dataset.fetched_at,
        })),
        Err(e) => {
            error!("Refresh failed: {}", e);
            Err(warp::reject::custom(ApiError::from(e)))
        }
    }
}
