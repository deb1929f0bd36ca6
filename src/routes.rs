// src/routes.rs
use log::info;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::dashboard::{get_dashboard, get_filter_options, get_statistics};
use crate::handlers::emissions::{
    get_aggregated, get_emissions, get_table, refresh_emissions, TableQuery,
};
use crate::handlers::error::ApiError;
use crate::models::EmissionFilters;
use crate::services::store::EmissionsStore;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(invalid) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = invalid.to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    store: Arc<EmissionsStore>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());
    let filters = warp::query::<EmissionFilters>();

    let dashboard_route = warp::path!("api" / "v1" / "dashboard")
        .and(warp::get())
        .and(filters)
        .and(store_filter.clone())
        .and_then(get_dashboard);

    let emissions_route = warp::path!("api" / "v1" / "emissions")
        .and(warp::get())
        .and(filters)
        .and(store_filter.clone())
        .and_then(get_emissions);

    let aggregated_route = warp::path!("api" / "v1" / "emissions" / "aggregated")
        .and(warp::get())
        .and(filters)
        .and(store_filter.clone())
        .and_then(get_aggregated);

    let table_route = warp::path!("api" / "v1" / "emissions" / "table")
        .and(warp::get())
        .and(warp::query::<TableQuery>())
        .and(filters)
        .and(store_filter.clone())
        .and_then(get_table);

    let refresh_route = warp::path!("api" / "v1" / "emissions" / "refresh")
        .and(warp::post())
        .and(store_filter.clone())
        .and_then(refresh_emissions);

    let statistics_route = warp::path!("api" / "v1" / "statistics")
        .and(warp::get())
        .and(filters)
        .and(store_filter.clone())
        .and_then(get_statistics);

    let filter_options_route = warp::path!("api" / "v1" / "filters")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_filter_options);

    info!("All routes configured successfully.");

    dashboard_route
        .or(emissions_route)
        .or(aggregated_route)
        .or(table_route)
        .or(refresh_route)
        .or(statistics_route)
        .or(filter_options_route)
        .recover(handle_rejection)
}
