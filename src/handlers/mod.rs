pub mod dashboard;
pub mod emissions;
pub mod error;

use log::error;
use std::sync::Arc;
use warp::Rejection;

use crate::services::store::{Dataset, EmissionsStore};
use error::ApiError;

/// Loaded dataset or a 502 rejection carrying the fetch error.
pub(crate) async fn load_dataset(store: &EmissionsStore) -> Result<Arc<Dataset>, Rejection> {
    store.load().await.map_err(|e| {
        error!("Failed to load emissions: {}", e);
        warp::reject::custom(ApiError::from(e))
    })
}
