// src/services/store.rs
use chrono::{DateTime, Utc};
use log::{error, info};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::emissions::{EmissionsService, FetchError};
use crate::models::EmissionRecord;

/// One successful fetch, normalized.
#[derive(Debug)]
pub struct Dataset {
    pub records: Vec<EmissionRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Holds the most recently loaded dataset. Concurrent loads are not
/// de-duplicated; the last fetch to finish wins.
pub struct EmissionsStore {
    service: EmissionsService,
    dataset: RwLock<Option<Arc<Dataset>>>,
}

impl EmissionsStore {
    pub fn new(service: EmissionsService) -> Self {
        EmissionsStore {
            service,
            dataset: RwLock::new(None),
        }
    }

    /// Return the loaded dataset, fetching it on first use.
    pub async fn load(&self) -> Result<Arc<Dataset>, FetchError> {
        if let Some(dataset) = self.current().await {
            return Ok(dataset);
        }
        info!("No emissions loaded yet, fetching");
        self.refresh().await
    }

    /// Fetch again and replace the dataset wholesale. A failed fetch leaves
    /// the previous dataset in place.
    pub async fn refresh(&self) -> Result<Arc<Dataset>, FetchError> {
        let records = match self.service.fetch_emissions().await {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to refresh emissions: {}", e);
                return Err(e);
            }
        };

        let dataset = Arc::new(Dataset {
            records,
            fetched_at: Utc::now(),
        });
        *self.dataset.write().await = Some(dataset.clone());
        info!(
            "Emissions dataset replaced ({} records at {})",
            dataset.records.len(),
            dataset.fetched_at
        );
        Ok(dataset)
    }

    pub async fn current(&self) -> Option<Arc<Dataset>> {
        self.dataset.read().await.clone()
    }
}
