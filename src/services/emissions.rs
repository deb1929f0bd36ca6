// src/services/emissions.rs
use log::{debug, error, info, warn};
use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{ApiEmissionRecord, ApiResponse, EmissionRecord, EmissionType};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error fetching emissions: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Error fetching emissions: {0}")]
    Status(u16),
    #[error("malformed emissions payload: {0}")]
    MalformedPayload(String),
}

/// Client for the upstream emissions API.
#[derive(Debug, Clone)]
pub struct EmissionsService {
    client: Client,
    endpoint: String,
}

impl EmissionsService {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(EmissionsService {
            client,
            endpoint: config.emissions_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the first page of results and normalize it. Pagination links
    /// are not followed.
    pub async fn fetch_emissions(&self) -> Result<Vec<EmissionRecord>, FetchError> {
        info!("Fetching emissions from URL: {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            error!("Emissions API returned status {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let records = parse_payload(&body)?;
        info!("Loaded {} emission records", records.len());
        Ok(records)
    }
}

/// Decode an API envelope and normalize every row in it.
pub fn parse_payload(body: &str) -> Result<Vec<EmissionRecord>, FetchError> {
    let envelope: ApiResponse = serde_json::from_str(body).map_err(|e| {
        error!("Failed to decode emissions payload: {}", e);
        FetchError::MalformedPayload(e.to_string())
    })?;

    if let Some(next) = &envelope.next {
        warn!(
            "Emissions API reports {} records across pages; only the first page is used (next: {})",
            envelope.count, next
        );
    }

    envelope.results.into_iter().map(normalize_record).collect()
}

pub fn normalize_record(raw: ApiEmissionRecord) -> Result<EmissionRecord, FetchError> {
    let emissions = raw.emissions.trim().parse::<f64>().map_err(|_| {
        FetchError::MalformedPayload(format!(
            "record {} has non-numeric emissions {:?}",
            raw.id, raw.emissions
        ))
    })?;
    debug!("Normalized record {} ({} {})", raw.id, raw.country, raw.year);

    Ok(EmissionRecord {
        year: raw.year,
        emissions,
        emission_type: EmissionType::from_api(&raw.emission_type),
        country: raw.country,
        activity: raw.activity,
    })
}
