//! ISRIC SoilGrids v2.0 client
//!
//! One topsoil query per location. The primary host occasionally answers
//! 500 under load; that single case is retried once on the alternate host.

use crate::config::AppConfig;
use crate::error::{Result, SoilError};
use crate::soil::units::TOPSOIL_DEPTH;
use crate::soil::{
    sample_from_response, SoilGridsResponse, SoilMeasurement, SoilProperty, SoilSample,
};

pub struct SoilGridsClient {
    client: reqwest::Client,
    primary_url: String,
    alternate_url: String,
}

impl SoilGridsClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SoilError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            primary_url: config.soilgrids_url.clone(),
            alternate_url: config.soilgrids_alt_url.clone(),
        })
    }

    /// Topsoil sample for a coordinate, converted to conventional units.
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<SoilSample> {
        let response = match self.query(&self.primary_url, lat, lon).await {
            Err(SoilError::UpstreamStatus { status: 500, .. }) => {
                tracing::warn!(lat, lon, "SoilGrids returned 500, retrying on alternate host");
                self.query(&self.alternate_url, lat, lon).await?
            }
            other => other?,
        };

        sample_from_response(&response)
    }

    /// Like `fetch`, but any failure yields the deterministic estimate.
    pub async fn fetch_or_estimate(&self, lat: f64, lon: f64) -> SoilMeasurement {
        match self.fetch(lat, lon).await {
            Ok(sample) => SoilMeasurement::measured(sample),
            Err(e) => {
                tracing::warn!(
                    lat,
                    lon,
                    error = %e,
                    "Soil data unavailable, using estimated values"
                );
                SoilMeasurement::estimated(lat, lon)
            }
        }
    }

    async fn query(&self, base_url: &str, lat: f64, lon: f64) -> Result<SoilGridsResponse> {
        let url = query_url(base_url, lat, lon);
        tracing::debug!(%url, "Querying SoilGrids");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SoilError::Http(format!("Soil data request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SoilError::UpstreamStatus {
                status: status.as_u16(),
                url: base_url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SoilError::Decode(format!("SoilGrids response: {}", e)))
    }
}

/// `<base>?lon=..&lat=..&property=phh2o&...&depth=0-5cm`
pub fn query_url(base_url: &str, lat: f64, lon: f64) -> String {
    let properties: Vec<String> = SoilProperty::ALL
        .iter()
        .map(|p| format!("property={}", p.api_name()))
        .collect();
    format!(
        "{}?lon={}&lat={}&{}&depth={}",
        base_url,
        lon,
        lat,
        properties.join("&"),
        TOPSOIL_DEPTH
    )
}
