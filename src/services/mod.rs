//! Upstream services and the report pipeline
//!
//! - `geocode.rs` - Nominatim place search
//! - `soilgrids.rs` - SoilGrids topsoil query with alternate-host retry
//!
//! `ReportService` ties them to `SoilReport::build`.

pub mod geocode;
pub mod soilgrids;

use chrono::Utc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::report::SoilReport;
use crate::soil::{Location, SoilMeasurement};

pub use geocode::Geocoder;
pub use soilgrids::SoilGridsClient;

pub struct ReportService {
    pub geocoder: Geocoder,
    pub soil: SoilGridsClient,
}

impl ReportService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            geocoder: Geocoder::new(config)?,
            soil: SoilGridsClient::new(config)?,
        })
    }

    pub async fn locate(&self, query: &str) -> Result<Location> {
        self.geocoder.geocode(query).await
    }

    /// Soil data for a location, falling back to estimates on any failure.
    pub async fn measure(&self, location: &Location) -> SoilMeasurement {
        self.soil
            .fetch_or_estimate(location.latitude, location.longitude)
            .await
    }

    /// Full report for a resolved location. Soil errors never fail this.
    pub async fn analyze(&self, location: Location) -> SoilReport {
        let measurement = self.measure(&location).await;
        SoilReport::build(location, measurement, Utc::now().date_naive())
    }
}
