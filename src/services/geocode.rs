//! Nominatim forward geocoding
//!
//! `GET <base>?format=json&q=<query>` returns an array of matches; the first
//! one wins. Nominatim sends `lat`/`lon` as strings.

use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{Result, SoilError};
use crate::soil::{parse_coordinates, Location};

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SoilError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.nominatim_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve free text to a location. `"<lat>, <lon>"` is taken literally.
    pub async fn geocode(&self, query: &str) -> Result<Location> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SoilError::EmptyQuery);
        }

        if let Some((lat, lon)) = parse_coordinates(query) {
            tracing::debug!(lat, lon, "Query parsed as coordinates");
            return Location::new(lat, lon, format!("{:.4}, {:.4}", lat, lon));
        }

        let url = format!(
            "{}?format=json&q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        tracing::debug!(%url, "Geocoding");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SoilError::Http(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SoilError::UpstreamStatus {
                status: response.status().as_u16(),
                url: self.base_url.clone(),
            });
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| SoilError::Decode(format!("Geocoding response: {}", e)))?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| SoilError::LocationNotFound(query.to_string()))?;

        let lat: f64 = place
            .lat
            .parse()
            .map_err(|_| SoilError::Decode(format!("Invalid latitude '{}'", place.lat)))?;
        let lon: f64 = place
            .lon
            .parse()
            .map_err(|_| SoilError::Decode(format!("Invalid longitude '{}'", place.lon)))?;

        tracing::info!(query, lat, lon, name = %place.display_name, "Geocoded location");
        Location::new(lat, lon, place.display_name)
    }
}
