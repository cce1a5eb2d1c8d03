//! Soil data model
//!
//! - `units.rs` - SoilGrids property names, response shape and unit divisors
//! - `fallback.rs` - Deterministic coordinate-seeded sample generator
//! - `texture.rs` - USDA texture triangle classification

pub mod fallback;
pub mod texture;
pub mod units;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SoilError};

pub use fallback::estimate;
pub use texture::{classify_sample, TextureClassification};
pub use units::{sample_from_response, SoilGridsResponse, SoilProperty};

/// Topsoil properties for one location.
///
/// Units: pH (H2O), organic carbon %, nitrogen g/kg, clay/sand/silt %.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub ph: f64,
    pub organic_carbon: f64,
    pub nitrogen: f64,
    pub clay: f64,
    pub sand: f64,
    pub silt: f64,
}

impl SoilSample {
    pub fn ph_category(&self) -> PhCategory {
        PhCategory::from_ph(self.ph)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhCategory {
    Acidic,
    Neutral,
    Alkaline,
}

impl PhCategory {
    pub fn from_ph(ph: f64) -> Self {
        if ph < 6.5 {
            PhCategory::Acidic
        } else if ph < 7.5 {
            PhCategory::Neutral
        } else {
            PhCategory::Alkaline
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhCategory::Acidic => "Acidic",
            PhCategory::Neutral => "Neutral",
            PhCategory::Alkaline => "Alkaline",
        }
    }
}

/// A resolved search location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, display_name: impl Into<String>) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(SoilError::InvalidCoordinates { lat: latitude, lon: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        })
    }

    /// Location taken from the user's own device position.
    pub fn current(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude, "Current Location")
    }

    /// Cache key rounded to ~10 m so repeated lookups of the same spot hit.
    pub fn coordinate_key(&self) -> String {
        format!("{:.4}:{:.4}", self.latitude, self.longitude)
    }
}

/// Parse free text of the form `"<lat>, <lon>"` (comma or whitespace separated).
pub fn parse_coordinates(text: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 2 {
        return None;
    }
    let lat: f64 = parts[0].parse().ok()?;
    let lon: f64 = parts[1].parse().ok()?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    Some((lat, lon))
}

/// Where a sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilSource {
    SoilGrids,
    Estimated,
}

impl SoilSource {
    pub fn label(&self) -> &'static str {
        match self {
            SoilSource::SoilGrids => "SoilGrids 2.0 (ISRIC)",
            SoilSource::Estimated => "Estimated (soil service unavailable)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilMeasurement {
    pub sample: SoilSample,
    pub source: SoilSource,
}

impl SoilMeasurement {
    pub fn measured(sample: SoilSample) -> Self {
        Self { sample, source: SoilSource::SoilGrids }
    }

    pub fn estimated(latitude: f64, longitude: f64) -> Self {
        Self {
            sample: fallback::estimate(latitude, longitude),
            source: SoilSource::Estimated,
        }
    }

    pub fn is_estimated(&self) -> bool {
        self.source == SoilSource::Estimated
    }
}
