//! SoilGrids v2.0 property query: response shape and unit conversion
//!
//! SoilGrids stores values as scaled integers ("mapped units"). The divisors
//! below turn them into the conventional units used by `SoilSample`:
//!
//! | Property   | Mapped unit | Divisor | Result  |
//! |------------|-------------|---------|---------|
//! | `phh2o`    | pH × 10     | 10      | pH      |
//! | `soc`      | dg/kg       | 10      | g/kg, reported as % |
//! | `nitrogen` | cg/kg       | 100     | g/kg    |
//! | `clay`     | g/kg        | 10      | %       |
//! | `sand`     | g/kg        | 10      | %       |
//! | `silt`     | g/kg        | 10      | %       |

use serde::Deserialize;

use super::SoilSample;
use crate::error::{Result, SoilError};

/// Topsoil depth interval requested from SoilGrids.
pub const TOPSOIL_DEPTH: &str = "0-5cm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilProperty {
    PhH2o,
    Soc,
    Nitrogen,
    Clay,
    Sand,
    Silt,
}

impl SoilProperty {
    pub const ALL: [SoilProperty; 6] = [
        SoilProperty::PhH2o,
        SoilProperty::Soc,
        SoilProperty::Nitrogen,
        SoilProperty::Clay,
        SoilProperty::Sand,
        SoilProperty::Silt,
    ];

    /// Layer name used by the SoilGrids API.
    pub fn api_name(self) -> &'static str {
        match self {
            SoilProperty::PhH2o => "phh2o",
            SoilProperty::Soc => "soc",
            SoilProperty::Nitrogen => "nitrogen",
            SoilProperty::Clay => "clay",
            SoilProperty::Sand => "sand",
            SoilProperty::Silt => "silt",
        }
    }

    pub fn divisor(self) -> f64 {
        match self {
            SoilProperty::Nitrogen => 100.0,
            _ => 10.0,
        }
    }

    pub fn convert(self, raw: f64) -> f64 {
        raw / self.divisor()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoilGridsResponse {
    pub properties: SoilGridsProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoilGridsProperties {
    #[serde(default)]
    pub layers: Vec<SoilGridsLayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoilGridsLayer {
    pub name: String,
    #[serde(default)]
    pub depths: Vec<SoilGridsDepth>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoilGridsDepth {
    pub values: SoilGridsValues,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoilGridsValues {
    /// Null over water bodies and outside the modelled area.
    pub mean: Option<f64>,
}

impl SoilGridsResponse {
    /// Raw mean of the first depth for a property, if present.
    pub fn raw_mean(&self, property: SoilProperty) -> Option<f64> {
        self.properties
            .layers
            .iter()
            .find(|layer| layer.name == property.api_name())
            .and_then(|layer| layer.depths.first())
            .and_then(|depth| depth.values.mean)
    }
}

/// Convert a SoilGrids response into a `SoilSample`.
///
/// A missing layer or null mean contributes 0. A response with no values at
/// all is `SoilError::EmptySoilData`.
pub fn sample_from_response(response: &SoilGridsResponse) -> Result<SoilSample> {
    let values = SoilProperty::ALL.map(|p| response.raw_mean(p).map(|raw| p.convert(raw)));

    if values.iter().all(Option::is_none) {
        return Err(SoilError::EmptySoilData);
    }

    let [ph, organic_carbon, nitrogen, clay, sand, silt] = values.map(|v| v.unwrap_or(0.0));
    Ok(SoilSample {
        ph,
        organic_carbon,
        nitrogen,
        clay,
        sand,
        silt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn response(json: &str) -> SoilGridsResponse {
        serde_json::from_str(json).unwrap()
    }

    const FULL: &str = r#"{
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [36.82, -1.29]},
        "properties": {"layers": [
            {"name": "phh2o", "unit_measure": {"d_factor": 10},
             "depths": [{"label": "0-5cm", "values": {"mean": 65}}]},
            {"name": "soc", "depths": [{"label": "0-5cm", "values": {"mean": 152}}]},
            {"name": "nitrogen", "depths": [{"label": "0-5cm", "values": {"mean": 180}}]},
            {"name": "clay", "depths": [{"label": "0-5cm", "values": {"mean": 250}}]},
            {"name": "sand", "depths": [{"label": "0-5cm", "values": {"mean": 400}}]},
            {"name": "silt", "depths": [{"label": "0-5cm", "values": {"mean": 350}}]}
        ]}
    }"#;

    #[test]
    fn test_divisors() {
        let sample = sample_from_response(&response(FULL)).unwrap();
        assert_relative_eq!(sample.ph, 6.5);
        assert_relative_eq!(sample.organic_carbon, 15.2);
        assert_relative_eq!(sample.nitrogen, 1.8);
        assert_relative_eq!(sample.clay, 25.0);
        assert_relative_eq!(sample.sand, 40.0);
        assert_relative_eq!(sample.silt, 35.0);
    }

    #[test]
    fn test_ph_raw_times_ten() {
        assert_relative_eq!(SoilProperty::PhH2o.convert(72.0), 7.2);
        assert_relative_eq!(SoilProperty::Nitrogen.convert(250.0), 2.5);
    }

    #[test]
    fn test_missing_layer_is_zero() {
        let json = r#"{"properties": {"layers": [
            {"name": "phh2o", "depths": [{"values": {"mean": 58}}]},
            {"name": "clay", "depths": []}
        ]}}"#;
        let sample = sample_from_response(&response(json)).unwrap();
        assert_relative_eq!(sample.ph, 5.8);
        assert_eq!(sample.clay, 0.0);
        assert_eq!(sample.sand, 0.0);
    }

    #[test]
    fn test_all_null_is_empty() {
        let json = r#"{"properties": {"layers": [
            {"name": "phh2o", "depths": [{"values": {"mean": null}}]},
            {"name": "soc", "depths": [{"values": {"mean": null}}]}
        ]}}"#;
        assert!(matches!(
            sample_from_response(&response(json)),
            Err(SoilError::EmptySoilData)
        ));

        let no_layers = r#"{"properties": {"layers": []}}"#;
        assert!(sample_from_response(&response(no_layers)).is_err());
    }

    #[test]
    fn test_api_names() {
        let names: Vec<&str> = SoilProperty::ALL.iter().map(|p| p.api_name()).collect();
        assert_eq!(names, vec!["phh2o", "soc", "nitrogen", "clay", "sand", "silt"]);
    }
}
