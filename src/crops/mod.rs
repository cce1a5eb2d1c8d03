//! Crop reference profiles
//!
//! Ideal topsoil conditions per crop, crop ranking against a sample, and the
//! actual-vs-ideal comparison used by the radar chart.

use serde::Serialize;

use crate::soil::SoilSample;

/// Ideal topsoil values for a crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropProfile {
    pub name: &'static str,
    pub ph: f64,
    pub organic_carbon: f64,
    pub nitrogen: f64,
    pub clay: f64,
    pub sand: f64,
    pub silt: f64,
}

impl CropProfile {
    pub fn as_sample(&self) -> SoilSample {
        SoilSample {
            ph: self.ph,
            organic_carbon: self.organic_carbon,
            nitrogen: self.nitrogen,
            clay: self.clay,
            sand: self.sand,
            silt: self.silt,
        }
    }
}

const fn profile(
    name: &'static str,
    ph: f64,
    organic_carbon: f64,
    nitrogen: f64,
    clay: f64,
    sand: f64,
    silt: f64,
) -> CropProfile {
    CropProfile { name, ph, organic_carbon, nitrogen, clay, sand, silt }
}

pub static CROP_PROFILES: &[CropProfile] = &[
    profile("Rice", 6.5, 2.5, 1.5, 45.0, 30.0, 25.0),
    profile("Wheat", 6.8, 2.0, 1.2, 35.0, 35.0, 30.0),
    profile("Corn", 6.5, 3.0, 1.8, 30.0, 40.0, 30.0),
    profile("Tomatoes", 6.5, 3.5, 2.0, 25.0, 45.0, 30.0),
    profile("Potatoes", 5.5, 2.5, 1.5, 20.0, 60.0, 20.0),
    profile("Blueberries", 5.0, 4.0, 1.5, 15.0, 65.0, 20.0),
    profile("Carrots", 6.0, 2.0, 1.0, 20.0, 60.0, 20.0),
    profile("Soybeans", 6.5, 2.5, 1.3, 35.0, 35.0, 30.0),
];

pub static DEFAULT_PROFILE: CropProfile = profile("default", 6.5, 2.5, 1.5, 30.0, 40.0, 30.0);

/// Ideal conditions for a crop by exact name, or the default profile.
pub fn ideal_conditions(crop: &str) -> &'static CropProfile {
    CROP_PROFILES
        .iter()
        .find(|p| p.name == crop)
        .unwrap_or(&DEFAULT_PROFILE)
}

// ============================================================================
// Chart metrics
// ============================================================================

/// A chart axis and the value that maps to 100 on it.
#[derive(Debug, Clone, Copy)]
pub struct Metric {
    pub label: &'static str,
    pub scale_max: f64,
    value: fn(&SoilSample) -> f64,
}

impl Metric {
    pub fn value(&self, sample: &SoilSample) -> f64 {
        (self.value)(sample)
    }

    /// Value on a 0-100 scale.
    pub fn normalize(&self, sample: &SoilSample) -> f64 {
        self.value(sample) / self.scale_max * 100.0
    }
}

pub static METRICS: [Metric; 6] = [
    Metric { label: "pH", scale_max: 14.0, value: |s: &SoilSample| s.ph },
    Metric { label: "Organic C (%)", scale_max: 5.0, value: |s: &SoilSample| s.organic_carbon },
    Metric { label: "Nitrogen", scale_max: 3.0, value: |s: &SoilSample| s.nitrogen },
    Metric { label: "Clay (%)", scale_max: 100.0, value: |s: &SoilSample| s.clay },
    Metric { label: "Sand (%)", scale_max: 100.0, value: |s: &SoilSample| s.sand },
    Metric { label: "Silt (%)", scale_max: 100.0, value: |s: &SoilSample| s.silt },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub metric: &'static str,
    pub actual: f64,
    pub ideal: f64,
}

/// Actual vs ideal values for one crop, each on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub crop: String,
    pub points: Vec<ChartPoint>,
}

pub fn comparison_chart(sample: &SoilSample, crop: &str) -> ComparisonChart {
    let ideal = ideal_conditions(crop).as_sample();
    let points = METRICS
        .iter()
        .map(|m| ChartPoint {
            metric: m.label,
            actual: m.normalize(sample),
            ideal: m.normalize(&ideal),
        })
        .collect();

    ComparisonChart {
        crop: crop.to_string(),
        points,
    }
}

// ============================================================================
// Crop ranking
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropMatch {
    pub crop: &'static str,
    /// 0-100, higher is a closer match
    pub score: f64,
}

/// How closely a sample matches a crop profile (0-100).
pub fn match_score(sample: &SoilSample, profile: &CropProfile) -> f64 {
    let ideal = profile.as_sample();
    let mean_gap = METRICS
        .iter()
        .map(|m| (m.value(sample) - m.value(&ideal)).abs() / m.scale_max)
        .sum::<f64>()
        / METRICS.len() as f64;

    (100.0 * (1.0 - mean_gap)).clamp(0.0, 100.0)
}

/// Best-matching crops, highest score first. Ties keep table order.
pub fn recommend_crops(sample: &SoilSample, limit: usize) -> Vec<CropMatch> {
    let mut matches: Vec<CropMatch> = CROP_PROFILES
        .iter()
        .map(|p| CropMatch {
            crop: p.name,
            score: match_score(sample, p),
        })
        .collect();

    // stable sort: equal scores stay in table order
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(limit);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ideal_lookup_exact_match() {
        assert_eq!(ideal_conditions("Wheat").ph, 6.8);
        assert_eq!(ideal_conditions("Blueberries").sand, 65.0);
    }

    #[test]
    fn test_ideal_lookup_falls_back() {
        assert_eq!(ideal_conditions("wheat").name, "default");
        assert_eq!(ideal_conditions("Mango").name, "default");
    }

    #[test]
    fn test_chart_normalisation() {
        let sample = SoilSample {
            ph: 7.0,
            organic_carbon: 2.5,
            nitrogen: 1.5,
            clay: 30.0,
            sand: 40.0,
            silt: 30.0,
        };
        let chart = comparison_chart(&sample, "Corn");
        assert_eq!(chart.points.len(), 6);
        assert_relative_eq!(chart.points[0].actual, 50.0, epsilon = 1e-9);
        assert_relative_eq!(chart.points[1].actual, 50.0, epsilon = 1e-9);
        assert_relative_eq!(chart.points[2].actual, 50.0, epsilon = 1e-9);
        assert_relative_eq!(chart.points[2].ideal, 60.0, epsilon = 1e-9);
        assert_relative_eq!(chart.points[3].ideal, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_perfect_match_scores_100() {
        let potatoes = ideal_conditions("Potatoes");
        assert_relative_eq!(match_score(&potatoes.as_sample(), potatoes), 100.0);
    }

    #[test]
    fn test_recommend_puts_exact_profile_first() {
        let sample = ideal_conditions("Blueberries").as_sample();
        let crops = recommend_crops(&sample, 3);
        assert_eq!(crops.len(), 3);
        assert_eq!(crops[0].crop, "Blueberries");
        assert!(crops[0].score >= crops[1].score);
        assert!(crops[1].score >= crops[2].score);
    }

    #[test]
    fn test_recommend_limit() {
        let sample = DEFAULT_PROFILE.as_sample();
        assert!(recommend_crops(&sample, 0).is_empty());
        assert_eq!(recommend_crops(&sample, 20).len(), CROP_PROFILES.len());
    }
}
