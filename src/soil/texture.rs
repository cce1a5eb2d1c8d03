//! USDA Soil Texture Classification
//!
//! Point-in-polygon (ray casting) on the USDA texture triangle, using the
//! Cartesian projection x = 0.5 * clay + silt, y = clay.
//! Polygons follow the ggsoiltexture R package (usda_polygons.csv).

use serde::Serialize;

use super::SoilSample;

/// A USDA texture class: polygon corners as (clay %, sand %), silt implied.
pub struct TextureClass {
    pub name: &'static str,
    pub corners: &'static [(f64, f64)],
    pub drainage: &'static str,
    pub water_retention: &'static str,
    pub advice: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureClassification {
    pub class_name: &'static str,
    pub clay: f64,
    pub sand: f64,
    pub silt: f64,
    pub drainage: &'static str,
    pub water_retention: &'static str,
    pub advice: &'static str,
}

// ============================================================================
// USDA classes, checked in order
// ============================================================================

pub static USDA_TEXTURE_CLASSES: &[TextureClass] = &[
    TextureClass {
        name: "Sand",
        corners: &[(10.0, 90.0), (0.0, 100.0), (0.0, 85.0)],
        drainage: "Excellent",
        water_retention: "Very poor",
        advice: "Add organic matter; water frequently; nutrients leach quickly",
    },
    TextureClass {
        name: "Loamy Sand",
        corners: &[(15.0, 85.0), (10.0, 90.0), (0.0, 85.0), (0.0, 70.0)],
        drainage: "Very good",
        water_retention: "Poor",
        advice: "Light soil; frequent watering; heavy feeders need extra fertility",
    },
    TextureClass {
        name: "Sandy Loam",
        corners: &[
            (20.0, 80.0), (15.0, 85.0), (0.0, 70.0), (0.0, 50.0),
            (5.0, 45.0), (5.0, 52.5), (20.0, 52.5),
        ],
        drainage: "Good",
        water_retention: "Fair",
        advice: "Good general-purpose soil; most crops do well",
    },
    TextureClass {
        name: "Loam",
        corners: &[(27.5, 45.0), (20.0, 52.5), (5.0, 52.5), (5.0, 45.0), (27.5, 22.5)],
        drainage: "Good",
        water_retention: "Good",
        advice: "Balanced drainage and retention; suits most crops",
    },
    TextureClass {
        name: "Silt Loam",
        corners: &[
            (27.5, 22.5), (0.0, 50.0), (0.0, 20.0),
            (12.5, 7.5), (12.5, 0.0), (27.5, 0.0),
        ],
        drainage: "Moderate",
        water_retention: "Good",
        advice: "Fertile; compacts when worked wet",
    },
    TextureClass {
        name: "Silt",
        corners: &[(12.5, 7.5), (0.0, 20.0), (0.0, 0.0), (12.5, 0.0)],
        drainage: "Poor",
        water_retention: "Very good",
        advice: "Crusts and compacts easily; build structure with organic matter",
    },
    TextureClass {
        name: "Sandy Clay Loam",
        corners: &[(35.0, 65.0), (20.0, 80.0), (20.0, 52.5), (27.5, 45.0), (35.0, 45.0)],
        drainage: "Moderate",
        water_retention: "Moderate",
        advice: "Variable drainage; responds well to organic amendments",
    },
    TextureClass {
        name: "Clay Loam",
        corners: &[(40.0, 45.0), (27.5, 45.0), (27.5, 20.0), (40.0, 20.0)],
        drainage: "Slow",
        water_retention: "High",
        advice: "Heavy but fertile; open it up with grit or organic matter",
    },
    TextureClass {
        name: "Silty Clay Loam",
        corners: &[(40.0, 20.0), (27.5, 20.0), (27.5, 0.0), (40.0, 0.0)],
        drainage: "Slow",
        water_retention: "High",
        advice: "Fertile but heavy; avoid waterlogging",
    },
    TextureClass {
        name: "Sandy Clay",
        corners: &[(55.0, 45.0), (35.0, 65.0), (35.0, 45.0)],
        drainage: "Poor",
        water_retention: "High",
        advice: "Prone to waterlogging; amend heavily with organic matter",
    },
    TextureClass {
        name: "Silty Clay",
        corners: &[(60.0, 0.0), (40.0, 20.0), (40.0, 0.0)],
        drainage: "Very poor",
        water_retention: "Very high",
        advice: "Very heavy; consider raised beds",
    },
    TextureClass {
        name: "Clay",
        corners: &[(100.0, 0.0), (55.0, 45.0), (40.0, 45.0), (40.0, 20.0), (60.0, 0.0)],
        drainage: "Very poor",
        water_retention: "Very high",
        advice: "Cracks when dry; needs significant amendment for most crops",
    },
];

fn to_cartesian(clay: f64, sand: f64) -> (f64, f64) {
    let silt = 100.0 - clay - sand;
    (0.5 * clay + silt, clay)
}

fn contains(corners: &[(f64, f64)], x: f64, y: f64) -> bool {
    if corners.len() < 3 {
        return false;
    }

    let points: Vec<(f64, f64)> = corners.iter().map(|&(c, s)| to_cartesian(c, s)).collect();
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn find_class(name: &str) -> Option<&'static TextureClass> {
    USDA_TEXTURE_CLASSES.iter().find(|c| c.name == name)
}

fn build(class: &'static TextureClass, clay: f64, sand: f64, silt: f64) -> TextureClassification {
    TextureClassification {
        class_name: class.name,
        clay,
        sand,
        silt,
        drainage: class.drainage,
        water_retention: class.water_retention,
        advice: class.advice,
    }
}

/// Classify clay/sand/silt percentages. Returns None unless they sum to ~100.
pub fn classify_texture(clay: f64, sand: f64, silt: f64) -> Option<TextureClassification> {
    if (clay + sand + silt - 100.0).abs() > 1.0 || clay < 0.0 || sand < 0.0 || silt < 0.0 {
        return None;
    }

    let (x, y) = to_cartesian(clay, sand);
    if let Some(class) = USDA_TEXTURE_CLASSES.iter().find(|c| contains(c.corners, x, y)) {
        return Some(build(class, clay, sand, silt));
    }

    // On a polygon edge: use the dominant component
    let name = if clay > 40.0 {
        "Clay"
    } else if sand > 70.0 {
        if sand > 85.0 { "Sand" } else { "Loamy Sand" }
    } else if silt > 70.0 {
        if silt > 80.0 { "Silt" } else { "Silt Loam" }
    } else {
        "Loam"
    };
    find_class(name).map(|class| build(class, clay, sand, silt))
}

/// Classify a sample after scaling its three fractions to sum to 100.
pub fn classify_sample(sample: &SoilSample) -> Option<TextureClassification> {
    let clay = sample.clay.max(0.0);
    let sand = sample.sand.max(0.0);
    let silt = sample.silt.max(0.0);
    let total = clay + sand + silt;
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let scale = 100.0 / total;
    classify_texture(clay * scale, sand * scale, silt * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::fallback::estimate;

    fn sample(clay: f64, sand: f64, silt: f64) -> SoilSample {
        SoilSample { ph: 6.5, organic_carbon: 2.0, nitrogen: 1.0, clay, sand, silt }
    }

    #[test]
    fn test_sand() {
        assert_eq!(classify_texture(5.0, 92.0, 3.0).unwrap().class_name, "Sand");
    }

    #[test]
    fn test_loam() {
        assert_eq!(classify_texture(20.0, 40.0, 40.0).unwrap().class_name, "Loam");
    }

    #[test]
    fn test_clay() {
        let t = classify_texture(60.0, 20.0, 20.0).unwrap();
        assert_eq!(t.class_name, "Clay");
        assert_eq!(t.drainage, "Very poor");
    }

    #[test]
    fn test_silt_loam() {
        assert_eq!(classify_texture(15.0, 20.0, 65.0).unwrap().class_name, "Silt Loam");
    }

    #[test]
    fn test_invalid_sum() {
        assert!(classify_texture(30.0, 30.0, 30.0).is_none());
    }

    #[test]
    fn test_sample_is_normalised() {
        // 20/40/30 sums to 90; scaled to 22.2/44.4/33.3 -> Loam
        let t = classify_sample(&sample(20.0, 40.0, 30.0)).unwrap();
        assert_eq!(t.class_name, "Loam");
        assert!((t.clay + t.sand + t.silt - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_sample_is_unknown() {
        assert!(classify_sample(&sample(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_every_estimate_gets_a_class() {
        for lat in (-80..=80).step_by(10) {
            for lon in (-170..=170).step_by(20) {
                let s = estimate(lat as f64, lon as f64);
                assert!(classify_sample(&s).is_some(), "no class at {},{}", lat, lon);
            }
        }
    }
}
