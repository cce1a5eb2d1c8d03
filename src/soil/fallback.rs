//! Deterministic fallback soil sample
//!
//! Produces a plausible `SoilSample` from coordinates alone, used when the
//! soil service fails. The same (lat, lon) always yields the same sample.
//!
//! Seed: `sin(lat * 12.9898 + lon * 78.233) * 43758.5453`.
//! Each field: `fract(sin(seed + offset) * 10000)` scaled into its range.
//! Silt is the remainder of clay + sand clamped to [5, 60], so the three
//! fractions only approximately sum to 100.

use super::SoilSample;

pub const PH_RANGE: (f64, f64) = (4.5, 8.5);
pub const ORGANIC_CARBON_RANGE: (f64, f64) = (0.5, 5.0);
pub const NITROGEN_RANGE: (f64, f64) = (0.2, 3.0);
pub const CLAY_RANGE: (f64, f64) = (5.0, 55.0);
pub const SAND_RANGE: (f64, f64) = (10.0, 75.0);
pub const SILT_RANGE: (f64, f64) = (5.0, 60.0);

// Per-field offsets into the pseudo-random sequence.
const PH_OFFSET: f64 = 1.0;
const ORGANIC_CARBON_OFFSET: f64 = 2.0;
const NITROGEN_OFFSET: f64 = 3.0;
const CLAY_OFFSET: f64 = 4.0;
const SAND_OFFSET: f64 = 5.0;

fn coordinate_seed(latitude: f64, longitude: f64) -> f64 {
    libm::sin(latitude * 12.9898 + longitude * 78.233) * 43_758.5453
}

/// Pseudo-random value in [0, 1).
fn unit_value(seed: f64, offset: f64) -> f64 {
    let v = libm::sin(seed + offset) * 10_000.0;
    v - libm::floor(v)
}

fn in_range(seed: f64, offset: f64, (lo, hi): (f64, f64)) -> f64 {
    round2(lo + unit_value(seed, offset) * (hi - lo)).min(hi)
}

fn round2(value: f64) -> f64 {
    libm::round(value * 100.0) / 100.0
}

/// Estimate a topsoil sample for a coordinate without any network access.
pub fn estimate(latitude: f64, longitude: f64) -> SoilSample {
    let seed = coordinate_seed(latitude, longitude);

    let clay = in_range(seed, CLAY_OFFSET, CLAY_RANGE);
    let sand = in_range(seed, SAND_OFFSET, SAND_RANGE);
    let silt = round2((100.0 - clay - sand).clamp(SILT_RANGE.0, SILT_RANGE.1));

    SoilSample {
        ph: in_range(seed, PH_OFFSET, PH_RANGE),
        organic_carbon: in_range(seed, ORGANIC_CARBON_OFFSET, ORGANIC_CARBON_RANGE),
        nitrogen: in_range(seed, NITROGEN_OFFSET, NITROGEN_RANGE),
        clay,
        sand,
        silt,
    }
}
