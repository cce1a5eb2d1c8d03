//! Soil amendment rules
//!
//! Independent threshold checks, evaluated in a fixed order:
//! - pH: < 6.0 lime, > 7.5 sulfur
//! - Organic carbon: < 2.0 % compost/manure
//! - Nitrogen: < 1.0 g/kg nitrogen fertilizer
//! - Texture: clay > 50 % drainage, else sand > 70 % water retention
//!
//! When nothing fires a single "no amendments" entry is returned, so the
//! list is never empty.

use serde::Serialize;

use crate::soil::SoilSample;

pub const LIME_BELOW_PH: f64 = 6.0;
pub const SULFUR_ABOVE_PH: f64 = 7.5;
pub const MIN_ORGANIC_CARBON: f64 = 2.0;
pub const MIN_NITROGEN: f64 = 1.0;
pub const MAX_CLAY: f64 = 50.0;
pub const MAX_SAND: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentKind {
    RaisePh,
    LowerPh,
    OrganicMatter,
    Nitrogen,
    Drainage,
    WaterRetention,
    NoneNeeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amendment {
    pub kind: AmendmentKind,
    pub action: &'static str,
}

impl Amendment {
    fn new(kind: AmendmentKind) -> Self {
        let action = match kind {
            AmendmentKind::RaisePh => "Add agricultural lime (2-3 tons/acre) to raise pH",
            AmendmentKind::LowerPh => "Add elemental sulfur (300-500 lbs/acre) to lower pH",
            AmendmentKind::OrganicMatter => {
                "Incorporate compost or well-rotted manure (5-10 tons/acre)"
            }
            AmendmentKind::Nitrogen => {
                "Apply nitrogen-rich fertilizer (e.g., urea 46-0-0) at 100-150 lbs/acre"
            }
            AmendmentKind::Drainage => "Add coarse sand or gypsum to improve drainage",
            AmendmentKind::WaterRetention => "Add organic matter to improve water retention",
            AmendmentKind::NoneNeeded => "No major amendments needed - soil is in good condition",
        };
        Self { kind, action }
    }
}

pub fn amendments(sample: &SoilSample) -> Vec<Amendment> {
    let mut result = Vec::new();

    if sample.ph < LIME_BELOW_PH {
        result.push(Amendment::new(AmendmentKind::RaisePh));
    } else if sample.ph > SULFUR_ABOVE_PH {
        result.push(Amendment::new(AmendmentKind::LowerPh));
    }

    if sample.organic_carbon < MIN_ORGANIC_CARBON {
        result.push(Amendment::new(AmendmentKind::OrganicMatter));
    }

    if sample.nitrogen < MIN_NITROGEN {
        result.push(Amendment::new(AmendmentKind::Nitrogen));
    }

    if sample.clay > MAX_CLAY {
        result.push(Amendment::new(AmendmentKind::Drainage));
    } else if sample.sand > MAX_SAND {
        result.push(Amendment::new(AmendmentKind::WaterRetention));
    }

    if result.is_empty() {
        result.push(Amendment::new(AmendmentKind::NoneNeeded));
    }

    result
}
