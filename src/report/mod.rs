//! Soil report assembly
//!
//! `SoilReport` bundles everything derived from one measurement. It is the
//! single input for every output format:
//! - `markdown.rs` + `sections/` - markdown document (CLI, web page body)
//! - `chart.rs` - SVG radar chart (actual vs ideal)
//! - `pdf.rs` - downloadable PDF

pub mod chart;
pub mod markdown;
pub mod pdf;
pub mod sections;

use chrono::NaiveDate;
use serde::Serialize;

use crate::crops::{comparison_chart, recommend_crops, ComparisonChart, CropMatch};
use crate::recommendations::{
    amendments, planting_schedule, Amendment, PlantingSchedule, GENERAL_CROPS,
};
use crate::soil::{
    classify_sample, Location, PhCategory, SoilMeasurement, SoilSample, SoilSource,
    TextureClassification,
};

pub use pdf::{export_pdf, report_filename, PdfExport};

pub const RECOMMENDED_CROP_COUNT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct SoilReport {
    pub location: Location,
    pub sample: SoilSample,
    pub source: SoilSource,
    pub ph_category: PhCategory,
    pub texture: Option<TextureClassification>,
    pub amendments: Vec<Amendment>,
    pub recommended_crops: Vec<CropMatch>,
    /// First recommended crop, or "General Crops"
    pub primary_crop: String,
    pub schedule: PlantingSchedule,
    pub comparison: ComparisonChart,
    pub generated_on: NaiveDate,
}

impl SoilReport {
    pub fn build(
        location: Location,
        measurement: SoilMeasurement,
        generated_on: NaiveDate,
    ) -> Self {
        let sample = measurement.sample;
        let recommended_crops = recommend_crops(&sample, RECOMMENDED_CROP_COUNT);
        let primary_crop = recommended_crops
            .first()
            .map(|c| c.crop.to_string())
            .unwrap_or_else(|| GENERAL_CROPS.to_string());

        tracing::debug!(
            location = %location.display_name,
            source = ?measurement.source,
            primary_crop = %primary_crop,
            "Built soil report"
        );

        Self {
            sample,
            source: measurement.source,
            ph_category: sample.ph_category(),
            texture: classify_sample(&sample),
            amendments: amendments(&sample),
            schedule: planting_schedule(&primary_crop),
            comparison: comparison_chart(&sample, &primary_crop),
            recommended_crops,
            primary_crop,
            location,
            generated_on,
        }
    }

    pub fn texture_label(&self) -> &'static str {
        self.texture.as_ref().map(|t| t.class_name).unwrap_or("Unknown")
    }

    pub fn is_estimated(&self) -> bool {
        self.source == SoilSource::Estimated
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn sample_report(name: &str) -> SoilReport {
        let location = Location::new(-1.2921, 36.8219, name).unwrap();
        let measurement = SoilMeasurement::measured(SoilSample {
            ph: 5.6,
            organic_carbon: 1.4,
            nitrogen: 0.8,
            clay: 22.0,
            sand: 42.0,
            silt: 36.0,
        });
        SoilReport::build(location, measurement, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample_report;
    use super::*;
    use crate::recommendations::AmendmentKind;

    #[test]
    fn test_build_collects_everything() {
        let report = sample_report("Nairobi, Kenya");
        assert_eq!(report.ph_category, PhCategory::Acidic);
        assert_eq!(report.recommended_crops.len(), RECOMMENDED_CROP_COUNT);
        assert_eq!(report.primary_crop, report.recommended_crops[0].crop);
        assert_eq!(report.schedule.crop, report.primary_crop);
        assert_eq!(report.comparison.crop, report.primary_crop);
        assert_eq!(report.texture_label(), "Loam");
        assert!(!report.is_estimated());

        let kinds: Vec<AmendmentKind> = report.amendments.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AmendmentKind::RaisePh, AmendmentKind::OrganicMatter, AmendmentKind::Nitrogen]
        );
    }

    #[test]
    fn test_estimated_report() {
        let location = Location::current(48.85, 2.35).unwrap();
        let report = SoilReport::build(
            location,
            SoilMeasurement::estimated(48.85, 2.35),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert!(report.is_estimated());
        assert!(!report.amendments.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(sample_report("Nairobi")).unwrap();
        assert_eq!(json["source"], "soil_grids");
        assert_eq!(json["location"]["display_name"], "Nairobi");
        assert!(json["amendments"].is_array());
        assert_eq!(json["generated_on"], "2026-03-14");
    }
}
