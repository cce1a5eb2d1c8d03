// Report Integration Tests
//
// Purpose: Offline pipeline from coordinates to markdown and PDF, using
// only the library core (no network, no features required)

use chrono::NaiveDate;
use soil_intel::recommendations::AmendmentKind;
use soil_intel::report::{markdown, report_filename};
use soil_intel::{export_pdf, Location, SoilMeasurement, SoilReport, SoilSample};

fn report_for(lat: f64, lon: f64, name: &str, measurement: SoilMeasurement) -> SoilReport {
    let location = Location::new(lat, lon, name).unwrap();
    SoilReport::build(location, measurement, NaiveDate::from_ymd_opt(2026, 5, 1).unwrap())
}

#[test]
fn test_measured_report_to_pdf() {
    let sample = SoilSample {
        ph: 8.0,
        organic_carbon: 3.1,
        nitrogen: 1.6,
        clay: 12.0,
        sand: 78.0,
        silt: 10.0,
    };
    let report = report_for(31.63, -8.0, "Marrakesh, Morocco", SoilMeasurement::measured(sample));

    let kinds: Vec<AmendmentKind> = report.amendments.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AmendmentKind::LowerPh, AmendmentKind::WaterRetention]);

    let export = export_pdf(&report).unwrap();
    assert!(export.bytes.starts_with(b"%PDF"));
    assert_eq!(export.filename, "soil-report-Marrakesh--Morocco.pdf");
    assert!(export.pages >= 1);
}

#[test]
fn test_estimated_reports_across_the_globe() {
    for (lat, lon) in [(-33.9, 18.4), (64.1, -21.9), (35.7, 139.7), (-54.8, -68.3), (0.0, 0.0)] {
        let report = report_for(lat, lon, "Somewhere", SoilMeasurement::estimated(lat, lon));
        assert!(report.is_estimated());
        assert!(!report.amendments.is_empty());
        assert_eq!(report.recommended_crops.len(), 3);
        assert_ne!(report.texture_label(), "Unknown");

        let md = markdown::render(&report);
        assert!(md.contains("Estimated"));

        let export = export_pdf(&report).unwrap();
        assert!(export.bytes.starts_with(b"%PDF"));
    }
}

#[test]
fn test_filename_only_safe_characters() {
    for name in ["Zürich, CH", "Ōsaka 大阪", "New York, NY 10001", "a/b\\c:d"] {
        let filename = report_filename(name);
        let stem = filename.strip_suffix(".pdf").unwrap();
        assert!(stem.starts_with("soil-report-"));
        assert!(
            stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'),
            "unsafe filename {}",
            filename
        );
    }
}
