//! Markdown report generator
//!
//! Orchestrates sections S1-S4 into one document. Used by the CLI
//! (`--markdown`), `/api/report/markdown` and the HTML report page.

use crate::report::sections::{s1_summary, s2_amendments, s3_crops, s4_schedule};
use crate::report::SoilReport;

pub fn render(report: &SoilReport) -> String {
    let sections = vec![
        generate_header(report),
        s1_summary::generate(report),
        s2_amendments::generate(report),
        s3_crops::generate(report),
        s4_schedule::generate(report),
        generate_footer(),
    ];

    sections.join("\n\n---\n\n")
}

fn generate_header(report: &SoilReport) -> String {
    let loc = &report.location;
    format!(
        "# Soil Analysis Report\n\n\
         **Location**: {}  \n\
         **Coordinates**: {:.4}, {:.4}  \n\
         **Generated**: {}",
        loc.display_name,
        loc.latitude,
        loc.longitude,
        report.generated_on.format("%Y-%m-%d")
    )
}

fn generate_footer() -> String {
    r#"## Data Sources

- **Geocoding**: OpenStreetMap Nominatim
- **Soil Properties**: ISRIC SoilGrids 2.0 (0-5 cm depth)
- **Texture**: USDA soil texture triangle

*Report generated by SoilIntel*"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;

    #[test]
    fn test_render_has_all_sections() {
        let md = render(&sample_report("Nairobi, Kenya"));
        assert!(md.starts_with("# Soil Analysis Report"));
        assert!(md.contains("**Location**: Nairobi, Kenya"));
        assert!(md.contains("**Generated**: 2026-03-14"));
        assert!(md.contains("## 1. Soil Summary"));
        assert!(md.contains("## 2. Recommended Soil Amendments"));
        assert!(md.contains("## 3. Recommended Crops"));
        assert!(md.contains("## 4. PLANTING SCHEDULE FOR"));
        assert!(md.contains("Data Sources"));
    }

    #[test]
    fn test_sections_separated() {
        let md = render(&sample_report("Nairobi"));
        assert_eq!(md.matches("\n\n---\n\n").count(), 5);
    }
}
