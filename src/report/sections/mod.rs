//! Report section modules, one per numbered section of the report.

pub mod s1_summary;
pub mod s2_amendments;
pub mod s3_crops;
pub mod s4_schedule;

use crate::report::SoilReport;

/// Title of section 4, naming the primary crop in upper case.
pub fn schedule_title(report: &SoilReport) -> String {
    let crop = report
        .recommended_crops
        .first()
        .map(|c| c.crop.to_uppercase())
        .unwrap_or_else(|| "CROPS".to_string());
    format!("4. PLANTING SCHEDULE FOR {}", crop)
}

/// Summary lines shared by the markdown and PDF renderers.
pub fn summary_lines(report: &SoilReport) -> Vec<String> {
    let s = &report.sample;
    vec![
        format!("pH Level: {:.1} ({})", s.ph, report.ph_category.label()),
        format!("Organic Carbon: {:.1}%", s.organic_carbon),
        format!("Nitrogen Content: {:.2} g/kg", s.nitrogen),
        format!("Soil Texture: {}", report.texture_label()),
        format!("  - Clay: {:.1}%", s.clay),
        format!("  - Sand: {:.1}%", s.sand),
        format!("  - Silt: {:.1}%", s.silt),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;

    #[test]
    fn test_summary_lines_format() {
        let lines = summary_lines(&sample_report("Nairobi"));
        assert_eq!(lines[0], "pH Level: 5.6 (Acidic)");
        assert_eq!(lines[1], "Organic Carbon: 1.4%");
        assert_eq!(lines[2], "Nitrogen Content: 0.80 g/kg");
        assert_eq!(lines[3], "Soil Texture: Loam");
        assert_eq!(lines[4], "  - Clay: 22.0%");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_schedule_title_uses_primary_crop() {
        let report = sample_report("Nairobi");
        let expected = format!("4. PLANTING SCHEDULE FOR {}", report.primary_crop.to_uppercase());
        assert_eq!(schedule_title(&report), expected);
    }

    #[test]
    fn test_schedule_title_without_crops() {
        let mut report = sample_report("Nairobi");
        report.recommended_crops.clear();
        assert_eq!(schedule_title(&report), "4. PLANTING SCHEDULE FOR CROPS");
    }
}
