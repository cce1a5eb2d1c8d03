//! S1: Soil Summary
//!
//! Topsoil (0-5 cm) properties, pH category, USDA texture class and where
//! the numbers came from.

use crate::report::SoilReport;

pub fn generate(report: &SoilReport) -> String {
    let s = &report.sample;
    let mut sections = Vec::new();
    sections.push("## 1. Soil Summary".to_string());

    if report.is_estimated() {
        sections.push(
            "> **Note**: The soil service could not be reached. Values below are \
             estimates and should be confirmed with a soil test."
                .to_string(),
        );
    }

    let mut table = Vec::new();
    table.push("| Property | Value |".to_string());
    table.push("|----------|-------|".to_string());
    table.push(format!("| pH Level | {:.1} ({}) |", s.ph, report.ph_category.label()));
    table.push(format!("| Organic Carbon | {:.1}% |", s.organic_carbon));
    table.push(format!("| Nitrogen Content | {:.2} g/kg |", s.nitrogen));
    table.push(format!("| Clay | {:.1}% |", s.clay));
    table.push(format!("| Sand | {:.1}% |", s.sand));
    table.push(format!("| Silt | {:.1}% |", s.silt));
    sections.push(table.join("\n"));

    match &report.texture {
        Some(t) => {
            sections.push(format!(
                "**Soil Texture**: {} (drainage: {}, water retention: {})",
                t.class_name,
                t.drainage.to_lowercase(),
                t.water_retention.to_lowercase()
            ));
            sections.push(format!("*{}*", t.advice));
        }
        None => sections.push("**Soil Texture**: Unknown".to_string()),
    }

    sections.push(format!("**Data Source**: {}", report.source.label()));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;
    use crate::soil::SoilSource;

    #[test]
    fn test_summary_contents() {
        let md = generate(&sample_report("Nairobi"));
        assert!(md.starts_with("## 1. Soil Summary"));
        assert!(md.contains("| pH Level | 5.6 (Acidic) |"));
        assert!(md.contains("| Nitrogen Content | 0.80 g/kg |"));
        assert!(md.contains("**Soil Texture**: Loam"));
        assert!(md.contains("SoilGrids 2.0"));
        assert!(!md.contains("**Note**"));
    }

    #[test]
    fn test_estimated_note() {
        let mut report = sample_report("Nairobi");
        report.source = SoilSource::Estimated;
        let md = generate(&report);
        assert!(md.contains("**Note**"));
        assert!(md.contains("Estimated"));
    }
}
