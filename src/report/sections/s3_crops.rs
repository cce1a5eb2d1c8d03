//! S3: Recommended Crops
//!
//! Ranked by closeness to each crop's ideal soil profile.

use crate::report::SoilReport;

pub fn generate(report: &SoilReport) -> String {
    let mut sections = Vec::new();
    sections.push("## 3. Recommended Crops".to_string());

    if report.recommended_crops.is_empty() {
        sections.push("No crop profiles matched this soil.".to_string());
        return sections.join("\n\n");
    }

    sections.push("Based on your soil conditions, we recommend:".to_string());
    let items: Vec<String> = report
        .recommended_crops
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. **{}** ({:.0}% match)", i + 1, c.crop, c.score))
        .collect();
    sections.push(items.join("\n"));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;

    #[test]
    fn test_numbered_crops() {
        let report = sample_report("Nairobi");
        let md = generate(&report);
        assert!(md.contains(&format!("1. **{}**", report.recommended_crops[0].crop)));
        assert!(md.contains("3. **"));
        assert!(md.contains("% match"));
    }
}
