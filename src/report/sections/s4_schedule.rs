//! S4: Planting Schedule

use super::schedule_title;
use crate::report::SoilReport;

pub fn generate(report: &SoilReport) -> String {
    let mut sections = Vec::new();
    sections.push(format!("## {}", schedule_title(report)));

    if report.schedule.is_default {
        sections.push(
            "*No crop-specific calendar available; showing a general schedule.*".to_string(),
        );
    }

    let phases: Vec<String> = report
        .schedule
        .phases()
        .iter()
        .map(|(title, text)| format!("- **{}**: {}", title, text))
        .collect();
    sections.push(phases.join("\n"));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendations::planting_schedule;
    use crate::report::test_support::sample_report;

    #[test]
    fn test_four_phases() {
        let md = generate(&sample_report("Nairobi"));
        for phase in ["**Prep**", "**Plant**", "**Maintain**", "**Harvest**"] {
            assert!(md.contains(phase), "missing {}", phase);
        }
    }

    #[test]
    fn test_default_schedule_note() {
        let mut report = sample_report("Nairobi");
        report.schedule = planting_schedule("Blueberries");
        let md = generate(&report);
        assert!(md.contains("general schedule"));
        assert!(md.contains("Early Spring: Prepare soil, test nutrients"));
    }
}
