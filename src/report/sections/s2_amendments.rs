//! S2: Recommended Soil Amendments

use crate::report::SoilReport;

pub fn generate(report: &SoilReport) -> String {
    let mut sections = Vec::new();
    sections.push("## 2. Recommended Soil Amendments".to_string());

    let items: Vec<String> = report
        .amendments
        .iter()
        .map(|a| format!("- {}", a.action))
        .collect();
    sections.push(items.join("\n"));

    sections.join("\n\n")
}
