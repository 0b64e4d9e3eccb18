//! Pure formatting for the final console report.

use crate::pipeline::SeedSummary;

/// Renders the observation report as printable lines.
///
/// Formatting only — no I/O and no shared state, so the exact output
/// is testable.
pub fn summary_lines(summary: &SeedSummary) -> Vec<String> {
    let observations = &summary.observations;
    let mut lines = vec![
        "Observations for our generated data:".to_string(),
        format!(
            "  - {} customers have the surname \"Williams\"",
            observations.williams_customers
        ),
        format!("  - {} customers are children", observations.child_customers),
        format!("  - {} visits occurred in 2016", observations.visits_in_2016),
    ];
    match &observations.latest_visit {
        Some(visit) => lines.push(format!(
            "  - The latest visit is from {} ({})",
            visit.customer_name, visit.ip_address
        )),
        None => lines.push("  - No visits have been recorded".to_string()),
    }
    lines
}
