use super::FilterOutcome;
use crate::domain::JobPosting;

/// Renders one posting's outcome as the human-readable audit block: header,
/// gate-by-gate status, then either the drop reason or the score breakdown.
pub fn render_audit(job: &JobPosting, outcome: &FilterOutcome) -> String {
    let mut lines = vec![
        format!("Job: {} @ {}", job.title, job.company),
        format!("Location: {}", job.location),
        format!("URL: {}", job.url),
        String::new(),
        "GATES:".to_string(),
    ];

    for trace in &outcome.gates {
        let status = if trace.passed { "✓" } else { "✗" };
        lines.push(format!("  {}: {}", trace.gate.label(), status));
    }

    match &outcome.drop_reason {
        Some(reason) => lines.push(format!("\nDROP: {reason}")),
        None => {
            lines.push(format!("\nSCORE: {}", outcome.score));
            if let Some(breakdown) = &outcome.breakdown {
                lines.push(format!("  title_bonus: +{}", breakdown.title_bonus));
                lines.push(format!("  keywords: +{}", breakdown.keywords));
            }
        }
    }

    if let Some(matches) = &outcome.matches {
        if !matches.stack_groups.is_empty() {
            lines.push(format!("  stack groups: {}", matches.stack_groups.join(", ")));
        }
    }

    lines.join("\n")
}
