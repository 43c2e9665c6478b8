//! Render KB hits for inclusion in a plan prompt.

use ff_core::responses::KbSearchResult;

pub const NO_RESULTS: &str = "No KB results found.";

/// `"[id] title (source)\nsnippet"` per hit, separated by blank lines.
#[must_use]
pub fn format_for_prompt(results: &[KbSearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }
    results
        .iter()
        .map(|r| format!("[{}] {} ({})\n{}", r.id, r.title, r.source, r.snippet))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_core::enums::KbSource;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_results_have_placeholder() {
        assert_eq!(format_for_prompt(&[]), "No KB results found.");
    }

    #[test]
    fn hits_are_rendered_with_source() {
        let results = vec![
            KbSearchResult {
                id: "RB-ELEC-001".into(),
                title: "Lockout/Tagout".into(),
                snippet: "Isolate power...".into(),
                source: KbSource::Runbook,
                score: 12,
            },
            KbSearchResult {
                id: "INC-2023-014".into(),
                title: "Pump leak".into(),
                snippet: "Replaced seal...".into(),
                source: KbSource::Incident,
                score: 4,
            },
        ];
        assert_eq!(
            format_for_prompt(&results),
            "[RB-ELEC-001] Lockout/Tagout (runbook)\nIsolate power...\n\n[INC-2023-014] Pump leak (incident)\nReplaced seal..."
        );
    }
}
