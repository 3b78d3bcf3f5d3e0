use crate::core::engine::PatchRun;
use crate::utils::error::PatchError;
use serde_json::json;

/// Human-readable result of a run: one line per patch, then a status line.
pub fn summary(run: &PatchRun) -> String {
    let report = &run.report;
    let mut lines: Vec<String> = report
        .outcomes
        .iter()
        .map(|outcome| {
            let mark = if outcome.replacements > 0 { "✔" } else { "·" };
            format!("  {} {} ({} replacement(s))", mark, outcome.name, outcome.replacements)
        })
        .collect();

    if report.is_noop() {
        lines.push(format!(
            "ℹ️  No changes: none of the {} patch(es) matched {}",
            report.outcomes.len(),
            report.path
        ));
    } else if !report.changed {
        lines.push(format!(
            "ℹ️  No changes: {}/{} patch(es) matched {} but left the content as it was",
            report.applied_count(),
            report.outcomes.len(),
            report.path
        ));
    } else if report.written {
        lines.push(format!(
            "✅ Patched {}: {}/{} patch(es) applied, {} replacement(s)",
            report.path,
            report.applied_count(),
            report.outcomes.len(),
            report.total_replacements()
        ));
        if let Some(backup) = &report.backup_path {
            lines.push(format!("💾 Original saved to {}", backup));
        }
    } else {
        lines.push(format!(
            "🔍 Dry run: {}/{} patch(es) would apply to {}",
            report.applied_count(),
            report.outcomes.len(),
            report.path
        ));
    }

    lines.join("\n")
}

/// Error shape printed on stderr when `--json` is set.
pub fn error_json(error: &PatchError) -> serde_json::Value {
    json!({
        "error": error.user_friendly_message(),
        "category": error.category(),
        "severity": error.severity(),
        "suggestion": error.recovery_suggestion(),
        "exit_code": error.severity().exit_code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PatchOutcome, PatchReport};

    fn run(outcomes: &[(&str, usize)], changed: bool, written: bool) -> PatchRun {
        PatchRun {
            report: PatchReport {
                path: "app/page.tsx".to_string(),
                outcomes: outcomes
                    .iter()
                    .map(|(name, replacements)| PatchOutcome {
                        name: name.to_string(),
                        replacements: *replacements,
                    })
                    .collect(),
                changed,
                written,
                backup_path: None,
            },
            diff: String::new(),
        }
    }

    #[test]
    fn test_nothing_matched() {
        let text = summary(&run(&[("a", 0), ("b", 0)], false, false));
        assert!(text.ends_with("No changes: none of the 2 patch(es) matched app/page.tsx"));
        assert!(!text.contains("✅"));
    }

    #[test]
    fn test_matched_without_change_is_not_called_unmatched() {
        let text = summary(&run(&[("same", 1)], false, false));
        assert!(text.contains("1/1 patch(es) matched app/page.tsx but left the content as it was"));
        assert!(!text.contains("none of"));
    }

    #[test]
    fn test_written() {
        let mut patched = run(&[("a", 2), ("b", 0)], true, true);
        patched.report.backup_path = Some("app/page.tsx.20260101000000.bak".to_string());

        let text = summary(&patched);
        assert!(text.contains("  ✔ a (2 replacement(s))"));
        assert!(text.contains("  · b (0 replacement(s))"));
        assert!(text.contains("✅ Patched app/page.tsx: 1/2 patch(es) applied, 2 replacement(s)"));
        assert!(text.ends_with("💾 Original saved to app/page.tsx.20260101000000.bak"));
    }

    #[test]
    fn test_dry_run() {
        let text = summary(&run(&[("a", 1)], true, false));
        assert!(text.ends_with("🔍 Dry run: 1/1 patch(es) would apply to app/page.tsx"));
    }

    #[test]
    fn test_error_json() {
        let value = error_json(&PatchError::NoPatternMatched {
            path: "app/page.tsx".to_string(),
        });
        assert_eq!(value["severity"], "Medium");
        assert_eq!(value["category"], "Pattern");
        assert_eq!(value["exit_code"], 2);
        assert!(value["error"].as_str().unwrap().contains("app/page.tsx"));
    }

    #[test]
    fn test_run_json_carries_diff() {
        let mut dry = run(&[("a", 1)], true, false);
        dry.diff = "--- a/app/page.tsx\n+++ b/app/page.tsx\n".to_string();

        let value = serde_json::to_value(&dry).unwrap();
        assert_eq!(value["path"], "app/page.tsx");
        assert_eq!(value["changed"], true);
        assert!(value["diff"].as_str().unwrap().starts_with("--- a/app/page.tsx"));
    }
}
