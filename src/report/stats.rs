//! Statistics and time formatting for suite results.
//!
//! Pure aggregation over the input tree: spec and scenario counts, success
//! rate, and human readable durations.

use super::types::Summary;
use crate::types::{ExecStatus, SpecResult};

/// Count specifications by outcome.
///
/// Not-executed specs count as skipped so that
/// `passed + failed + skipped == total` always holds.
pub fn summarize_specs(specs: &[SpecResult]) -> Summary {
    summarize_statuses(specs.iter().map(|s| s.status))
}

/// Count the scenarios of one specification by outcome.
pub fn summarize_scenarios(spec: &SpecResult) -> Summary {
    summarize_statuses(spec.scenarios().map(|s| s.status))
}

fn summarize_statuses(statuses: impl Iterator<Item = ExecStatus>) -> Summary {
    let mut summary = Summary::default();
    for status in statuses {
        summary.total += 1;
        match status {
            ExecStatus::Passed => summary.passed += 1,
            ExecStatus::Failed => summary.failed += 1,
            ExecStatus::Skipped | ExecStatus::NotExecuted => summary.skipped += 1,
        }
    }
    summary
}

/// Percentage of passed entries, 0 for an empty summary.
pub fn success_rate(summary: &Summary) -> f64 {
    if summary.total == 0 {
        return 0.0;
    }
    100.0 * summary.passed as f64 / summary.total as f64
}

/// Format a duration in milliseconds as "1h 2m 3s".
///
/// Leading zero units are dropped, so 65 seconds is "1m 5s" and zero is "0s".
/// Non-zero durations under a second keep their milliseconds ("250ms").
pub fn format_time(millis: u64) -> String {
    if millis > 0 && millis < 1000 {
        return format!("{}ms", millis);
    }

    let total_secs = millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScenarioResult, SpecItem};
    use std::path::PathBuf;

    fn spec(status: ExecStatus) -> SpecResult {
        SpecResult {
            heading: "Spec".to_string(),
            file_name: PathBuf::from("specs/a.spec"),
            tags: vec![],
            status,
            execution_time: 0,
            pre_hook_failure: None,
            post_hook_failure: None,
            items: vec![],
            errors: vec![],
        }
    }

    fn scenario(status: ExecStatus) -> ScenarioResult {
        ScenarioResult {
            heading: "Scenario".to_string(),
            tags: vec![],
            status,
            execution_time: 0,
            contexts: vec![],
            items: vec![],
            teardowns: vec![],
            pre_hook_failure: None,
            post_hook_failure: None,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize_specs(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(success_rate(&summary), 0.0);
    }

    #[test]
    fn test_counts_always_add_up_to_total() {
        let specs = vec![
            spec(ExecStatus::Passed),
            spec(ExecStatus::Failed),
            spec(ExecStatus::Skipped),
            spec(ExecStatus::NotExecuted),
            spec(ExecStatus::Passed),
        ];

        let summary = summarize_specs(&specs);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.passed + summary.failed + summary.skipped, summary.total);
    }

    #[test]
    fn test_success_rate() {
        let summary = Summary { total: 4, failed: 1, passed: 3, skipped: 0 };
        assert_eq!(success_rate(&summary), 75.0);

        let thirds = Summary { total: 3, failed: 1, passed: 2, skipped: 0 };
        assert!((success_rate(&thirds) - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_scenario_summary_includes_table_driven_rows() {
        let mut s = spec(ExecStatus::Failed);
        s.items = vec![
            SpecItem::Comment { text: "not a scenario".to_string() },
            SpecItem::Scenario(scenario(ExecStatus::Passed)),
            SpecItem::TableDrivenScenario { scenario: scenario(ExecStatus::Passed), table_row_index: 0 },
            SpecItem::TableDrivenScenario { scenario: scenario(ExecStatus::Failed), table_row_index: 1 },
        ];

        let summary = summarize_scenarios(&s);

        assert_eq!(summary, Summary { total: 3, failed: 1, passed: 2, skipped: 0 });
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0s");
        assert_eq!(format_time(250), "250ms");
        assert_eq!(format_time(1_999), "1s");
        assert_eq!(format_time(65_000), "1m 5s");
        assert_eq!(format_time(3_600_000), "1h 0m 0s");
        assert_eq!(format_time(3_723_000), "1h 2m 3s");
    }
}
