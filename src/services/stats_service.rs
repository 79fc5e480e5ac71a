use crate::models::analytics::{AnalyticsReport, DeveloperPerformance, TaskStatusSlice};
use crate::models::asana::AsanaSummary;

/// Proportions for the task-status pie. Empty when there are no tasks at
/// all, which the view renders as a placeholder.
pub fn task_status_slices(summary: &AsanaSummary) -> Vec<TaskStatusSlice> {
    if summary.total_in_progress == 0 && summary.total_done == 0 {
        return Vec::new();
    }

    vec![
        TaskStatusSlice {
            label: "In Progress",
            value: summary.total_in_progress,
        },
        TaskStatusSlice {
            label: "Done",
            value: summary.total_done,
        },
    ]
}

/// Reshapes the server-computed analytics map for the performance chart,
/// dropping developers with zero activity across in-progress tasks, done
/// tasks, and commits.
pub fn developer_performance(report: &AnalyticsReport) -> Vec<DeveloperPerformance> {
    report
        .developer_summary
        .iter()
        .map(|(developer, stats)| DeveloperPerformance {
            developer: developer.clone(),
            in_progress: stats.in_progress_tasks.len(),
            done: stats.done_tasks.len(),
            commits: stats.commit_count,
            lines_added: stats.lines_added,
            lines_deleted: stats.lines_deleted,
            files_changed: stats.files_changed,
        })
        .filter(|perf| perf.in_progress > 0 || perf.done > 0 || perf.commits > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::models::analytics::DeveloperStats;

    #[test]
    fn slices_empty_when_no_tasks() {
        assert!(task_status_slices(&AsanaSummary::default()).is_empty());
    }

    #[test]
    fn slices_cover_both_statuses() {
        let summary = AsanaSummary {
            total_in_progress: 3,
            total_done: 7,
            ..AsanaSummary::default()
        };

        let slices = task_status_slices(&summary);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "In Progress");
        assert_eq!(slices[0].value, 3);
        assert_eq!(slices[1].label, "Done");
        assert_eq!(slices[1].value, 7);
    }

    #[test]
    fn performance_drops_zero_activity_developers() {
        let mut developer_summary = BTreeMap::new();
        developer_summary.insert(
            "active".to_string(),
            DeveloperStats {
                in_progress_tasks: vec![json!({"id": "t1"})],
                done_tasks: vec![],
                commit_count: 4,
                lines_added: 120,
                lines_deleted: 30,
                files_changed: 6,
            },
        );
        developer_summary.insert(
            "idle".to_string(),
            DeveloperStats {
                // Line churn alone does not count as activity.
                lines_added: 50,
                ..DeveloperStats::default()
            },
        );

        let report = AnalyticsReport { developer_summary };
        let performance = developer_performance(&report);

        assert_eq!(performance.len(), 1);
        assert_eq!(performance[0].developer, "active");
        assert_eq!(performance[0].in_progress, 1);
        assert_eq!(performance[0].commits, 4);
    }
}
