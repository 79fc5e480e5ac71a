use tracing::debug;

use crate::models::asana::{AsanaSummary, Effort, Task, TaskState};
use crate::models::comparison::{AlignmentStatus, ComparisonRow, ComparisonSummary};
use crate::models::git::Commit;

/// Joins every task in the summary against the commit feed and the optional
/// effort records, producing one [`ComparisonRow`] per task. Pure function of
/// its three inputs.
///
/// Commits relate to a task through the developer key the task is nested
/// under — the whole requested range counts, with no per-task time window.
/// Output is sorted by status score descending with a stable sort, so ties
/// keep the developer-key/bucket/array order they were produced in.
pub fn comparison_rows(
    summary: &AsanaSummary,
    commits: &[Commit],
    efforts: &[Effort],
) -> Vec<ComparisonRow> {
    let mut rows = Vec::new();

    for (developer, buckets) in &summary.developers {
        let related: Vec<&Commit> = commits
            .iter()
            .filter(|commit| commit.developer == *developer)
            .collect();

        for task in &buckets.in_progress {
            rows.push(build_row(developer, task, TaskState::InProgress, &related, efforts));
        }
        for task in &buckets.done {
            rows.push(build_row(developer, task, TaskState::Done, &related, efforts));
        }
    }

    rows.sort_by(|a, b| b.status_score.cmp(&a.status_score));
    debug!(target: "app::rollup", rows = rows.len(), "built comparison rows");
    rows
}

fn build_row(
    developer: &str,
    task: &Task,
    state: TaskState,
    related: &[&Commit],
    efforts: &[Effort],
) -> ComparisonRow {
    // A task-id match and an assignee match are equally valid; the first
    // effort record that satisfies either wins.
    let effort = efforts
        .iter()
        .find(|effort| effort.task_id == task.id || effort.assignee == developer);

    let completed = task.completed || state.as_str().eq_ignore_ascii_case("done");
    let has_commits = !related.is_empty();
    let status = AlignmentStatus::classify(completed, has_commits);

    let hours = effort
        .map(|effort| ((effort.time_spent_minutes as f64) / 60.0).round() as i64)
        .unwrap_or(0);

    ComparisonRow {
        task_id: task.id.clone(),
        task_name: task.name.clone(),
        task_url: task.url.clone(),
        assignee: task
            .assignee
            .clone()
            .unwrap_or_else(|| developer.to_string()),
        task_status: state,
        section: task.section.clone(),
        estimated_hours: hours,
        actual_hours: hours,
        commits: related.len(),
        lines_added: related.iter().map(|commit| commit.added).sum(),
        lines_deleted: related.iter().map(|commit| commit.deleted).sum(),
        files_changed: related.iter().map(|commit| commit.files).sum(),
        completion_status: status,
        status_score: status.score(),
        // First/last by feed position, not chronology; kept as the upstream
        // report defines them.
        first_commit: related.first().map(|commit| commit.timestamp),
        last_commit: related.last().map(|commit| commit.timestamp),
    }
}

/// Counts rows per alignment status for the summary cards.
pub fn summarize(rows: &[ComparisonRow]) -> ComparisonSummary {
    let mut summary = ComparisonSummary {
        total_tasks: rows.len(),
        ..ComparisonSummary::default()
    };

    for row in rows {
        match row.completion_status {
            AlignmentStatus::CompletedWithCommits => summary.completed_with_commits += 1,
            AlignmentStatus::CompletedNoCommits => summary.completed_no_commits += 1,
            AlignmentStatus::InProgressWithCommits => summary.in_progress_with_commits += 1,
            AlignmentStatus::NoActivity => summary.no_activity += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::asana::DeveloperTasks;

    fn task(id: &str, name: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("https://asana.example/{id}"),
            assignee: None,
            section: Some("Sprint".to_string()),
            completed,
        }
    }

    fn commit(developer: &str, timestamp: i64, added: i64) -> Commit {
        Commit {
            developer: developer.to_string(),
            repo: "r1".to_string(),
            timestamp,
            added,
            deleted: 1,
            files: 2,
            message: String::new(),
            link: String::new(),
        }
    }

    fn summary_for(developer: &str, in_progress: Vec<Task>, done: Vec<Task>) -> AsanaSummary {
        let mut developers = BTreeMap::new();
        let total_in_progress = in_progress.len() as i64;
        let total_done = done.len() as i64;
        developers.insert(developer.to_string(), DeveloperTasks { in_progress, done });
        AsanaSummary {
            developers,
            total_in_progress,
            total_done,
        }
    }

    #[test]
    fn classification_is_exhaustive_and_ordered() {
        assert_eq!(
            AlignmentStatus::classify(true, true),
            AlignmentStatus::CompletedWithCommits
        );
        assert_eq!(
            AlignmentStatus::classify(true, false),
            AlignmentStatus::CompletedNoCommits
        );
        assert_eq!(
            AlignmentStatus::classify(false, true),
            AlignmentStatus::InProgressWithCommits
        );
        assert_eq!(
            AlignmentStatus::classify(false, false),
            AlignmentStatus::NoActivity
        );

        let scores: Vec<u8> = [
            AlignmentStatus::CompletedWithCommits,
            AlignmentStatus::CompletedNoCommits,
            AlignmentStatus::InProgressWithCommits,
            AlignmentStatus::NoActivity,
        ]
        .iter()
        .map(|status| status.score())
        .collect();
        assert_eq!(scores, vec![4, 3, 2, 1]);
    }

    #[test]
    fn completed_task_without_commits_scores_three() {
        let summary = summary_for("A", vec![], vec![task("t1", "Ship it", true)]);
        let rows = comparison_rows(&summary, &[], &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].completion_status,
            AlignmentStatus::CompletedNoCommits
        );
        assert_eq!(rows[0].status_score, 3);
        assert_eq!(rows[0].first_commit, None);
        assert_eq!(rows[0].last_commit, None);
    }

    #[test]
    fn done_bucket_counts_as_completed_even_without_flag() {
        let summary = summary_for("A", vec![], vec![task("t1", "Closed in Asana", false)]);
        let rows = comparison_rows(&summary, &[commit("A", 10, 5)], &[]);
        assert_eq!(
            rows[0].completion_status,
            AlignmentStatus::CompletedWithCommits
        );
    }

    #[test]
    fn commits_relate_by_developer_key_over_whole_range() {
        let summary = summary_for("A", vec![task("t1", "WIP", false)], vec![]);
        let commits = vec![commit("A", 10, 5), commit("B", 20, 7), commit("A", 30, 3)];

        let rows = comparison_rows(&summary, &commits, &[]);
        assert_eq!(rows[0].commits, 2);
        assert_eq!(rows[0].lines_added, 8);
        assert_eq!(rows[0].lines_deleted, 2);
        assert_eq!(rows[0].files_changed, 4);
        assert_eq!(
            rows[0].completion_status,
            AlignmentStatus::InProgressWithCommits
        );
    }

    #[test]
    fn first_and_last_commit_follow_feed_order() {
        let summary = summary_for("A", vec![task("t1", "WIP", false)], vec![]);
        // Feed deliberately not in chronological order.
        let commits = vec![commit("A", 300, 1), commit("A", 100, 1), commit("A", 200, 1)];

        let rows = comparison_rows(&summary, &commits, &[]);
        assert_eq!(rows[0].first_commit, Some(300));
        assert_eq!(rows[0].last_commit, Some(200));
    }

    #[test]
    fn first_matching_effort_wins() {
        let summary = summary_for("A", vec![task("t1", "WIP", false)], vec![]);
        let efforts = vec![
            Effort {
                task_id: "other".to_string(),
                assignee: "A".to_string(),
                time_spent_minutes: 90,
                ..Effort::default()
            },
            Effort {
                task_id: "t1".to_string(),
                assignee: "A".to_string(),
                time_spent_minutes: 600,
                ..Effort::default()
            },
        ];

        // The assignee match on the first record shadows the exact task-id
        // match later in the list.
        let rows = comparison_rows(&summary, &[], &efforts);
        assert_eq!(rows[0].estimated_hours, 2);
        assert_eq!(rows[0].actual_hours, 2);
    }

    #[test]
    fn rows_sort_by_score_descending_with_stable_ties() {
        let summary = summary_for(
            "A",
            vec![task("t2", "WIP one", false), task("t3", "WIP two", false)],
            vec![task("t1", "Done", true)],
        );

        let rows = comparison_rows(&summary, &[], &[]);
        assert_eq!(rows[0].task_id, "t1");
        assert_eq!(rows[0].status_score, 3);
        // Both score-1 rows keep their bucket order.
        assert_eq!(rows[1].task_id, "t2");
        assert_eq!(rows[2].task_id, "t3");
    }

    #[test]
    fn assignee_falls_back_to_developer_key() {
        let summary = summary_for("A", vec![task("t1", "WIP", false)], vec![]);
        let rows = comparison_rows(&summary, &[], &[]);
        assert_eq!(rows[0].assignee, "A");
    }

    #[test]
    fn summarize_counts_each_status() {
        let summary = summary_for(
            "A",
            vec![task("t1", "WIP", false)],
            vec![task("t2", "Done", true)],
        );
        let rows = comparison_rows(&summary, &[commit("A", 1, 1)], &[]);
        let counts = summarize(&rows);

        assert_eq!(counts.total_tasks, 2);
        assert_eq!(counts.completed_with_commits, 1);
        assert_eq!(counts.in_progress_with_commits, 1);
        assert_eq!(counts.completed_no_commits, 0);
        assert_eq!(counts.no_activity, 0);
    }
}
