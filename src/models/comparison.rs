use serde::Serialize;

use crate::models::asana::TaskState;

/// Four-way alignment between a task's reported state and observed commit
/// activity. Scores are strictly ordered 4 > 3 > 2 > 1 and drive the default
/// sort of the comparison table.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    CompletedWithCommits,
    CompletedNoCommits,
    InProgressWithCommits,
    NoActivity,
}

impl AlignmentStatus {
    /// Exhaustive over every `(completed, has_commits)` pair.
    pub fn classify(completed: bool, has_commits: bool) -> Self {
        match (completed, has_commits) {
            (true, true) => AlignmentStatus::CompletedWithCommits,
            (true, false) => AlignmentStatus::CompletedNoCommits,
            (false, true) => AlignmentStatus::InProgressWithCommits,
            (false, false) => AlignmentStatus::NoActivity,
        }
    }

    pub fn score(self) -> u8 {
        match self {
            AlignmentStatus::CompletedWithCommits => 4,
            AlignmentStatus::CompletedNoCommits => 3,
            AlignmentStatus::InProgressWithCommits => 2,
            AlignmentStatus::NoActivity => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlignmentStatus::CompletedWithCommits => "completed_with_commits",
            AlignmentStatus::CompletedNoCommits => "completed_no_commits",
            AlignmentStatus::InProgressWithCommits => "in_progress_with_commits",
            AlignmentStatus::NoActivity => "no_activity",
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            AlignmentStatus::CompletedWithCommits => "Completed ✓",
            AlignmentStatus::CompletedNoCommits => "Done (No Code)",
            AlignmentStatus::InProgressWithCommits => "Active Development",
            AlignmentStatus::NoActivity => "No Activity",
        }
    }
}

/// One task decorated with commit-derived metrics and its alignment
/// classification. Recomputed on every render from the Task × Commit ×
/// Effort join; never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComparisonRow {
    pub task_id: String,
    pub task_name: String,
    pub task_url: String,
    pub assignee: String,
    pub task_status: TaskState,
    pub section: Option<String>,
    pub estimated_hours: i64,
    pub actual_hours: i64,
    pub commits: usize,
    pub lines_added: i64,
    pub lines_deleted: i64,
    pub files_changed: i64,
    pub completion_status: AlignmentStatus,
    pub status_score: u8,
    /// Timestamps (epoch seconds) of the first and last related commit *in
    /// feed order*, not chronological order. This mirrors the upstream
    /// report; the rollup's `last_commit` is the one doing a real max.
    pub first_commit: Option<i64>,
    pub last_commit: Option<i64>,
}

/// Counts for the four summary cards above the comparison table.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ComparisonSummary {
    pub total_tasks: usize,
    pub completed_with_commits: usize,
    pub completed_no_commits: usize,
    pub in_progress_with_commits: usize,
    pub no_activity: usize,
}
