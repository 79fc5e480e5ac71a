use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Server-computed per-developer stats from the analytics endpoint. The task
/// buckets arrive as full task objects; only their counts matter here, so
/// they are kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeveloperStats {
    #[serde(default)]
    pub in_progress_tasks: Vec<JsonValue>,
    #[serde(default)]
    pub done_tasks: Vec<JsonValue>,
    #[serde(default)]
    pub commit_count: i64,
    #[serde(default)]
    pub lines_added: i64,
    #[serde(default)]
    pub lines_deleted: i64,
    #[serde(default)]
    pub files_changed: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub developer_summary: BTreeMap<String, DeveloperStats>,
}

/// Chart-ready reshape of [`DeveloperStats`], keyed by developer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeveloperPerformance {
    pub developer: String,
    pub in_progress: usize,
    pub done: usize,
    pub commits: i64,
    pub lines_added: i64,
    pub lines_deleted: i64,
    pub files_changed: i64,
}

/// One slice of the task-status pie.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskStatusSlice {
    pub label: &'static str,
    pub value: i64,
}

/// Headline numbers for the overview cards.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct OverviewCards {
    pub total_commits: usize,
    pub completed_tasks: i64,
    pub in_progress_tasks: i64,
    pub total_tasks: i64,
    pub active_developers: usize,
    pub total_lines_added: i64,
    pub completion_rate_percent: i64,
}
