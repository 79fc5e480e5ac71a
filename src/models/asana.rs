use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A task nested under a developer key in the Asana summary payload. The
/// status ("In Progress" / "Done") is not part of the wire record; it is
/// attached from the bucket the task was listed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskState {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::InProgress => "In Progress",
            TaskState::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeveloperTasks {
    #[serde(default)]
    pub in_progress: Vec<Task>,
    #[serde(default)]
    pub done: Vec<Task>,
}

/// The Asana summary payload. Developer keys are held in a BTreeMap so every
/// derivation that walks the map is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AsanaSummary {
    #[serde(default)]
    pub developers: BTreeMap<String, DeveloperTasks>,
    #[serde(default)]
    pub total_in_progress: i64,
    #[serde(default)]
    pub total_done: i64,
}

/// Optional per-task enrichment produced by the effort analysis endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Effort {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub time_spent_minutes: i64,
    #[serde(default)]
    pub commit_count: i64,
    #[serde(default)]
    pub lines_added: i64,
    #[serde(default)]
    pub lines_deleted: i64,
    #[serde(default)]
    pub analysis: Option<String>,
}
