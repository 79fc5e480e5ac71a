use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::models::analytics::OverviewCards;
use crate::models::asana::{AsanaSummary, Task, TaskState};
use crate::models::git::Commit;
use crate::models::query::DeveloperFilter;
use crate::models::rollup::DeveloperRollup;
use crate::state::DashboardData;

const UNKNOWN_DEVELOPER: &str = "Unknown";

/// Groups the commit feed by developer and sums activity. Empty input yields
/// an empty list. Output is sorted by commit count descending; the sort is
/// stable, so ties keep first-seen order.
pub fn developer_rollups(commits: &[Commit], filter: &DeveloperFilter) -> Vec<DeveloperRollup> {
    let mut grouped: HashMap<String, (DeveloperRollup, BTreeSet<String>)> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for commit in commits {
        if !filter.matches(&commit.developer) {
            continue;
        }

        let developer = if commit.developer.is_empty() {
            UNKNOWN_DEVELOPER.to_string()
        } else {
            commit.developer.clone()
        };

        let entry = grouped.entry(developer.clone()).or_insert_with(|| {
            order.push(developer.clone());
            (DeveloperRollup::new(developer), BTreeSet::new())
        });

        let (rollup, repos) = entry;
        rollup.commits += 1;
        rollup.added += commit.added;
        rollup.deleted += commit.deleted;
        rollup.files += commit.files;
        repos.insert(commit.repo.clone());

        // Seconds to milliseconds before comparing, matching the wire unit
        // the table renders.
        let commit_ms = commit.timestamp * 1000;
        if rollup.last_commit.map_or(true, |latest| commit_ms > latest) {
            rollup.last_commit = Some(commit_ms);
            rollup.last_commit_message = commit.message.clone();
            rollup.last_commit_link = commit.link.clone();
        }
    }

    let mut rollups: Vec<DeveloperRollup> = order
        .into_iter()
        .filter_map(|developer| {
            grouped.remove(&developer).map(|(mut rollup, repos)| {
                rollup.repos = repos.len();
                rollup
            })
        })
        .collect();

    rollups.sort_by(|a, b| b.commits.cmp(&a.commits));
    debug!(target: "app::rollup", developers = rollups.len(), "built developer rollups");
    rollups
}

/// A task flattened out of the per-developer summary buckets, carrying the
/// developer key and the bucket it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTask {
    pub developer: String,
    pub state: TaskState,
    pub task: Task,
}

/// Every task in the summary in a single list: per developer (key order),
/// in-progress bucket first, then done, preserving array order within each.
pub fn flatten_tasks(summary: &AsanaSummary) -> Vec<FlatTask> {
    let mut tasks = Vec::new();
    for (developer, buckets) in &summary.developers {
        for task in &buckets.in_progress {
            tasks.push(FlatTask {
                developer: developer.clone(),
                state: TaskState::InProgress,
                task: task.clone(),
            });
        }
        for task in &buckets.done {
            tasks.push(FlatTask {
                developer: developer.clone(),
                state: TaskState::Done,
                task: task.clone(),
            });
        }
    }
    tasks
}

/// Distinct developer names across both systems for the filter dropdown:
/// commit authors in feed order first, then summary keys not already seen.
/// An empty author string still counts as one distinct name, the same way
/// the active-developer card counts it.
pub fn developer_names(commits: &[Commit], summary: &AsanaSummary) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for commit in commits {
        if seen.insert(commit.developer.clone()) {
            names.push(commit.developer.clone());
        }
    }
    for developer in summary.developers.keys() {
        if seen.insert(developer.clone()) {
            names.push(developer.clone());
        }
    }

    names
}

/// Headline numbers for the overview cards.
pub fn overview_cards(data: &DashboardData) -> OverviewCards {
    let completed_tasks = data.asana_summary.total_done;
    let in_progress_tasks = data.asana_summary.total_in_progress;
    let total_tasks = completed_tasks + in_progress_tasks;

    let completion_rate_percent = if total_tasks > 0 {
        ((completed_tasks as f64 / total_tasks as f64) * 100.0).round() as i64
    } else {
        0
    };

    let total_lines_added = data
        .git_report
        .commits
        .iter()
        .map(|commit| commit.added)
        .sum();

    OverviewCards {
        total_commits: data.git_report.total_commits(),
        completed_tasks,
        in_progress_tasks,
        total_tasks,
        active_developers: developer_names(&data.git_report.commits, &data.asana_summary).len(),
        total_lines_added,
        completion_rate_percent,
    }
}
