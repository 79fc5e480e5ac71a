use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::models::analytics::AnalyticsReport;
use crate::models::asana::{AsanaSummary, Effort};
use crate::models::git::GitReport;
use crate::models::query::DateRange;

/// The five data slots backing the dashboard. Each slot's `Default` is the
/// fallback installed when its request fails.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardData {
    pub git_report: GitReport,
    pub asana_summary: AsanaSummary,
    pub developer_efforts: Vec<Effort>,
    pub developer_summary: JsonValue,
    pub analytics: Option<AnalyticsReport>,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self {
            git_report: GitReport::default(),
            asana_summary: AsanaSummary::default(),
            developer_efforts: Vec::new(),
            developer_summary: json!({}),
            analytics: None,
        }
    }
}

/// An immutable view of one completed fetch cycle. The presentation layer
/// only ever sees whole snapshots; nothing mutates a snapshot in place.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSnapshot {
    pub range: DateRange,
    pub data: DashboardData,
    pub warning: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn empty(range: DateRange) -> Self {
        Self {
            range,
            data: DashboardData::default(),
            warning: None,
            fetched_at: Utc::now(),
        }
    }
}

/// Owns the current snapshot plus a request generation counter. A fetch
/// claims a generation up front; a snapshot is only installed if no newer
/// fetch started in the meantime, so a slow early response can never
/// overwrite a later one.
pub struct DashboardState {
    current: RwLock<Arc<DashboardSnapshot>>,
    generation: AtomicU64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(DashboardSnapshot::empty(DateRange::default()))),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.current.read().expect("state lock poisoned"))
    }

    /// Claims the generation for a fetch that is about to start.
    pub fn begin_fetch(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Installs the snapshot if `generation` is still the newest fetch.
    /// Returns whether it was applied; stale snapshots are dropped.
    pub fn commit(&self, generation: u64, snapshot: DashboardSnapshot) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                target: "app::fetch",
                generation,
                "discarding stale fetch result"
            );
            return false;
        }

        let mut guard = self.current.write().expect("state lock poisoned");
        *guard = Arc::new(snapshot);
        true
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_matches_empty_fallbacks() {
        let data = DashboardData::default();
        assert!(data.git_report.commits.is_empty());
        assert_eq!(data.git_report.count, 0);
        assert!(data.asana_summary.developers.is_empty());
        assert!(data.developer_efforts.is_empty());
        assert_eq!(data.developer_summary, json!({}));
        assert!(data.analytics.is_none());
    }

    #[test]
    fn stale_generation_is_discarded() {
        let state = DashboardState::new();
        let range = DateRange::default();

        let slow = state.begin_fetch();
        let fast = state.begin_fetch();

        let mut fast_snapshot = DashboardSnapshot::empty(range);
        fast_snapshot.warning = Some("fast".to_string());
        assert!(state.commit(fast, fast_snapshot));

        let mut slow_snapshot = DashboardSnapshot::empty(range);
        slow_snapshot.warning = Some("slow".to_string());
        assert!(!state.commit(slow, slow_snapshot));

        assert_eq!(state.snapshot().warning.as_deref(), Some("fast"));
    }

    #[test]
    fn snapshots_replace_wholesale() {
        let state = DashboardState::new();
        let range = DateRange::default();
        let before = state.snapshot();

        let generation = state.begin_fetch();
        state.commit(generation, DashboardSnapshot::empty(range));

        let after = state.snapshot();
        assert!(!Arc::ptr_eq(&before, &after));
    }
}
