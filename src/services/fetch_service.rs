use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::query::DateRange;
use crate::services::backend_client::BackendClient;
use crate::state::{DashboardData, DashboardSnapshot, DashboardState};

/// The five data endpoints fanned out on every fetch cycle.
const ENDPOINT_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Every endpoint answered.
    Complete,
    /// Some endpoints failed; their slots hold defaults. Non-fatal.
    Partial(usize),
    /// All five failed. Everything is at defaults; the view shows a
    /// blocking error banner.
    Failed,
}

/// Outcome of one fetch cycle: the assembled data plus which endpoints
/// failed. Never an error itself — per-endpoint failures degrade, they do
/// not abort.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub data: DashboardData,
    pub failed: Vec<&'static str>,
    pub fetched_at: chrono::DateTime<Utc>,
}

impl FetchReport {
    pub fn status(&self) -> FetchStatus {
        match self.failed.len() {
            0 => FetchStatus::Complete,
            n if n >= ENDPOINT_COUNT => FetchStatus::Failed,
            n => FetchStatus::Partial(n),
        }
    }

    /// The banner text the dashboard shows, mirroring the severity split:
    /// partial failures warn, total failure blocks.
    pub fn warning(&self) -> Option<String> {
        match self.status() {
            FetchStatus::Complete => None,
            FetchStatus::Partial(n) => Some(format!(
                "{n} API request(s) failed. Some data may be incomplete."
            )),
            FetchStatus::Failed => {
                Some("Failed to fetch data. Please check your API connection.".to_string())
            }
        }
    }

    pub fn into_snapshot(self, range: DateRange) -> DashboardSnapshot {
        let warning = self.warning();
        DashboardSnapshot {
            range,
            data: self.data,
            warning,
            fetched_at: self.fetched_at,
        }
    }
}

/// Fans out the five dashboard requests for a date range and settles them
/// all, tolerating partial failure.
pub struct FetchCoordinator {
    client: Arc<BackendClient>,
}

impl FetchCoordinator {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// Issues all five requests concurrently and collects every outcome.
    /// A failed request resets its slot to the empty default and is recorded
    /// by endpoint name; nothing cancels or blocks the other requests.
    pub async fn fetch_dashboard(&self, range: &DateRange) -> FetchReport {
        debug!(
            target: "app::fetch",
            start = %range.start_param(),
            end = %range.end_param(),
            "fetching dashboard data"
        );

        let (git, asana, efforts, summary, analytics) = tokio::join!(
            self.client.git_report(range),
            self.client.asana_summary(),
            self.client.developer_efforts(range),
            self.client.developer_summary(range),
            self.client.analytics(range),
        );

        let mut data = DashboardData::default();
        let mut failed = Vec::new();

        match git {
            Ok(report) => data.git_report = report,
            Err(_) => failed.push("git/report"),
        }
        match asana {
            Ok(summary) => data.asana_summary = summary,
            Err(_) => failed.push("asana/summary"),
        }
        match efforts {
            Ok(records) => data.developer_efforts = records,
            Err(_) => failed.push("asana/efforts"),
        }
        match summary {
            Ok(value) => data.developer_summary = value,
            Err(_) => failed.push("asana/developer_summary"),
        }
        match analytics {
            Ok(report) => data.analytics = Some(report),
            Err(_) => failed.push("analytics"),
        }

        if !failed.is_empty() {
            warn!(
                target: "app::fetch",
                failed = failed.len(),
                endpoints = ?failed,
                "some dashboard requests failed"
            );
        }

        FetchReport {
            data,
            failed,
            fetched_at: Utc::now(),
        }
    }

    /// Invalidates the server-side caches, then re-runs the full fetch.
    /// Sequential: the fetch never overlaps the invalidation. A reload
    /// failure propagates without touching any data.
    pub async fn reload_dashboard(&self, range: &DateRange) -> AppResult<FetchReport> {
        self.client.reload_all().await?;
        Ok(self.fetch_dashboard(range).await)
    }

    /// Full cycle against a state container: claim a generation, fetch, and
    /// commit the snapshot unless a newer fetch has started since.
    pub async fn refresh(&self, state: &DashboardState, range: &DateRange) -> FetchStatus {
        let generation = state.begin_fetch();
        let report = self.fetch_dashboard(range).await;
        let status = report.status();

        if !state.commit(generation, report.into_snapshot(*range)) {
            debug!(target: "app::fetch", generation, "fetch superseded before commit");
        }

        status
    }
}
