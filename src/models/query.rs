use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Inclusive date window sent to the backend as `start_date`/`end_date`
/// query parameters, both `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::validation(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The window ending today and starting `days` ago. The dashboard opens
    /// on `last_days(1)`.
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now().date_naive();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
            .map_err(|err| AppError::validation(format!("invalid start date {start:?}: {err}")))?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
            .map_err(|err| AppError::validation(format!("invalid end date {end:?}: {err}")))?;
        Self::new(start, end)
    }

    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::last_days(1)
    }
}

/// Developer dropdown selection: everything, or one raw developer name.
/// Names are matched exactly; no normalization across the Git and Asana
/// identities happens anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeveloperFilter {
    #[default]
    All,
    Named(String),
}

impl DeveloperFilter {
    /// The dropdown encodes "all developers" as the literal string "all".
    pub fn from_selection(selection: &str) -> Self {
        if selection == "all" {
            DeveloperFilter::All
        } else {
            DeveloperFilter::Named(selection.to_string())
        }
    }

    pub fn matches(&self, developer: &str) -> bool {
        match self {
            DeveloperFilter::All => true,
            DeveloperFilter::Named(name) => developer == name,
        }
    }
}
