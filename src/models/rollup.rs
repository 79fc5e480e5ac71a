use serde::Serialize;

/// Per-developer aggregate over the commit feed. Derived on every fetch or
/// filter change, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeveloperRollup {
    pub developer: String,
    pub commits: usize,
    pub added: i64,
    pub deleted: i64,
    pub files: i64,
    /// Count of distinct repositories the developer touched.
    pub repos: usize,
    /// Most recent commit time in epoch milliseconds; a true chronological
    /// max, independent of feed order.
    pub last_commit: Option<i64>,
    pub last_commit_message: String,
    pub last_commit_link: String,
}

impl DeveloperRollup {
    pub(crate) fn new(developer: String) -> Self {
        Self {
            developer,
            commits: 0,
            added: 0,
            deleted: 0,
            files: 0,
            repos: 0,
            last_commit: None,
            last_commit_message: String::new(),
            last_commit_link: String::new(),
        }
    }
}
