use serde::{Deserialize, Serialize};

/// One commit as reported by the Git history service. There is no unique id
/// in this feed; `(developer, timestamp, repo)` identifies a commit
/// implicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commit {
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub repo: String,
    /// Epoch seconds.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub added: i64,
    #[serde(default)]
    pub deleted: i64,
    #[serde(default)]
    pub files: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GitReport {
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub count: usize,
}

impl GitReport {
    /// The report carries its own count; fall back to the commit list when
    /// the backend left it at zero.
    pub fn total_commits(&self) -> usize {
        if self.count > 0 {
            self.count
        } else {
            self.commits.len()
        }
    }
}
