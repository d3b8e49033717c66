use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A file selected by the scan, paired with the path it would be renamed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub from: PathBuf,
    #[serde(serialize_with = "serialize_path_lossy")]
    pub to: PathBuf,
}

fn serialize_path_lossy<S: serde::Serializer>(
    path: &Path,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

impl Candidate {
    #[must_use]
    pub fn new(from: PathBuf, to: PathBuf) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn from_path(&self) -> &Path {
        &self.from
    }

    #[must_use]
    pub fn to_path(&self) -> &Path {
        &self.to
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.display(), self.to.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Report intended renames without touching the filesystem
    Preview,
    /// Perform the renames
    Execute,
}

/// Lifecycle of a single run. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Scanning,
    Previewing,
    Executing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    Previewed,
    Renamed,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameRecord {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub outcome: RenameOutcome,
}

/// Aggregated result of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub mode: Mode,
    pub phase: RunPhase,
    pub found: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub records: Vec<RenameRecord>,
}

impl RunSummary {
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            phase: RunPhase::Idle,
            found: 0,
            succeeded: 0,
            failed: 0,
            records: Vec::new(),
        }
    }

    /// Move to `next`. Returns `false` and keeps the current phase when `next`
    /// is not ahead of it.
    pub fn advance(&mut self, next: RunPhase) -> bool {
        if next <= self.phase {
            return false;
        }
        tracing::debug!(from = ?self.phase, to = ?next, "Run phase changed");
        self.phase = next;
        true
    }

    pub fn record(&mut self, candidate: Candidate, outcome: RenameOutcome) {
        match outcome {
            RenameOutcome::Previewed => {}
            RenameOutcome::Renamed => self.succeeded += 1,
            RenameOutcome::Failed { .. } => self.failed += 1,
        }
        self.records.push(RenameRecord { candidate, outcome });
    }
}
