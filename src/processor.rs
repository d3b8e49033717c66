use crate::error::{Error, Result};
use crate::fs::{FileSystem, LocalFs};
use crate::logging;
use crate::transform::SuffixRule;
use crate::types::{Candidate, Mode, RenameOutcome, RunPhase, RunSummary};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

/// Finds `*.adoc.docx` files under a root directory and renames them
pub struct RenameProcessor<F = LocalFs> {
    fs: F,
    root: PathBuf,
    rule: SuffixRule,
}

impl RenameProcessor<LocalFs> {
    /// Create a processor working on the local filesystem
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist or is not a directory.
    pub fn new(root: &Path, rule: SuffixRule) -> Result<Self> {
        Self::with_fs(root, rule, LocalFs::new())
    }
}

impl<F: FileSystem> RenameProcessor<F> {
    /// Create a processor using the given [`FileSystem`] implementation
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist or is not a directory.
    #[instrument(skip(rule, fs), fields(root = %root.display()))]
    pub fn with_fs(root: &Path, rule: SuffixRule, fs: F) -> Result<Self> {
        if !root.exists() {
            return Err(Error::DirectoryNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        debug!(strategy = ?rule.strategy(), "Creating processor");
        Ok(Self {
            fs,
            root: root.to_path_buf(),
            rule,
        })
    }

    /// Walk the root and collect every file selected by the suffix rule.
    ///
    /// A failed walk yields no candidates at all, never a truncated list.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn scan(&self) -> Vec<Candidate> {
        let files = match self.fs.walk_files(&self.root) {
            Ok(files) => files,
            Err(err) => {
                error!("Error while walking directory: {err}");
                return Vec::new();
            }
        };

        let candidates: Vec<Candidate> = files
            .into_iter()
            .filter_map(|from| {
                let to = self.rule.apply(&from)?;
                Some(Candidate::new(from, to))
            })
            .collect();

        debug!(candidates_count = candidates.len(), "Scan completed");
        candidates
    }

    /// Report the intended renames without touching the filesystem
    #[must_use]
    pub fn preview(&self, candidates: &[Candidate]) -> RunSummary {
        let mut summary = RunSummary::new(Mode::Preview);
        summary.found = candidates.len();
        self.preview_into(&mut summary, candidates);
        summary
    }

    /// Rename every candidate in place, counting successes and failures.
    ///
    /// A failed rename is logged and the remaining candidates are still processed.
    #[must_use]
    pub fn execute(&self, candidates: &[Candidate]) -> RunSummary {
        let mut summary = RunSummary::new(Mode::Execute);
        summary.found = candidates.len();
        self.execute_into(&mut summary, candidates);
        summary
    }

    /// Scan the root and then preview or execute, depending on `mode`.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn run(&self, mode: Mode) -> RunSummary {
        info!("Processing directory: {}", self.root.display());
        info!("Start time: {}", logging::timestamp_now());

        let mut summary = RunSummary::new(mode);
        summary.advance(RunPhase::Scanning);
        let candidates = self.scan();
        summary.found = candidates.len();

        if candidates.is_empty() {
            info!("No matching files found");
            summary.advance(RunPhase::Done);
            return summary;
        }

        match mode {
            Mode::Preview => self.preview_into(&mut summary, &candidates),
            Mode::Execute => self.execute_into(&mut summary, &candidates),
        }

        info!("End time: {}", logging::timestamp_now());
        summary
    }

    #[instrument(skip_all, fields(candidates_count = candidates.len()))]
    fn preview_into(&self, summary: &mut RunSummary, candidates: &[Candidate]) {
        summary.advance(RunPhase::Previewing);

        info!("=== Preview mode ===");
        info!("Found {} file(s) to rename:", candidates.len());
        for candidate in candidates {
            info!("Would rename: {candidate}");
            summary.record(candidate.clone(), RenameOutcome::Previewed);
        }
        info!("=== Preview complete ===");

        summary.advance(RunPhase::Done);
    }

    #[instrument(skip_all, fields(candidates_count = candidates.len()))]
    fn execute_into(&self, summary: &mut RunSummary, candidates: &[Candidate]) {
        summary.advance(RunPhase::Executing);

        info!("=== Execute mode ===");
        for candidate in candidates {
            let outcome = match self.fs.rename(candidate.from_path(), candidate.to_path()) {
                Ok(()) => {
                    info!("Renamed: {candidate}");
                    RenameOutcome::Renamed
                }
                Err(err) => {
                    error!("Failed to rename {}: {err}", candidate.from_path().display());
                    RenameOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            summary.record(candidate.clone(), outcome);
        }
        info!("=== Execute complete ===");
        info!("Renamed: {} file(s)", summary.succeeded);
        info!("Failed: {} file(s)", summary.failed);

        summary.advance(RunPhase::Done);
    }
}
