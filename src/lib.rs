pub use error::{Error, Result};
pub use fs::{FileSystem, LocalFs};
pub use transform::{ReplaceStrategy, SuffixRule};
pub use types::{Candidate, Mode, RenameOutcome, RenameRecord, RunPhase, RunSummary};

use std::path::Path;

mod error;
mod fs;
pub mod logging;
pub mod processor;
pub mod transform;
mod types;

/// Creates a new `RenameProcessor` for a directory on the local filesystem.
///
/// # Arguments
///
/// * `root`: Directory to scan recursively for `*.adoc.docx` files.
/// * `strategy`: How the suffix is rewritten inside a matched filename.
///
/// # Errors
///
/// Returns an error if `root` does not exist or is not a directory.
pub fn new(
    root: &Path,
    strategy: ReplaceStrategy,
) -> Result<processor::RenameProcessor<LocalFs>> {
    processor::RenameProcessor::new(root, SuffixRule::new(strategy))
}
