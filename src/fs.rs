use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Trait defining the filesystem operations required by the library
pub trait FileSystem {
    /// Recursively list every regular file under `root`.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while walking. No partial listing is
    /// returned in that case.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Rename `from` to `to` without replacing an existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if `to` already exists or the rename fails
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
}

/// Implementation of [`FileSystem`] backed by the local disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        debug!(files_count = files.len(), "Directory walk completed");
        Ok(files)
    }

    #[instrument(skip(self), fields(from = %from.display(), to = %to.display()))]
    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        // rename(2) replaces an existing target on unix. Dangling symlinks count as existing.
        match std::fs::symlink_metadata(to) {
            Ok(_) => {
                debug!("Rename target already exists");
                return Err(Error::TargetExists(to.to_path_buf()));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        std::fs::rename(from, to)?;
        debug!("File renamed successfully");
        Ok(())
    }
}
