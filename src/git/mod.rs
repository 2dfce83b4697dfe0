//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git backend,
//! allowing for a real implementation on top of the `git2` crate and a
//! mock implementation for testing.
//!
//! The core decision logic never shells out or touches `git2` types
//! directly; it only sees the [Repository] trait. All paths exchanged
//! through the trait are relative to the repository work directory.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Per-file line-change counts from a diff against HEAD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffStat {
    /// Lines added in this file
    pub added: u64,
    /// Lines removed from this file
    pub removed: u64,
    /// File path relative to the repository root
    pub path: PathBuf,
}

impl DiffStat {
    pub fn new(added: u64, removed: u64, path: impl Into<PathBuf>) -> Self {
        DiffStat {
            added,
            removed,
            path: path.into(),
        }
    }

    /// Total churn for this file
    pub fn total(&self) -> u64 {
        self.added + self.removed
    }
}

/// Common git operation trait for abstraction.
///
/// Implementations map their underlying errors to
/// [crate::error::BumpError] variants: fetch problems to `Remote`,
/// everything else to `Git` or `Io`.
pub trait Repository {
    /// Per-file line statistics of uncommitted changes (worktree and
    /// index) against HEAD.
    fn diff_stats(&self) -> Result<Vec<DiffStat>>;

    /// All files tracked by the repository, relative to its root.
    /// Used to discover addon manifests.
    fn tracked_files(&self) -> Result<Vec<PathBuf>>;

    /// Content of `path` as it exists at `refname` (e.g. "origin/live").
    ///
    /// Returns `Ok(None)` when the ref or the path inside it does not
    /// exist; a branch that has never been pushed is an expected state,
    /// not an error.
    fn read_file_at_ref(&self, refname: &str, path: &Path) -> Result<Option<String>>;

    /// Refresh remote-tracking branches from `remote`. Must be called
    /// at most once per run, before any `read_file_at_ref`.
    fn fetch_from_remote(&self, remote: &str) -> Result<()>;

    /// Read a file from the work directory
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Overwrite a file in the work directory
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;

    /// Add the given paths to the index
    fn stage_paths(&self, paths: &[PathBuf]) -> Result<()>;

    /// Commit the index on HEAD with the given message
    fn commit(&self, message: &str) -> Result<()>;
}
