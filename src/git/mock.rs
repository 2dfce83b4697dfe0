use crate::error::{BumpError, Result};
use crate::git::{DiffStat, Repository};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations.
///
/// Worktree files, per-ref file trees and diff stats are populated by
/// the test; staged paths and commit messages are recorded for
/// assertions. Interior mutability keeps the trait's `&self` signatures.
pub struct MockRepository {
    files: RefCell<HashMap<PathBuf, String>>,
    ref_files: HashMap<String, HashMap<PathBuf, String>>,
    diff: Vec<DiffStat>,
    staged: RefCell<Vec<PathBuf>>,
    commits: RefCell<Vec<String>>,
    fetches: RefCell<u32>,
    fail_fetch: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            files: RefCell::new(HashMap::new()),
            ref_files: HashMap::new(),
            diff: Vec::new(),
            staged: RefCell::new(Vec::new()),
            commits: RefCell::new(Vec::new()),
            fetches: RefCell::new(0),
            fail_fetch: false,
        }
    }

    /// Add a tracked worktree file
    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    /// Add a file as it exists on a remote ref (e.g. "origin/live")
    pub fn add_ref_file(
        &mut self,
        refname: impl Into<String>,
        path: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) {
        self.ref_files
            .entry(refname.into())
            .or_default()
            .insert(path.into(), contents.into());
    }

    /// Add a diff stat entry
    pub fn add_diff(&mut self, added: u64, removed: u64, path: impl Into<PathBuf>) {
        self.diff.push(DiffStat::new(added, removed, path));
    }

    /// Make `fetch_from_remote` fail, simulating a network outage
    pub fn fail_fetch(&mut self) {
        self.fail_fetch = true;
    }

    /// Current content of a worktree file, if present
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Paths staged so far
    pub fn staged(&self) -> Vec<PathBuf> {
        self.staged.borrow().clone()
    }

    /// Messages of commits created so far
    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }

    /// Number of fetches performed
    pub fn fetch_count(&self) -> u32 {
        *self.fetches.borrow()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn diff_stats(&self) -> Result<Vec<DiffStat>> {
        Ok(self.diff.clone())
    }

    fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self.files.borrow().keys().cloned().collect();
        files.sort();
        Ok(files)
    }

    fn read_file_at_ref(&self, refname: &str, path: &Path) -> Result<Option<String>> {
        Ok(self
            .ref_files
            .get(refname)
            .and_then(|tree| tree.get(path))
            .cloned())
    }

    fn fetch_from_remote(&self, remote: &str) -> Result<()> {
        *self.fetches.borrow_mut() += 1;
        if self.fail_fetch {
            return Err(BumpError::remote(format!(
                "Cannot reach remote '{}'",
                remote
            )));
        }
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            BumpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))
        })
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn stage_paths(&self, paths: &[PathBuf]) -> Result<()> {
        self.staged.borrow_mut().extend(paths.iter().cloned());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.commits.borrow_mut().push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_worktree_round_trip() {
        let mut repo = MockRepository::new();
        repo.add_file("sale_ext/__manifest__.py", "{'version': '17.0.1.0.0'}");

        let path = Path::new("sale_ext/__manifest__.py");
        assert!(repo.read_file(path).unwrap().contains("17.0.1.0.0"));

        repo.write_file(path, "{'version': '17.0.1.0.1'}").unwrap();
        assert!(repo.file(path).unwrap().contains("17.0.1.0.1"));
    }

    #[test]
    fn test_mock_ref_files_absent_by_default() {
        let repo = MockRepository::new();
        let path = Path::new("sale_ext/__manifest__.py");
        assert_eq!(repo.read_file_at_ref("origin/live", path).unwrap(), None);
    }

    #[test]
    fn test_mock_records_stage_and_commit() {
        let repo = MockRepository::new();
        repo.stage_paths(&[PathBuf::from("a/__manifest__.py")]).unwrap();
        repo.commit("msg").unwrap();

        assert_eq!(repo.staged(), vec![PathBuf::from("a/__manifest__.py")]);
        assert_eq!(repo.commits(), vec!["msg".to_string()]);
    }

    #[test]
    fn test_mock_fetch_failure() {
        let mut repo = MockRepository::new();
        repo.fail_fetch();
        assert!(repo.fetch_from_remote("origin").is_err());
        assert_eq!(repo.fetch_count(), 1);
    }
}
