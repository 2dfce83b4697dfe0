use crate::error::{BumpError, Result};
use crate::git::{DiffStat, Repository};
use git2::{ErrorCode, Patch, Repository as Git2Repo};
use std::fs;
use std::path::{Path, PathBuf};

/// Real git backend on top of the `git2` crate
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository starting from `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository { repo })
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| BumpError::config("repository has no work directory (bare repo)"))
    }
}

impl Repository for Git2Repository {
    fn diff_stats(&self) -> Result<Vec<DiffStat>> {
        let head_tree = self.repo.head()?.peel_to_tree()?;
        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&head_tree), None)?;

        let mut stats = Vec::new();
        for idx in 0..diff.deltas().len() {
            let path = match diff.get_delta(idx).and_then(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(Path::to_path_buf)
            }) {
                Some(path) => path,
                None => continue,
            };

            // Binary files produce no patch
            if let Some(patch) = Patch::from_diff(&diff, idx)? {
                let (_context, additions, deletions) = patch.line_stats()?;
                stats.push(DiffStat::new(additions as u64, deletions as u64, path));
            }
        }

        Ok(stats)
    }

    fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        let index = self.repo.index()?;
        let files = index
            .iter()
            .map(|entry| PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned()))
            .collect();
        Ok(files)
    }

    fn read_file_at_ref(&self, refname: &str, path: &Path) -> Result<Option<String>> {
        let spec = format!("{}:{}", refname, path.display());
        let object = match self.repo.revparse_single(&spec) {
            Ok(object) => object,
            // Missing branch and missing path inside an existing branch
            // are both valid absent states.
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) if e.code() == ErrorCode::InvalidSpec => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match object.as_blob() {
            Some(blob) => Ok(Some(String::from_utf8_lossy(blob.content()).into_owned())),
            None => Ok(None),
        }
    }

    fn fetch_from_remote(&self, remote: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| BumpError::remote(format!("Cannot find remote: {}", e)))?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) =
                    git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }
            git2::Cred::default()
        });

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        // Empty refspec list fetches the remote's configured refspecs,
        // refreshing every remote-tracking branch in one round trip.
        remote
            .fetch(&[] as &[&str], Some(&mut fetch_options), None)
            .map_err(|e| BumpError::remote(format!("Fetch failed: {}", e)))?;

        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        let full = self.workdir()?.join(path);
        Ok(fs::read_to_string(full)?)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        let full = self.workdir()?.join(path);
        fs::write(full, contents)?;
        Ok(())
    }

    fn stage_paths(&self, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let signature = self.repo.signature()?;
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(())
    }
}
