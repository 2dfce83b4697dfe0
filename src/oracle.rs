//! Reads the addon versions currently published on protected branches.

use crate::domain::{AddonVersion, ProtectedBranch};
use crate::error::Result;
use crate::git::Repository;
use crate::manifest::{self, MANIFEST_FILE_NAME};
use std::collections::BTreeMap;
use std::path::Path;

/// Retrieves per-addon reference versions from the remote-tracking
/// protected branches. Expects remotes to have been refreshed once,
/// before the first read.
pub struct BranchVersionOracle<'a, R: Repository> {
    repo: &'a R,
    remote: &'a str,
}

impl<'a, R: Repository> BranchVersionOracle<'a, R> {
    pub fn new(repo: &'a R, remote: &'a str) -> Self {
        BranchVersionOracle { repo, remote }
    }

    /// Version of the addon's manifest on one protected branch.
    ///
    /// Absence of the branch, of the addon on that branch, or of a
    /// parseable version field are all reported as `Ok(None)`: a branch
    /// that has never seen this addon is an expected state.
    pub fn version_on_branch(
        &self,
        branch: ProtectedBranch,
        addon_dir: &Path,
    ) -> Result<Option<AddonVersion>> {
        let refname = branch.remote_ref(self.remote);
        let manifest_path = addon_dir.join(MANIFEST_FILE_NAME);

        let content = match self.repo.read_file_at_ref(&refname, &manifest_path)? {
            Some(content) => content,
            None => return Ok(None),
        };

        Ok(manifest::parse_version(&content).ok())
    }

    /// Reference versions of one addon across all protected branches
    pub fn reference_versions(
        &self,
        addon_dir: &Path,
    ) -> Result<BTreeMap<ProtectedBranch, Option<AddonVersion>>> {
        let mut references = BTreeMap::new();
        for branch in ProtectedBranch::ALL {
            references.insert(branch, self.version_on_branch(branch, addon_dir)?);
        }
        Ok(references)
    }
}
