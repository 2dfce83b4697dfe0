//! Run orchestration: discover, classify, decide, persist, commit.

use crate::classifier::ChangeClassifier;
use crate::config::Config;
use crate::domain::{AddonVersion, ChangeClass, ProtectedBranch};
use crate::error::Result;
use crate::git::Repository;
use crate::manifest::{self, MANIFEST_FILE_NAME};
use crate::oracle::BranchVersionOracle;
use crate::policy::{self, Outcome};
use std::path::PathBuf;

/// An addon whose manifest was (or, in dry-run, would be) rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpedAddon {
    pub addon: PathBuf,
    pub old_version: AddonVersion,
    pub new_version: AddonVersion,
    pub class: ChangeClass,
    pub change_amount: u64,
}

/// An addon left alone because a protected branch already carries its
/// current version or a later one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAddon {
    pub addon: PathBuf,
    pub current_version: AddonVersion,
    pub branch: ProtectedBranch,
    pub reference_version: AddonVersion,
}

/// An addon dropped from the run because its manifest version could not
/// be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAddon {
    pub addon: PathBuf,
    pub reason: String,
}

/// Everything that happened (or would happen) during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub bumped: Vec<BumpedAddon>,
    pub skipped: Vec<SkippedAddon>,
    pub failed: Vec<FailedAddon>,
    pub committed: bool,
}

impl RunReport {
    /// True when no addon had tracked changes
    pub fn is_noop(&self) -> bool {
        self.bumped.is_empty() && self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Drives one full version-governance run over a repository.
///
/// All per-run state lives on this struct and the report it returns;
/// nothing is accumulated globally between runs.
pub struct ReleaseCoordinator<'a, R: Repository> {
    repo: &'a R,
    config: &'a Config,
}

impl<'a, R: Repository> ReleaseCoordinator<'a, R> {
    pub fn new(repo: &'a R, config: &'a Config) -> Self {
        ReleaseCoordinator { repo, config }
    }

    /// Execute a run. With `dry_run` the full decision pass happens but
    /// no manifest is written, staged or committed.
    ///
    /// Remote state is refreshed exactly once, before the first
    /// reference read, so every addon is compared against the same
    /// branch snapshot. A fetch failure aborts the run; a malformed
    /// manifest only drops that addon.
    pub fn run(&self, dry_run: bool) -> Result<RunReport> {
        let mut report = RunReport::default();

        let tracked = self.repo.tracked_files()?;
        let addon_dirs = ChangeClassifier::discover_addon_dirs(&tracked);
        let classifier = ChangeClassifier::new(
            addon_dirs,
            self.config.tracked_extensions.clone(),
            self.config.patch_threshold,
            self.config.feature_threshold,
        );

        let stats = self.repo.diff_stats()?;
        let changes = classifier.classify(&stats);
        if changes.is_empty() {
            return Ok(report);
        }

        self.repo.fetch_from_remote(&self.config.remote)?;
        let oracle = BranchVersionOracle::new(self.repo, &self.config.remote);

        let mut staged_paths = Vec::new();
        for (addon, change) in &changes {
            let manifest_path = addon.join(MANIFEST_FILE_NAME);
            let content = self.repo.read_file(&manifest_path)?;

            let current = match manifest::parse_version(&content) {
                Ok(current) => current,
                Err(e) => {
                    report.failed.push(FailedAddon {
                        addon: addon.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let references = oracle.reference_versions(addon)?;
            match policy::decide(current, change.class, &references) {
                Outcome::Proceed(new_version) => {
                    if !dry_run {
                        let updated = manifest::substitute_version(&content, &new_version)?;
                        self.repo.write_file(&manifest_path, &updated)?;
                        staged_paths.push(manifest_path);
                    }
                    report.bumped.push(BumpedAddon {
                        addon: addon.clone(),
                        old_version: current,
                        new_version,
                        class: change.class,
                        change_amount: change.change_amount,
                    });
                }
                Outcome::SkipAlreadyReleased { branch, reference } => {
                    report.skipped.push(SkippedAddon {
                        addon: addon.clone(),
                        current_version: current,
                        branch,
                        reference_version: reference,
                    });
                }
            }
        }

        if !staged_paths.is_empty() {
            self.repo.stage_paths(&staged_paths)?;
            self.repo.commit(&self.config.commit_message)?;
            report.committed = true;
        }

        Ok(report)
    }
}
