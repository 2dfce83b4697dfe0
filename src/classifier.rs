//! Maps raw diff statistics to per-addon change classifications.

use crate::domain::ChangeClass;
use crate::git::DiffStat;
use crate::manifest::MANIFEST_FILE_NAME;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Aggregate change for one addon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddonChange {
    /// Summed added + removed lines across the addon's tracked files
    pub change_amount: u64,
    pub class: ChangeClass,
}

/// Classifies changed files into per-addon change magnitudes.
///
/// A file belongs to the addon whose directory is its nearest ancestor
/// holding a manifest. Only files under the tracked extensions count
/// towards an addon's change amount.
pub struct ChangeClassifier {
    addon_dirs: HashSet<PathBuf>,
    tracked_extensions: Vec<String>,
    patch_threshold: u64,
    feature_threshold: u64,
}

impl ChangeClassifier {
    pub fn new(
        addon_dirs: impl IntoIterator<Item = PathBuf>,
        tracked_extensions: Vec<String>,
        patch_threshold: u64,
        feature_threshold: u64,
    ) -> Self {
        ChangeClassifier {
            addon_dirs: addon_dirs.into_iter().collect(),
            tracked_extensions,
            patch_threshold,
            feature_threshold,
        }
    }

    /// Addon directories found in a tracked-file listing: the parent
    /// directory of every manifest file.
    pub fn discover_addon_dirs(tracked_files: &[PathBuf]) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = tracked_files
            .iter()
            .filter(|path| {
                path.file_name()
                    .map(|name| name == MANIFEST_FILE_NAME)
                    .unwrap_or(false)
            })
            .filter_map(|path| path.parent().map(Path::to_path_buf))
            .collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }

    fn is_tracked_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.tracked_extensions.iter().any(|t| t == ext))
            .unwrap_or(false)
    }

    /// Nearest ancestor directory of `path` that holds a manifest
    fn addon_for(&self, path: &Path) -> Option<PathBuf> {
        path.ancestors()
            .skip(1)
            .find(|dir| self.addon_dirs.contains(*dir))
            .map(Path::to_path_buf)
    }

    /// Group diff stats by addon and classify each addon's aggregate
    /// change amount. Addons with no tracked changes are absent from
    /// the result.
    pub fn classify(&self, stats: &[DiffStat]) -> BTreeMap<PathBuf, AddonChange> {
        let mut amounts: BTreeMap<PathBuf, u64> = BTreeMap::new();

        for stat in stats {
            if !self.is_tracked_extension(&stat.path) {
                continue;
            }
            if let Some(addon) = self.addon_for(&stat.path) {
                *amounts.entry(addon).or_insert(0) += stat.total();
            }
        }

        amounts
            .into_iter()
            .map(|(addon, change_amount)| {
                let class = ChangeClass::for_amount(
                    change_amount,
                    self.patch_threshold,
                    self.feature_threshold,
                );
                (
                    addon,
                    AddonChange {
                        change_amount,
                        class,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FEATURE_THRESHOLD, PATCH_THRESHOLD};

    fn classifier(dirs: &[&str]) -> ChangeClassifier {
        ChangeClassifier::new(
            dirs.iter().map(PathBuf::from),
            vec![
                "py".to_string(),
                "xml".to_string(),
                "csv".to_string(),
                "po".to_string(),
            ],
            PATCH_THRESHOLD,
            FEATURE_THRESHOLD,
        )
    }

    #[test]
    fn test_discover_addon_dirs() {
        let tracked = vec![
            PathBuf::from("sale_ext/__manifest__.py"),
            PathBuf::from("sale_ext/models/sale.py"),
            PathBuf::from("stock_ext/__manifest__.py"),
            PathBuf::from("README.md"),
        ];
        let dirs = ChangeClassifier::discover_addon_dirs(&tracked);
        assert_eq!(
            dirs,
            vec![PathBuf::from("sale_ext"), PathBuf::from("stock_ext")]
        );
    }

    #[test]
    fn test_untracked_extensions_ignored() {
        let c = classifier(&["sale_ext"]);
        let stats = vec![
            DiffStat::new(500, 0, "sale_ext/README.md"),
            DiffStat::new(3, 1, "sale_ext/models/sale.py"),
        ];
        let changes = c.classify(&stats);
        let change = changes.get(Path::new("sale_ext")).unwrap();
        assert_eq!(change.change_amount, 4);
        assert_eq!(change.class, ChangeClass::Fix);
    }

    #[test]
    fn test_files_grouped_under_nearest_addon() {
        let c = classifier(&["addons/sale_ext", "addons/sale_ext/sub_addon"]);
        let stats = vec![
            DiffStat::new(10, 0, "addons/sale_ext/models/sale.py"),
            DiffStat::new(7, 0, "addons/sale_ext/sub_addon/models/a.py"),
        ];
        let changes = c.classify(&stats);
        assert_eq!(
            changes
                .get(Path::new("addons/sale_ext"))
                .unwrap()
                .change_amount,
            10
        );
        assert_eq!(
            changes
                .get(Path::new("addons/sale_ext/sub_addon"))
                .unwrap()
                .change_amount,
            7
        );
    }

    #[test]
    fn test_amounts_sum_numerically_across_files() {
        // 9 + 10 must be 19, never the string "910"
        let c = classifier(&["sale_ext"]);
        let stats = vec![
            DiffStat::new(9, 0, "sale_ext/models/a.py"),
            DiffStat::new(10, 0, "sale_ext/views/b.xml"),
        ];
        let changes = c.classify(&stats);
        assert_eq!(
            changes.get(Path::new("sale_ext")).unwrap().change_amount,
            19
        );
    }

    #[test]
    fn test_threshold_boundaries() {
        let c = classifier(&["a"]);

        let exactly_fifty = vec![DiffStat::new(25, 25, "a/m.py")];
        assert_eq!(
            c.classify(&exactly_fifty).get(Path::new("a")).unwrap().class,
            ChangeClass::Feature
        );

        let ninety_nine = vec![DiffStat::new(99, 0, "a/m.py")];
        assert_eq!(
            c.classify(&ninety_nine).get(Path::new("a")).unwrap().class,
            ChangeClass::Feature
        );

        let exactly_hundred = vec![DiffStat::new(60, 40, "a/m.py")];
        assert_eq!(
            c.classify(&exactly_hundred)
                .get(Path::new("a"))
                .unwrap()
                .class,
            ChangeClass::Breaking
        );
    }

    #[test]
    fn test_files_outside_any_addon_ignored() {
        let c = classifier(&["sale_ext"]);
        let stats = vec![DiffStat::new(200, 0, "scripts/deploy.py")];
        assert!(c.classify(&stats).is_empty());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let c = classifier(&["sale_ext"]);
        let stats = vec![
            DiffStat::new(30, 25, "sale_ext/models/sale.py"),
            DiffStat::new(5, 0, "sale_ext/i18n/de.po"),
        ];
        let first = c.classify(&stats);
        let second = c.classify(&stats);
        assert_eq!(first, second);
    }
}
