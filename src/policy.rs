//! Version increment decisions.
//!
//! Combines the current manifest version, the classified change and the
//! protected-branch reference versions into a single outcome per addon.

use crate::domain::{AddonVersion, ChangeClass, ProtectedBranch};
use std::collections::BTreeMap;

/// Decision for one addon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Bump to this version and rewrite the manifest
    Proceed(AddonVersion),
    /// The working version has not advanced past a published one; a
    /// previous run already incremented it for this change. Bumping
    /// again would desynchronize from what was shipped.
    SkipAlreadyReleased {
        branch: ProtectedBranch,
        reference: AddonVersion,
    },
}

/// Decide whether and how to bump an addon.
///
/// The comparison is made against the pre-increment `current` version:
/// a locally incremented version that is already strictly ahead of
/// every present reference is bumped again only by this fresh change,
/// never double-bumped. Comparison is numeric over the full 5-tuple.
pub fn decide(
    current: AddonVersion,
    class: ChangeClass,
    references: &BTreeMap<ProtectedBranch, Option<AddonVersion>>,
) -> Outcome {
    for (&branch, reference) in references {
        if let Some(reference) = *reference {
            if current <= reference {
                return Outcome::SkipAlreadyReleased { branch, reference };
            }
        }
    }

    Outcome::Proceed(current.bump(class))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(
        live: Option<&str>,
        pre_prod: Option<&str>,
        stage: Option<&str>,
    ) -> BTreeMap<ProtectedBranch, Option<AddonVersion>> {
        let parse = |v: Option<&str>| v.map(|s| AddonVersion::parse(s).unwrap());
        let mut map = BTreeMap::new();
        map.insert(ProtectedBranch::Live, parse(live));
        map.insert(ProtectedBranch::PreProd, parse(pre_prod));
        map.insert(ProtectedBranch::Stage, parse(stage));
        map
    }

    fn v(s: &str) -> AddonVersion {
        AddonVersion::parse(s).unwrap()
    }

    #[test]
    fn test_proceed_when_no_references_exist() {
        let outcome = decide(v("17.0.2.4.1"), ChangeClass::Fix, &refs(None, None, None));
        assert_eq!(outcome, Outcome::Proceed(v("17.0.2.4.2")));
    }

    #[test]
    fn test_proceed_when_ahead_of_all_references() {
        let outcome = decide(
            v("17.0.2.4.1"),
            ChangeClass::Feature,
            &refs(Some("17.0.2.4.0"), Some("17.0.2.3.9"), Some("17.0.2.4.0")),
        );
        assert_eq!(outcome, Outcome::Proceed(v("17.0.2.5.0")));
    }

    #[test]
    fn test_skip_when_equal_to_live() {
        // Equal means a previous run already shipped this version
        let outcome = decide(
            v("17.0.2.4.1"),
            ChangeClass::Fix,
            &refs(Some("17.0.2.4.1"), None, None),
        );
        assert_eq!(
            outcome,
            Outcome::SkipAlreadyReleased {
                branch: ProtectedBranch::Live,
                reference: v("17.0.2.4.1"),
            }
        );
    }

    #[test]
    fn test_skip_when_behind_any_single_branch() {
        let outcome = decide(
            v("17.0.2.4.1"),
            ChangeClass::Breaking,
            &refs(Some("17.0.2.4.0"), None, Some("17.0.3.0.0")),
        );
        assert_eq!(
            outcome,
            Outcome::SkipAlreadyReleased {
                branch: ProtectedBranch::Stage,
                reference: v("17.0.3.0.0"),
            }
        );
    }

    #[test]
    fn test_comparison_is_numeric_not_textual() {
        // current z=10 is ahead of reference z=9, even though the
        // strings would order the other way
        let outcome = decide(
            v("17.0.2.4.10"),
            ChangeClass::Fix,
            &refs(Some("17.0.2.4.9"), None, None),
        );
        assert_eq!(outcome, Outcome::Proceed(v("17.0.2.4.11")));
    }

    #[test]
    fn test_comparison_uses_pre_increment_version() {
        // Reference sits exactly where the candidate would land; the
        // decision only looks at the current version, which is ahead of
        // nothing published, so the bump proceeds.
        let outcome = decide(
            v("17.0.2.4.1"),
            ChangeClass::Fix,
            &refs(Some("17.0.2.4.0"), None, None),
        );
        assert_eq!(outcome, Outcome::Proceed(v("17.0.2.4.2")));
    }

    #[test]
    fn test_proceed_outcome_beats_every_reference() {
        // Safety invariant: a Proceed result is strictly greater than
        // every present reference version
        let references = refs(Some("17.0.2.4.0"), Some("17.0.2.3.0"), Some("17.0.1.9.9"));
        for class in [ChangeClass::Fix, ChangeClass::Feature, ChangeClass::Breaking] {
            match decide(v("17.0.2.4.1"), class, &references) {
                Outcome::Proceed(new_version) => {
                    for reference in references.values().flatten() {
                        assert!(new_version > *reference);
                    }
                }
                Outcome::SkipAlreadyReleased { .. } => panic!("expected proceed"),
            }
        }
    }
}
