use std::fmt;

/// Below this many changed lines a change is a fix.
pub const PATCH_THRESHOLD: u64 = 50;

/// At or above `PATCH_THRESHOLD` and below this, a feature; at or above
/// this, a breaking change.
pub const FEATURE_THRESHOLD: u64 = 100;

/// Discrete change magnitude driving which version component increments.
///
/// Totally ordered: `Fix < Feature < Breaking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeClass {
    Fix,
    Feature,
    Breaking,
}

impl ChangeClass {
    /// Classify an aggregate changed-line count against the two
    /// thresholds. Thresholds are inclusive on the upper class: exactly
    /// `patch_threshold` lines is a feature, exactly `feature_threshold`
    /// lines is breaking.
    pub fn for_amount(amount: u64, patch_threshold: u64, feature_threshold: u64) -> Self {
        if amount >= feature_threshold {
            ChangeClass::Breaking
        } else if amount >= patch_threshold {
            ChangeClass::Feature
        } else {
            ChangeClass::Fix
        }
    }
}

impl fmt::Display for ChangeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeClass::Fix => "fix",
            ChangeClass::Feature => "feature",
            ChangeClass::Breaking => "breaking",
        };
        write!(f, "{}", name)
    }
}
