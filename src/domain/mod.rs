//! Domain logic - pure versioning rules independent of git operations

pub mod branch;
pub mod change;
pub mod version;

pub use branch::ProtectedBranch;
pub use change::{ChangeClass, FEATURE_THRESHOLD, PATCH_THRESHOLD};
pub use version::AddonVersion;
