use std::fmt;

/// The fixed set of deployment branches whose published addon versions
/// must never be regressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtectedBranch {
    Live,
    PreProd,
    Stage,
}

impl ProtectedBranch {
    pub const ALL: [ProtectedBranch; 3] = [
        ProtectedBranch::Live,
        ProtectedBranch::PreProd,
        ProtectedBranch::Stage,
    ];

    /// Branch name as it appears on the remote
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectedBranch::Live => "live",
            ProtectedBranch::PreProd => "pre-prod",
            ProtectedBranch::Stage => "stage",
        }
    }

    /// Remote-tracking ref for this branch (e.g. "origin/live")
    pub fn remote_ref(&self, remote: &str) -> String {
        format!("{}/{}", remote, self.as_str())
    }
}

impl fmt::Display for ProtectedBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
