//! Publishing steps.

use std::fmt;

/// Remote operation performed while publishing a change, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    /// Resolve the base branch tip and its tree.
    ResolveBaseRef,
    /// Store the new content.
    CreateBlob,
    /// Layer the blob over the base tree.
    CreateTree,
    /// Commit the tree on top of the base tip.
    CreateCommit,
    /// Point the new branch at the commit.
    CreateBranch,
    /// Open the pull request.
    CreatePullRequest,
}

impl PublishStep {
    /// Returns the step as a short description.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResolveBaseRef => "resolve base branch",
            Self::CreateBlob => "create blob",
            Self::CreateTree => "create tree",
            Self::CreateCommit => "create commit",
            Self::CreateBranch => "create branch",
            Self::CreatePullRequest => "create pull request",
        }
    }
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
