//! Replacement run outcomes.

use crate::github::CreatedPullRequest;

/// A change that made it onto a new branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedChange {
    /// Branch holding the change.
    pub branch: String,

    /// SHA of the new commit.
    pub commit_sha: String,

    /// Pull request opened for the branch, unless skipped.
    pub pull_request: Option<CreatedPullRequest>,
}

/// Successful end state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Preview mode: nothing was published.
    Preview {
        /// Content the file would have after the change.
        content: String,
    },

    /// The change was published.
    Published(PublishedChange),
}
