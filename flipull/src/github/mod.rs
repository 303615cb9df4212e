//! Hosting service access.
//!
//! The publisher only ever talks to GitHub through the [`GitHost`] trait:
//! eight request/response operations over the Git Data, Contents and Pulls
//! APIs. [`OctocrabHost`] is the production implementation.

mod client;
mod error;
pub(crate) mod models;

pub use client::OctocrabHost;
pub use error::HostError;

use serde::Serialize;

/// Git mode of a regular, non-executable file.
pub const REGULAR_FILE_MODE: &str = "100644";

/// A single path entry of a tree to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// Path relative to the repository root.
    pub path: String,

    /// Git file mode (e.g., "100644").
    pub mode: String,

    /// Object type the entry points at.
    #[serde(rename = "type")]
    pub kind: String,

    /// SHA of the referenced blob.
    pub sha: String,
}

impl TreeEntry {
    /// Creates a regular-file entry pointing at `blob_sha`.
    ///
    /// Leading slashes are stripped, the Git Data API rejects absolute paths.
    pub fn file(path: &str, blob_sha: &str) -> Self {
        Self {
            path: path.trim_start_matches('/').to_string(),
            mode: REGULAR_FILE_MODE.to_string(),
            kind: "blob".to_string(),
            sha: blob_sha.to_string(),
        }
    }
}

/// Parameters for opening a pull request.
#[derive(Debug, Clone, Copy)]
pub struct NewPullRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    /// Branch containing the change.
    pub head: &'a str,
    /// Branch the change should be merged into.
    pub base: &'a str,
}

/// A pull request opened by [`GitHost::create_pull_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// GitHub PR number.
    pub number: u64,
    /// GitHub PR URL.
    pub url: String,
}

/// Remote operations the replacer depends on.
///
/// Implementations must be usable from several in-flight runs at once, so
/// they hold nothing but the authenticated client.
#[allow(async_fn_in_trait)]
pub trait GitHost {
    /// Resolves `refs/heads/{branch}` to the commit SHA it points at.
    async fn get_branch_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String, HostError>;

    /// Returns the tree SHA of a commit.
    async fn get_commit_tree(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> Result<String, HostError>;

    /// Reads a file at `reference`, a commit SHA or ref name, as UTF-8 text.
    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, HostError>;

    /// Stores `content` as a blob and returns its SHA.
    async fn create_blob(&self, owner: &str, repo: &str, content: &str)
        -> Result<String, HostError>;

    /// Creates a tree layered over `base_tree` and returns its SHA.
    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String, HostError>;

    /// Creates a commit object and returns its SHA.
    async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<String, HostError>;

    /// Creates `refs/heads/{branch}` at `commit_sha` and returns the full ref name.
    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        commit_sha: &str,
    ) -> Result<String, HostError>;

    /// Opens a pull request.
    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_request: NewPullRequest<'_>,
    ) -> Result<CreatedPullRequest, HostError>;
}
