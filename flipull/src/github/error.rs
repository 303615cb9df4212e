//! Hosting client error types.

use thiserror::Error;

/// Errors returned by a [`GitHost`](super::GitHost) operation.
#[derive(Debug, Error)]
pub enum HostError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The API answered, but not with something we can use.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },
}
