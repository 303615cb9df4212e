//! Replacer error types.

use super::PublishStep;
use crate::github::HostError;
use crate::templates::TemplateError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can end a replacement run.
#[derive(Debug, Error)]
pub enum ReplaceError {
    /// The `owner/repo[@branch]` descriptor is malformed.
    #[error("Invalid repository '{descriptor}': {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },

    /// The substitution left the file unchanged.
    #[error("No content changed")]
    NoContentChange,

    /// The file could not be read from the base branch.
    #[error("Failed to fetch '{path}': {source}")]
    ContentFetchFailed {
        path: String,
        #[source]
        source: HostError,
    },

    /// A publishing step failed; later steps were not attempted.
    #[error("Failed to {step}: {source}")]
    RemoteOperationFailed {
        step: PublishStep,
        #[source]
        source: HostError,
    },

    /// Pull request title or description could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The run did not finish before its deadline.
    #[error("Run exceeded its deadline of {timeout:?}")]
    DeadlineExceeded { timeout: Duration },
}

impl ReplaceError {
    /// Returns true for the benign "nothing to do" outcome.
    #[must_use]
    pub fn is_no_change(&self) -> bool {
        matches!(self, Self::NoContentChange)
    }
}
