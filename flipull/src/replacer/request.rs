//! Change request definition.

use super::ReplaceError;
use crate::repository::RepositoryTarget;
use crate::templates::{TemplateError, TemplateRenderer};

/// The edit to apply, independent of any repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Path of the file to change, relative to the repository root.
    pub path: String,

    /// Literal text to search for.
    pub find: String,

    /// Text to put in its place.
    pub replace: String,

    /// Maximum number of replacements; zero or less replaces all.
    pub limit: i64,

    /// Pull request title.
    pub title: String,

    /// Pull request body, also used as the commit message.
    pub description: String,
}

/// A single replacement against a single repository.
#[derive(Debug, Clone)]
pub struct ChangeRequest {
    /// Repository, base branch and target branch.
    pub repository: RepositoryTarget,

    /// The edit to apply.
    pub edit: Edit,

    /// Only compute the new content; publish nothing.
    pub preview_only: bool,

    /// Publish the branch without opening a pull request.
    pub skip_pull_request: bool,
}

impl ChangeRequest {
    /// Resolves `descriptor` and builds a request for it.
    ///
    /// # Errors
    ///
    /// Returns [`ReplaceError::InvalidDescriptor`] if the descriptor is malformed.
    pub fn new(
        descriptor: &str,
        edit: Edit,
        preview_only: bool,
        skip_pull_request: bool,
    ) -> Result<Self, ReplaceError> {
        Ok(Self {
            repository: RepositoryTarget::parse(descriptor)?,
            edit,
            preview_only,
            skip_pull_request,
        })
    }

    /// Renders the title and description as templates against this request.
    ///
    /// # Errors
    ///
    /// Returns an error if either template is invalid or references an
    /// unknown variable.
    pub fn render_metadata(mut self, renderer: &TemplateRenderer) -> Result<Self, TemplateError> {
        let title = renderer.render(&self.edit.title, &self)?;
        let description = renderer.render(&self.edit.description, &self)?;
        self.edit.title = title;
        self.edit.description = description;
        Ok(self)
    }
}
