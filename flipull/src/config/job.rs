//! Replace job deserialization.

use crate::config::ConfigError;
use crate::replacer::Edit;
use crate::templates::{DEFAULT_DESCRIPTION_FORMAT, DEFAULT_TITLE_FORMAT};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Parsed contents of a job file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReplaceJob {
    /// Repository descriptors (`owner/repo[@branch]`).
    pub repositories: Vec<String>,

    /// File to edit in every repository.
    pub path: String,

    /// Literal text to search for.
    pub find: String,

    /// Replacement text.
    pub replace: String,

    /// Maximum replacements per file (defaults to all).
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Pull request title template.
    #[serde(default = "default_title")]
    pub title: String,

    /// Pull request description and commit message template.
    #[serde(default = "default_description")]
    pub description: String,

    /// Publish branches without opening pull requests.
    #[serde(default)]
    pub skip_pull_request: bool,
}

/// Replace every occurrence.
fn default_limit() -> i64 {
    -1
}

fn default_title() -> String {
    DEFAULT_TITLE_FORMAT.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION_FORMAT.to_string()
}

impl ReplaceJob {
    /// Loads a job from a TOML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, invalid, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading job");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let job: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        job.validate(path)?;
        Ok(job)
    }

    /// Validates field values that TOML parsing cannot check.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::ValidationError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if self.repositories.is_empty() {
            return Err(invalid("repositories must list at least one repository"));
        }
        if self.repositories.iter().any(|r| r.trim().is_empty()) {
            return Err(invalid("repositories must not contain empty entries"));
        }
        if self.path.trim().is_empty() {
            return Err(invalid("path must not be empty"));
        }
        if self.find.is_empty() {
            return Err(invalid("find must not be empty"));
        }

        Ok(())
    }

    /// Returns the edit described by this job.
    #[must_use]
    pub fn edit(&self) -> Edit {
        Edit {
            path: self.path.clone(),
            find: self.find.clone(),
            replace: self.replace.clone(),
            limit: self.limit,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}
