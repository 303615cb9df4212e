//! Runner error types.

/// Errors that stop a whole run before any repository is processed.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Job file loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Nothing to process.
    #[error("No repositories given")]
    NoRepositories,
}
