//! Runner configuration.

use crate::config::ReplaceJob;
use crate::replacer::Edit;
use std::time::Duration;

/// Default number of repositories processed at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Configuration for applying one edit to a set of repositories.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub token used for API calls.
    token: String,
    /// GitHub API base URL, for GitHub Enterprise.
    api_url: Option<String>,
    /// Repository descriptors (`owner/repo[@branch]`).
    repositories: Vec<String>,
    /// The edit to apply.
    edit: Edit,
    /// Whether to preview changes without publishing.
    dry_run: bool,
    /// Whether to publish branches without pull requests.
    skip_pull_request: bool,
    /// Maximum repositories processed at once.
    concurrency: usize,
    /// Deadline for each repository's run.
    timeout: Option<Duration>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(token: String, repositories: Vec<String>, edit: Edit) -> Self {
        Self {
            token,
            api_url: None,
            repositories,
            edit,
            dry_run: false,
            skip_pull_request: false,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
        }
    }

    /// Creates a configuration from a job file's contents.
    pub fn from_job(token: String, job: &ReplaceJob) -> Self {
        Self::new(token, job.repositories.clone(), job.edit())
            .with_skip_pull_request(job.skip_pull_request)
    }

    /// Sets a custom GitHub API base URL.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        self.api_url = api_url;
        self
    }

    /// Replaces the repository list.
    pub fn with_repositories(mut self, repositories: Vec<String>) -> Self {
        self.repositories = repositories;
        self
    }

    /// Enables or disables preview mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables pull request creation.
    pub fn with_skip_pull_request(mut self, skip_pull_request: bool) -> Self {
        self.skip_pull_request = skip_pull_request;
        self
    }

    /// Sets the max repositories processed at once. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets the per-repository deadline.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the GitHub API base URL, if overridden.
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// Returns the repository descriptors.
    pub fn repositories(&self) -> &[String] {
        &self.repositories
    }

    /// Returns the edit to apply.
    pub fn edit(&self) -> &Edit {
        &self.edit
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether pull request creation is skipped.
    pub fn skip_pull_request(&self) -> bool {
        self.skip_pull_request
    }

    /// Returns the max repositories processed at once.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the per-repository deadline.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
