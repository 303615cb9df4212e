//! Orchestrates one edit across a set of repositories.

mod config;
mod error;

pub use config::{RunnerConfig, DEFAULT_CONCURRENCY};
pub use error::RunnerError;

use crate::github::{GitHost, OctocrabHost};
use crate::replacer::{ChangeRequest, ReplaceError, Replacer, RunOutcome};
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::TemplateRenderer;
use futures::stream::{self, StreamExt};
use tracing::{error, info};

/// Applies the configured edit to every configured repository.
///
/// Repositories are independent: each gets its own target branch, and one
/// failing does not stop the others.
pub struct Runner<H = OctocrabHost> {
    config: RunnerConfig,
    host: H,
    renderer: TemplateRenderer,
}

impl Runner<OctocrabHost> {
    /// Builds a runner talking to GitHub with the configured token.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let host = OctocrabHost::from_token(config.token(), config.api_url())?;
        Ok(Self::with_host(config, host))
    }
}

impl<H: GitHost> Runner<H> {
    /// Builds a runner using an existing host client.
    pub fn with_host(config: RunnerConfig, host: H) -> Self {
        Self {
            config,
            host,
            renderer: TemplateRenderer::new(),
        }
    }

    /// Processes all repositories, at most `concurrency` at a time.
    ///
    /// Results are reported in the order the repositories were given.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let repositories = self.config.repositories();
        if repositories.is_empty() {
            return Err(RunnerError::NoRepositories);
        }

        info!(
            count = repositories.len(),
            dry_run = self.config.dry_run(),
            path = %self.config.edit().path,
            "Processing repositories"
        );

        let results: Vec<ProcessingResult> = stream::iter(repositories)
            .map(|descriptor| self.process_repository(descriptor))
            .buffered(self.config.concurrency())
            .collect()
            .await;

        let mut summary = RunSummary::new(self.config.dry_run());
        for result in results {
            summary.record_result(result);
        }

        Ok(summary)
    }

    async fn process_repository(&self, descriptor: &str) -> ProcessingResult {
        match self.replace_in_repository(descriptor).await {
            Ok(outcome) => ProcessingResult::Completed {
                repository: descriptor.to_string(),
                outcome,
            },
            Err(e) if e.is_no_change() => {
                info!(repo = %descriptor, "No content changed");
                ProcessingResult::Unchanged {
                    repository: descriptor.to_string(),
                }
            }
            Err(e) => {
                error!(repo = %descriptor, error = %e, "Failed to process repository");
                ProcessingResult::Failed {
                    repository: descriptor.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    async fn replace_in_repository(&self, descriptor: &str) -> Result<RunOutcome, ReplaceError> {
        let request = ChangeRequest::new(
            descriptor,
            self.config.edit().clone(),
            self.config.dry_run(),
            self.config.skip_pull_request(),
        )?
        .render_metadata(&self.renderer)?;

        let replacer = Replacer::new(&self.host, request);
        match self.config.timeout() {
            // Dropping the timed-out future aborts the in-flight request.
            Some(timeout) => tokio::time::timeout(timeout, replacer.run())
                .await
                .map_err(|_| ReplaceError::DeadlineExceeded { timeout })?,
            None => replacer.run().await,
        }
    }
}
