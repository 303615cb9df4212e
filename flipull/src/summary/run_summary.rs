//! Run summary types.

use super::result::ProcessingResult;
use crate::replacer::{PublishedChange, RunOutcome};

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of repositories processed.
    pub repositories_processed: usize,

    /// Number of changes published with a pull request.
    pub prs_created: usize,

    /// Number of changes published with the pull request skipped.
    pub published_without_pr: usize,

    /// Number of previews computed.
    pub previews: usize,

    /// Number of repositories where the file did not change.
    pub unchanged: usize,

    /// Number of repositories that failed.
    pub failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Per-repository results, in the order repositories were given.
    pub results: Vec<ProcessingResult>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: ProcessingResult) {
        self.repositories_processed += 1;
        match &result {
            ProcessingResult::Completed { outcome, .. } => match outcome {
                RunOutcome::Preview { .. } => self.previews += 1,
                RunOutcome::Published(PublishedChange {
                    pull_request: Some(_),
                    ..
                }) => self.prs_created += 1,
                RunOutcome::Published(PublishedChange {
                    pull_request: None,
                    ..
                }) => self.published_without_pr += 1,
            },
            ProcessingResult::Unchanged { .. } => self.unchanged += 1,
            ProcessingResult::Failed { .. } => self.failed += 1,
        }
        self.results.push(result);
    }

    /// Returns true if any repository failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns true if every processed repository was left unchanged.
    #[must_use]
    pub fn all_unchanged(&self) -> bool {
        self.repositories_processed > 0 && self.unchanged == self.repositories_processed
    }
}
