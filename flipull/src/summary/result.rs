//! Processing result types.

use crate::replacer::RunOutcome;

/// Result of processing a single repository.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// The run finished: previewed or published.
    Completed {
        /// Repository descriptor as given.
        repository: String,
        /// What the run did.
        outcome: RunOutcome,
    },

    /// The substitution did not change the file.
    Unchanged {
        /// Repository descriptor as given.
        repository: String,
    },

    /// Processing failed.
    Failed {
        /// Repository descriptor as given.
        repository: String,
        /// Error message.
        error: String,
    },
}

impl ProcessingResult {
    /// Returns the repository descriptor this result belongs to.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::Completed { repository, .. }
            | Self::Unchanged { repository }
            | Self::Failed { repository, .. } => repository,
        }
    }
}
