//! Job file loading.
//!
//! A job file describes one edit applied to many repositories:
//!
//! ```toml
//! repositories = ["acme/widgets", "acme/gadgets@develop"]
//! path = "VERSION"
//! find = "1.2.3"
//! replace = "1.2.4"
//! title = "Bump {{repo}} to 1.2.4"
//! ```

mod error;
mod job;

pub use error::ConfigError;
pub use job::ReplaceJob;

use std::path::Path;

/// Loads and validates a job file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
pub fn load_job(path: &Path) -> Result<ReplaceJob, ConfigError> {
    ReplaceJob::load(path)
}
