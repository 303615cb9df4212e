//! Repository descriptor parsing and target branch naming.
//!
//! A descriptor names a repository and, optionally, the branch to base the
//! change on: `owner/repo` or `owner/repo@branch`.

use crate::replacer::ReplaceError;
use bstr::ByteSlice;
use std::time::{SystemTime, UNIX_EPOCH};

/// Base branch used when the descriptor does not name one.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Prefix of every branch created by the replacer.
pub const BRANCH_NAMESPACE: &str = "flipull/replacer/";

/// Where a change is read from and published to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Branch the change is based on and the pull request targets.
    pub base_branch: String,

    /// New branch the change is committed to.
    pub target_branch: String,
}

impl RepositoryTarget {
    /// Parses a descriptor, naming the target branch after the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ReplaceError::InvalidDescriptor`] if the descriptor is malformed.
    pub fn parse(descriptor: &str) -> Result<Self, ReplaceError> {
        Self::parse_at(descriptor, SystemTime::now())
    }

    /// Parses a descriptor, naming the target branch after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplaceError::InvalidDescriptor`] if the descriptor is malformed.
    pub fn parse_at(descriptor: &str, now: SystemTime) -> Result<Self, ReplaceError> {
        let invalid = |reason: &str| ReplaceError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason: reason.to_string(),
        };

        let repo_parts: Vec<&str> = descriptor.split('/').collect();
        let [owner, rest] = repo_parts[..] else {
            return Err(invalid("expected exactly one '/' between owner and repository"));
        };

        let branch_parts: Vec<&str> = rest.split('@').collect();
        let (repo, base_branch) = match branch_parts[..] {
            [repo] => (repo, DEFAULT_BASE_BRANCH),
            [repo, branch] => (repo, branch),
            _ => return Err(invalid("expected at most one '@' before the branch")),
        };

        if owner.is_empty() {
            return Err(invalid("owner is empty"));
        }
        if repo.is_empty() {
            return Err(invalid("repository name is empty"));
        }
        if base_branch.is_empty() {
            return Err(invalid("branch after '@' is empty"));
        }
        validate_branch_name(base_branch).map_err(|reason| invalid(&reason))?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            base_branch: base_branch.to_string(),
            target_branch: generate_branch_name(now),
        })
    }

    /// Returns `owner/repo`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Generates the name of the branch a change is published on.
///
/// Format: `flipull/replacer/{unix seconds}{nanoseconds, 9 digits}`. The
/// sub-second part keeps two runs started in the same second apart.
#[must_use]
pub fn generate_branch_name(now: SystemTime) -> String {
    let elapsed = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    format!(
        "{BRANCH_NAMESPACE}{}{:09}",
        elapsed.as_secs(),
        elapsed.subsec_nanos()
    )
}

/// Characters git allows in ref names that would change the meaning of an
/// API route when placed unencoded in its path.
const ROUTE_RESERVED_CHARS: [char; 3] = ['#', '?', '%'];

/// Checks that `branch` forms a valid `refs/heads/` reference name that can
/// be used verbatim in API routes.
fn validate_branch_name(branch: &str) -> Result<(), String> {
    if let Some(c) = branch.chars().find(|c| ROUTE_RESERVED_CHARS.contains(c)) {
        return Err(format!("'{branch}' contains '{c}', which is not supported"));
    }

    let full_name = format!("refs/heads/{branch}");
    gix_validate::reference::name(full_name.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| format!("'{branch}' is not a valid branch name: {e}"))
}
