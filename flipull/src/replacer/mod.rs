//! Find/replace publishing against a single repository.
//!
//! A run resolves the base branch to its tip commit, reads the target file
//! at that commit, applies the substitution and, unless previewing,
//! publishes the result on top of the same commit:
//!
//! 1. Resolve the base branch to its tip commit and tree
//! 2. Create a blob with the new content
//! 3. Create a tree replacing the file on top of the base tree
//! 4. Create a commit with the base tip as its only parent
//! 5. Create the target branch at that commit
//! 6. Optionally open a pull request into the base branch
//!
//! Each step needs the previous step's result. A failure aborts the run;
//! objects created by earlier steps are left in place, and without a branch
//! pointing at them they are garbage collected by GitHub.

mod error;
mod outcome;
mod request;
mod step;

pub use error::ReplaceError;
pub use outcome::{PublishedChange, RunOutcome};
pub use request::{ChangeRequest, Edit};
pub use step::PublishStep;

use crate::github::{CreatedPullRequest, GitHost, NewPullRequest, TreeEntry};
use crate::mutation::replace_content;
use tracing::{debug, info, info_span, Instrument};

/// Base branch tip as read at the start of a run.
///
/// The file is read at this commit and the new commit is parented on it.
/// The branch may advance before the new branch is created.
struct BaseRef {
    commit_sha: String,
    tree_sha: String,
}

/// Runs one [`ChangeRequest`] against a [`GitHost`].
pub struct Replacer<'a, H> {
    host: &'a H,
    request: ChangeRequest,
}

impl<'a, H: GitHost> Replacer<'a, H> {
    /// Creates a replacer for `request`.
    pub fn new(host: &'a H, request: ChangeRequest) -> Self {
        Self { host, request }
    }

    /// Executes the run.
    ///
    /// # Errors
    ///
    /// Returns [`ReplaceError::NoContentChange`] when the substitution has no
    /// effect, [`ReplaceError::ContentFetchFailed`] when the file cannot be
    /// read and [`ReplaceError::RemoteOperationFailed`] when resolving the
    /// base branch or a publishing step fails. Previews resolve the base
    /// branch too, so they show exactly what would be published.
    pub async fn run(&self) -> Result<RunOutcome, ReplaceError> {
        let repository = &self.request.repository;
        let span = info_span!(
            "replace",
            repo = %repository.full_name(),
            path = %self.request.edit.path
        );

        async {
            let base = self.resolve_base_ref().await?;
            info!(
                base_branch = %repository.base_branch,
                commit = %base.commit_sha,
                "Modifying file"
            );
            let new_content = self.generate_content(&base).await?;

            if self.request.preview_only {
                info!("Preview only, nothing published");
                return Ok(RunOutcome::Preview {
                    content: new_content,
                });
            }

            info!(branch = %repository.target_branch, "Committing changes");
            let commit_sha = self.commit_to_branch(base, &new_content).await?;

            let pull_request = if self.request.skip_pull_request {
                info!("Skipping pull request");
                None
            } else {
                info!("Creating pull request");
                let pr = self.create_pull_request().await?;
                info!(pr_number = pr.number, url = %pr.url, "Pull request created");
                Some(pr)
            };

            Ok(RunOutcome::Published(PublishedChange {
                branch: repository.target_branch.clone(),
                commit_sha,
                pull_request,
            }))
        }
        .instrument(span)
        .await
    }

    /// Fetches the file at the base commit and applies the substitution.
    async fn generate_content(&self, base: &BaseRef) -> Result<String, ReplaceError> {
        let content = self.fetch_content(&base.commit_sha).await?;
        let edit = &self.request.edit;
        replace_content(&content, &edit.find, &edit.replace, edit.limit)
    }

    /// Reads the file at `commit_sha`.
    async fn fetch_content(&self, commit_sha: &str) -> Result<String, ReplaceError> {
        let repository = &self.request.repository;
        let path = &self.request.edit.path;

        let content = self
            .host
            .get_file_content(&repository.owner, &repository.repo, path, commit_sha)
            .await
            .map_err(|source| ReplaceError::ContentFetchFailed {
                path: path.clone(),
                source,
            })?;

        debug!(bytes = content.len(), "Fetched content");
        Ok(content)
    }

    /// Publishes `content` as a commit on top of `base` and points the target
    /// branch at it, returning the commit SHA.
    async fn commit_to_branch(
        &self,
        base: BaseRef,
        content: &str,
    ) -> Result<String, ReplaceError> {
        let repository = &self.request.repository;
        let (owner, repo) = (repository.owner.as_str(), repository.repo.as_str());

        let blob_sha = self
            .host
            .create_blob(owner, repo, content)
            .await
            .map_err(failed_at(PublishStep::CreateBlob))?;
        debug!(sha = %blob_sha, "Created blob");

        let entries = [TreeEntry::file(&self.request.edit.path, &blob_sha)];
        let tree_sha = self
            .host
            .create_tree(owner, repo, &base.tree_sha, &entries)
            .await
            .map_err(failed_at(PublishStep::CreateTree))?;
        debug!(sha = %tree_sha, "Created tree");

        let parents = [base.commit_sha];
        let commit_sha = self
            .host
            .create_commit(owner, repo, &self.request.edit.description, &tree_sha, &parents)
            .await
            .map_err(failed_at(PublishStep::CreateCommit))?;
        debug!(sha = %commit_sha, "Created commit");

        let ref_name = self
            .host
            .create_branch(owner, repo, &repository.target_branch, &commit_sha)
            .await
            .map_err(failed_at(PublishStep::CreateBranch))?;
        info!(reference = %ref_name, sha = %commit_sha, "Branch created");

        Ok(commit_sha)
    }

    /// Resolves the base branch tip and the tree it points at.
    async fn resolve_base_ref(&self) -> Result<BaseRef, ReplaceError> {
        let repository = &self.request.repository;
        let (owner, repo) = (repository.owner.as_str(), repository.repo.as_str());

        let commit_sha = self
            .host
            .get_branch_commit(owner, repo, &repository.base_branch)
            .await
            .map_err(failed_at(PublishStep::ResolveBaseRef))?;
        let tree_sha = self
            .host
            .get_commit_tree(owner, repo, &commit_sha)
            .await
            .map_err(failed_at(PublishStep::ResolveBaseRef))?;
        debug!(commit = %commit_sha, tree = %tree_sha, "Resolved base branch");

        Ok(BaseRef {
            commit_sha,
            tree_sha,
        })
    }

    /// Opens a pull request from the target branch into the base branch.
    async fn create_pull_request(&self) -> Result<CreatedPullRequest, ReplaceError> {
        let repository = &self.request.repository;
        let edit = &self.request.edit;

        self.host
            .create_pull_request(
                &repository.owner,
                &repository.repo,
                NewPullRequest {
                    title: &edit.title,
                    body: &edit.description,
                    head: &repository.target_branch,
                    base: &repository.base_branch,
                },
            )
            .await
            .map_err(failed_at(PublishStep::CreatePullRequest))
    }
}

/// Wraps a host error as the failure of `step`.
fn failed_at(step: PublishStep) -> impl FnOnce(crate::github::HostError) -> ReplaceError {
    move |source| ReplaceError::RemoteOperationFailed { step, source }
}
