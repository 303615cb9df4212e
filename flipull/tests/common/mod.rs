//! In-memory [`GitHost`] that records every call.

#![allow(dead_code)]

use flipull::{CreatedPullRequest, GitHost, HostError, NewPullRequest, TreeEntry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_COMMIT: &str = "base-commit-sha";
pub const BASE_TREE: &str = "base-tree-sha";
pub const BLOB_SHA: &str = "blob-sha";
pub const TREE_SHA: &str = "tree-sha";
pub const COMMIT_SHA: &str = "commit-sha";
pub const PR_NUMBER: u64 = 7;

/// A recorded host call; `repo` is `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetBranchCommit {
        repo: String,
        branch: String,
    },
    GetCommitTree {
        repo: String,
        commit_sha: String,
    },
    GetFileContent {
        repo: String,
        path: String,
        reference: String,
    },
    CreateBlob {
        repo: String,
        content: String,
    },
    CreateTree {
        repo: String,
        base_tree: String,
        entries: Vec<TreeEntry>,
    },
    CreateCommit {
        repo: String,
        message: String,
        tree_sha: String,
        parents: Vec<String>,
    },
    CreateBranch {
        repo: String,
        branch: String,
        commit_sha: String,
    },
    CreatePullRequest {
        repo: String,
        title: String,
        body: String,
        head: String,
        base: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetBranchCommit,
    GetCommitTree,
    GetFileContent,
    CreateBlob,
    CreateTree,
    CreateCommit,
    CreateBranch,
    CreatePullRequest,
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Self::GetBranchCommit { .. } => Operation::GetBranchCommit,
            Self::GetCommitTree { .. } => Operation::GetCommitTree,
            Self::GetFileContent { .. } => Operation::GetFileContent,
            Self::CreateBlob { .. } => Operation::CreateBlob,
            Self::CreateTree { .. } => Operation::CreateTree,
            Self::CreateCommit { .. } => Operation::CreateCommit,
            Self::CreateBranch { .. } => Operation::CreateBranch,
            Self::CreatePullRequest { .. } => Operation::CreatePullRequest,
        }
    }

    pub fn repo(&self) -> &str {
        match self {
            Self::GetBranchCommit { repo, .. }
            | Self::GetCommitTree { repo, .. }
            | Self::GetFileContent { repo, .. }
            | Self::CreateBlob { repo, .. }
            | Self::CreateTree { repo, .. }
            | Self::CreateCommit { repo, .. }
            | Self::CreateBranch { repo, .. }
            | Self::CreatePullRequest { repo, .. } => repo,
        }
    }

    /// Whether the call creates remote state.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self.operation(),
            Operation::GetBranchCommit | Operation::GetCommitTree | Operation::GetFileContent
        )
    }
}

/// Fake hosting service. Clones share the call log.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    files: HashMap<(String, String), String>,
    fail_on: Option<Operation>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `content` for `path` in `repo` (`owner/repo`).
    pub fn with_file(mut self, repo: &str, path: &str, content: &str) -> Self {
        self.files
            .insert((repo.to_string(), path.to_string()), content.to_string());
        self
    }

    /// Makes every call of `operation` fail.
    pub fn failing_on(mut self, operation: Operation) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Delays every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.calls().iter().map(Call::operation).collect()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn calls_for(&self, repo: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.repo() == repo)
            .collect()
    }

    async fn record(&self, call: Call) -> Result<(), HostError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(operation) {
            return Err(HostError::UnexpectedResponse {
                message: format!("{operation:?} rejected"),
            });
        }
        Ok(())
    }
}

impl GitHost for FakeHost {
    async fn get_branch_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String, HostError> {
        self.record(Call::GetBranchCommit {
            repo: format!("{owner}/{repo}"),
            branch: branch.to_string(),
        })
        .await?;
        Ok(BASE_COMMIT.to_string())
    }

    async fn get_commit_tree(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> Result<String, HostError> {
        self.record(Call::GetCommitTree {
            repo: format!("{owner}/{repo}"),
            commit_sha: commit_sha.to_string(),
        })
        .await?;
        Ok(BASE_TREE.to_string())
    }

    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, HostError> {
        let full_name = format!("{owner}/{repo}");
        self.record(Call::GetFileContent {
            repo: full_name.clone(),
            path: path.to_string(),
            reference: reference.to_string(),
        })
        .await?;
        self.files
            .get(&(full_name, path.to_string()))
            .cloned()
            .ok_or_else(|| HostError::UnexpectedResponse {
                message: "Not Found".to_string(),
            })
    }

    async fn create_blob(
        &self,
        owner: &str,
        repo: &str,
        content: &str,
    ) -> Result<String, HostError> {
        self.record(Call::CreateBlob {
            repo: format!("{owner}/{repo}"),
            content: content.to_string(),
        })
        .await?;
        Ok(BLOB_SHA.to_string())
    }

    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String, HostError> {
        self.record(Call::CreateTree {
            repo: format!("{owner}/{repo}"),
            base_tree: base_tree.to_string(),
            entries: entries.to_vec(),
        })
        .await?;
        Ok(TREE_SHA.to_string())
    }

    async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<String, HostError> {
        self.record(Call::CreateCommit {
            repo: format!("{owner}/{repo}"),
            message: message.to_string(),
            tree_sha: tree_sha.to_string(),
            parents: parents.to_vec(),
        })
        .await?;
        Ok(COMMIT_SHA.to_string())
    }

    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        commit_sha: &str,
    ) -> Result<String, HostError> {
        self.record(Call::CreateBranch {
            repo: format!("{owner}/{repo}"),
            branch: branch.to_string(),
            commit_sha: commit_sha.to_string(),
        })
        .await?;
        Ok(format!("refs/heads/{branch}"))
    }

    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_request: NewPullRequest<'_>,
    ) -> Result<CreatedPullRequest, HostError> {
        self.record(Call::CreatePullRequest {
            repo: format!("{owner}/{repo}"),
            title: pull_request.title.to_string(),
            body: pull_request.body.to_string(),
            head: pull_request.head.to_string(),
            base: pull_request.base.to_string(),
        })
        .await?;
        Ok(CreatedPullRequest {
            number: PR_NUMBER,
            url: format!("https://github.com/{owner}/{repo}/pull/{PR_NUMBER}"),
        })
    }
}
