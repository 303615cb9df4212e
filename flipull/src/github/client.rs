//! [`GitHost`] backed by octocrab.

use super::models::{CreatedObject, GitCommit, GitRef, NewBlob, NewCommit, NewRef, NewTree};
use super::{CreatedPullRequest, GitHost, HostError, NewPullRequest, TreeEntry};
use octocrab::Octocrab;
use tracing::debug;

/// GitHub client used for real runs.
///
/// Cloning is cheap; clones share the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct OctocrabHost {
    octocrab: Octocrab,
}

impl OctocrabHost {
    /// Wraps an already configured client.
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Builds a client authenticated with a personal access token.
    ///
    /// `api_url` points the client at a GitHub Enterprise instance; when
    /// `None`, api.github.com is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the client cannot be built.
    pub fn from_token(token: &str, api_url: Option<&str>) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_url) = api_url {
            builder = builder.base_uri(api_url)?;
        }
        Ok(Self::new(builder.build()?))
    }
}

impl GitHost for OctocrabHost {
    async fn get_branch_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String, HostError> {
        // Descriptor parsing keeps route-reserved characters out of `branch`.
        let route = format!("/repos/{owner}/{repo}/git/ref/heads/{branch}");
        let git_ref: GitRef = self.octocrab.get(route, None::<&()>).await?;
        debug!(reference = %git_ref.ref_name, sha = %git_ref.object.sha, "Resolved reference");
        Ok(git_ref.object.sha)
    }

    async fn get_commit_tree(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> Result<String, HostError> {
        let route = format!("/repos/{owner}/{repo}/git/commits/{commit_sha}");
        let commit: GitCommit = self.octocrab.get(route, None::<&()>).await?;
        debug!(commit = %commit.sha, tree = %commit.tree.sha, "Resolved commit tree");
        Ok(commit.tree.sha)
    }

    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, HostError> {
        let mut contents = self
            .octocrab
            .repos(owner, repo)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await?;

        // Directories come back as a list of entries.
        if contents.items.len() != 1 {
            return Err(HostError::UnexpectedResponse {
                message: format!("'{path}' is not a file"),
            });
        }
        let file = contents.items.remove(0);

        if file.r#type != "file" {
            return Err(HostError::UnexpectedResponse {
                message: format!("'{path}' is a {}, not a file", file.r#type),
            });
        }

        // Files over 1 MB are returned without inline content.
        if file.encoding.as_deref() == Some("none") {
            return Err(HostError::UnexpectedResponse {
                message: format!("'{path}' is too large to be read through the contents API"),
            });
        }

        file.decoded_content()
            .ok_or_else(|| HostError::UnexpectedResponse {
                message: format!("'{path}' does not contain valid UTF-8 text"),
            })
    }

    async fn create_blob(
        &self,
        owner: &str,
        repo: &str,
        content: &str,
    ) -> Result<String, HostError> {
        let route = format!("/repos/{owner}/{repo}/git/blobs");
        let body = NewBlob {
            content,
            encoding: "utf-8",
        };
        let blob: CreatedObject = self.octocrab.post(route, Some(&body)).await?;
        Ok(blob.sha)
    }

    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String, HostError> {
        let route = format!("/repos/{owner}/{repo}/git/trees");
        let body = NewTree {
            base_tree,
            tree: entries,
        };
        let tree: CreatedObject = self.octocrab.post(route, Some(&body)).await?;
        Ok(tree.sha)
    }

    async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<String, HostError> {
        let route = format!("/repos/{owner}/{repo}/git/commits");
        let body = NewCommit {
            message,
            tree: tree_sha,
            parents,
        };
        let commit: CreatedObject = self.octocrab.post(route, Some(&body)).await?;
        Ok(commit.sha)
    }

    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        commit_sha: &str,
    ) -> Result<String, HostError> {
        let route = format!("/repos/{owner}/{repo}/git/refs");
        let ref_name = format!("refs/heads/{branch}");
        let body = NewRef {
            ref_name: &ref_name,
            sha: commit_sha,
        };
        let git_ref: GitRef = self.octocrab.post(route, Some(&body)).await?;
        Ok(git_ref.ref_name)
    }

    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_request: NewPullRequest<'_>,
    ) -> Result<CreatedPullRequest, HostError> {
        let pr = self
            .octocrab
            .pulls(owner, repo)
            .create(pull_request.title, pull_request.head, pull_request.base)
            .body(pull_request.body)
            .send()
            .await?;

        let url = pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| format!("https://github.com/{owner}/{repo}/pull/{}", pr.number));

        Ok(CreatedPullRequest {
            number: pr.number,
            url,
        })
    }
}
