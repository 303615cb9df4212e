//! Request and response bodies for the Git Data API endpoints.
//!
//! Only the fields the publisher reads are modelled; everything else in the
//! response is ignored.

use super::TreeEntry;
use serde::{Deserialize, Serialize};

/// `GET /repos/{owner}/{repo}/git/ref/{ref}`
#[derive(Debug, Deserialize)]
pub(crate) struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub object: GitObject,
}

/// Object pointer embedded in refs and commits.
#[derive(Debug, Deserialize)]
pub(crate) struct GitObject {
    pub sha: String,
}

/// `GET /repos/{owner}/{repo}/git/commits/{sha}`
#[derive(Debug, Deserialize)]
pub(crate) struct GitCommit {
    pub sha: String,
    pub tree: GitObject,
}

/// Response of every `POST .../git/{blobs,trees,commits}` call.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedObject {
    pub sha: String,
}

/// `POST /repos/{owner}/{repo}/git/blobs`
#[derive(Debug, Serialize)]
pub(crate) struct NewBlob<'a> {
    pub content: &'a str,
    pub encoding: &'static str,
}

/// `POST /repos/{owner}/{repo}/git/trees`
#[derive(Debug, Serialize)]
pub(crate) struct NewTree<'a> {
    pub base_tree: &'a str,
    pub tree: &'a [TreeEntry],
}

/// `POST /repos/{owner}/{repo}/git/commits`
#[derive(Debug, Serialize)]
pub(crate) struct NewCommit<'a> {
    pub message: &'a str,
    pub tree: &'a str,
    pub parents: &'a [String],
}

/// `POST /repos/{owner}/{repo}/git/refs`
#[derive(Debug, Serialize)]
pub(crate) struct NewRef<'a> {
    #[serde(rename = "ref")]
    pub ref_name: &'a str,
    pub sha: &'a str,
}
