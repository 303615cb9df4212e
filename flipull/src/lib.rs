#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod github;
pub mod mutation;
pub mod replacer;
pub mod repository;
pub mod runner;
pub mod summary;
pub mod templates;

pub use config::{load_job, ConfigError, ReplaceJob};
pub use github::{CreatedPullRequest, GitHost, HostError, NewPullRequest, OctocrabHost, TreeEntry};
pub use mutation::replace_content;
pub use replacer::{
    ChangeRequest, Edit, PublishStep, PublishedChange, ReplaceError, Replacer, RunOutcome,
};
pub use repository::{
    generate_branch_name, RepositoryTarget, BRANCH_NAMESPACE, DEFAULT_BASE_BRANCH,
};
pub use runner::{Runner, RunnerConfig, RunnerError, DEFAULT_CONCURRENCY};
pub use summary::{ProcessingResult, RunSummary};
pub use templates::{
    create_handlebars_registry, TemplateError, TemplateRenderer, DEFAULT_DESCRIPTION_FORMAT,
    DEFAULT_TITLE_FORMAT,
};
