//! Pull request metadata templating.
//!
//! Titles and descriptions are Handlebars templates rendered per repository,
//! so one batch can mention each repository's own names and branches.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

/// Default pull request title.
pub const DEFAULT_TITLE_FORMAT: &str = "Replace {{find}} with {{replace}} in {{path}}";

/// Default pull request description and commit message.
pub const DEFAULT_DESCRIPTION_FORMAT: &str =
    "Replaced `{{find}}` with `{{replace}}` in `{{path}}` on {{base_branch}}.";
