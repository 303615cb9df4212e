//! Template renderer.

use crate::replacer::ChangeRequest;
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (titles and bodies are markdown)
/// - Strict mode (catches misspelled variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders pull request titles and descriptions.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders `template` with the request's repository and edit as variables.
    ///
    /// Available variables: `owner`, `repo`, `full_name`, `base_branch`,
    /// `target_branch`, `path`, `find`, `replace`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid or uses an unknown variable.
    pub fn render(
        &self,
        template: &str,
        request: &ChangeRequest,
    ) -> Result<String, super::TemplateError> {
        let repository = &request.repository;
        let data = json!({
            "owner": repository.owner,
            "repo": repository.repo,
            "full_name": repository.full_name(),
            "base_branch": repository.base_branch,
            "target_branch": repository.target_branch,
            "path": request.edit.path,
            "find": request.edit.find,
            "replace": request.edit.replace,
        });

        self.render_template(template, &data)
    }

    /// Renders a template with the given data.
    fn render_template(&self, template: &str, data: &Value) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}
