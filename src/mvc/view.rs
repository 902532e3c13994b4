//! View resolution and rendering.
//!
//! # Data Flow
//! ```text
//! view name ("members")
//!     → ViewResolver::resolve (prefix + name + suffix)
//!     → View ("views/members.html")
//!     → View::render (TemplateEngine, Model)
//!     → HttpResponse body
//! ```
//!
//! # Design Decisions
//! - Resolution is a pure string transform and never fails
//! - Template existence is checked only when rendering
//! - Render errors propagate; there is no fallback view

use std::path::Path;

use tera::{Context, Tera};

use crate::http::context::{HttpRequest, HttpResponse};
use crate::mvc::error::RenderError;
use crate::mvc::model_view::Model;

pub const DEFAULT_VIEW_PREFIX: &str = "views/";
pub const DEFAULT_VIEW_SUFFIX: &str = ".html";

/// Rendering collaborator: turns a template reference and a model into text.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, model: &Model) -> Result<String, RenderError>;
}

/// A resolved render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    template: String,
}

impl View {
    // Only the resolver builds views.
    fn new(template: String) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render `model` through `engine` into the response body.
    pub fn render(
        &self,
        model: &Model,
        _request: &HttpRequest,
        response: &mut HttpResponse,
        engine: &dyn TemplateEngine,
    ) -> Result<(), RenderError> {
        let body = engine.render(&self.template, model)?;
        response.set_content_type("text/html; charset=utf-8");
        response.write(&body);
        Ok(())
    }
}

/// Maps view names to views using a fixed prefix/suffix convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewResolver {
    prefix: String,
    suffix: String,
}

impl Default for ViewResolver {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_PREFIX, DEFAULT_VIEW_SUFFIX)
    }
}

impl ViewResolver {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn resolve(&self, view_name: &str) -> View {
        View::new(format!("{}{}{}", self.prefix, view_name, self.suffix))
    }
}

/// [`TemplateEngine`] backed by Tera.
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Load every `.html` template below `dir`. Template names are relative to `dir`.
    ///
    /// A missing directory or one without templates is an error.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        if !dir.is_dir() {
            return Err(RenderError::TemplateDirMissing(dir.display().to_string()));
        }
        let glob = dir.join("**").join("*.html");
        let tera = Tera::new(&glob.to_string_lossy())?;
        if tera.get_template_names().next().is_none() {
            return Err(RenderError::NoTemplates(dir.display().to_string()));
        }
        tracing::info!(
            dir = %dir.display(),
            templates = tera.get_template_names().count(),
            "Templates loaded"
        );
        Ok(Self { tera })
    }

    /// Build an engine from in-memory `(name, source)` pairs.
    pub fn from_raw<I, N, S>(templates: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        Ok(Self { tera })
    }

    pub fn has_template(&self, template: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template)
    }
}

impl TemplateEngine for TeraEngine {
    fn render(&self, template: &str, model: &Model) -> Result<String, RenderError> {
        if !self.has_template(template) {
            return Err(RenderError::TemplateNotFound(template.to_string()));
        }

        let mut context = Context::new();
        for (key, value) in model.iter() {
            context.insert(key.as_str(), value);
        }

        Ok(self.tera.render(template, &context)?)
    }
}
