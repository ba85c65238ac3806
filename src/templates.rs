//! Template rendering for handlers that produce html.

use crate::debug_log;
use crate::tez_error::{TemplateError, TezResult};
use handlebars::Handlebars;
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Anything able to turn a template name and a context into a string.
pub trait TemplateRenderer: Send + Sync {
  /// Render the named template.
  fn render(&self, name: &str, context: &serde_json::Value) -> TezResult<String>;
}

/// Handlebars templates loaded from a directory. `{{ new_title }}` style placeholders are
/// filled from the context, values are html escaped.
///
/// Cheap to clone, so handlers can capture their own copy.
#[derive(Clone)]
pub struct Templates {
  inner: Arc<TemplatesInner>,
}

struct TemplatesInner {
  directory: PathBuf,
  registry: Handlebars<'static>,
}

impl Templates {
  /// Templates are looked up relative to the directory when rendered.
  pub fn new(directory: impl Into<PathBuf>) -> Self {
    let inner = TemplatesInner { directory: directory.into(), registry: Handlebars::new() };
    Self { inner: Arc::new(inner) }
  }

  /// The template directory.
  pub fn directory(&self) -> &Path {
    self.inner.directory.as_path()
  }

  /// Renders `<directory>/<name>` with the serialized context.
  pub fn render_template(&self, name: &str, context: impl Serialize) -> TezResult<String> {
    let context = serde_json::to_value(context)?;
    self.render(name, &context)
  }

  fn load(&self, name: &str) -> TezResult<String> {
    let relative = Path::new(name);
    if relative.components().any(|part| !matches!(part, Component::Normal(_))) {
      return Err(TemplateError::NotFound(name.to_string()).into());
    }

    let path = self.inner.directory.join(relative);
    std::fs::read_to_string(&path).map_err(|err| match err.kind() {
      ErrorKind::NotFound => TemplateError::NotFound(name.to_string()).into(),
      _ => err.into(),
    })
  }
}

impl TemplateRenderer for Templates {
  fn render(&self, name: &str, context: &serde_json::Value) -> TezResult<String> {
    let source = self.load(name)?;
    debug_log!("Rendering template {}", name);
    self
      .inner
      .registry
      .render_template(source.as_str(), context)
      .map_err(|err| TemplateError::Render(name.to_string(), err.to_string()).into())
  }
}

impl Debug for Templates {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_fmt(format_args!("Templates({})", self.inner.directory.display()))
  }
}
