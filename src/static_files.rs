//! Serves files below a directory for requests under a url prefix.

use crate::default_functions::{default_not_found_handler, METHOD_NOT_ALLOWED_BODY};
use crate::http::{HeaderName, HttpMethod, MimeType, Request, Response, StatusCode};
use crate::tez_error::TezResult;
use crate::{debug_log, info_log, trace_log};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Component, Path, PathBuf};

/// Maps `<prefix>/<relative path>` to `<directory>/<relative path>`.
///
/// Only GET and HEAD are answered. Paths that try to leave the directory are treated as missing.
#[derive(Clone, Debug)]
pub struct StaticFiles {
  prefix: String,
  directory: PathBuf,
}

impl StaticFiles {
  /// The prefix gets a leading `/` if it has none, a trailing `/` is dropped.
  pub fn new(prefix: impl AsRef<str>, directory: impl Into<PathBuf>) -> Self {
    let prefix = prefix.as_ref().trim_end_matches('/');
    let prefix = match prefix.starts_with('/') {
      true => prefix.to_string(),
      false => format!("/{prefix}"),
    };

    Self { prefix, directory: directory.into() }
  }

  /// The url prefix, for example `/static`.
  pub fn prefix(&self) -> &str {
    self.prefix.as_str()
  }

  /// The directory files are served from.
  pub fn directory(&self) -> &Path {
    self.directory.as_path()
  }

  /// true if the request path falls under the prefix.
  pub fn is_static_path(&self, path: &str) -> bool {
    self.relative_path(path).is_some()
  }

  fn relative_path<'a>(&self, path: &'a str) -> Option<&'a str> {
    let rest = path.strip_prefix(self.prefix.as_str())?;
    if rest.is_empty() {
      return Some(rest);
    }

    rest.strip_prefix('/')
  }

  /// Reads the file for the request path together with its mime type.
  ///
  /// Returns `Ok(None)` if the path is not under the prefix, names a directory, does not exist
  /// or contains `..`.
  pub fn lookup(&self, path: &str) -> TezResult<Option<(Vec<u8>, MimeType)>> {
    let Some(relative) = self.relative_path(path) else {
      return Ok(None);
    };

    let relative = Path::new(relative);
    if relative.as_os_str().is_empty()
      || relative.components().any(|part| !matches!(part, Component::Normal(_)))
    {
      debug_log!("Rejected static path {}", path);
      return Ok(None);
    }

    let file_path = self.directory.join(relative);
    let mut file = match File::open(&file_path) {
      Ok(file) => file,
      Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
      Err(err) => return Err(err.into()),
    };

    if !file.metadata()?.is_file() {
      return Ok(None);
    }

    let mut content = Vec::new();
    file.read_to_end(&mut content)?;

    let mime = MimeType::from_extension(
      file_path.extension().and_then(|ext| ext.to_str()).unwrap_or_default(),
    );
    trace_log!("Serving static file {} as {}", file_path.display(), mime);
    Ok(Some((content, mime)))
  }

  /// Answers the request from the directory.
  pub fn serve(&self, request: &Request) -> TezResult<Response> {
    if !matches!(request.method(), HttpMethod::Get | HttpMethod::Head) {
      info_log!("Method {} not allowed for static path {}", request.method(), request.path());
      let mut response = Response::with_text(StatusCode::MethodNotAllowed, METHOD_NOT_ALLOWED_BODY);
      response.set_header(HeaderName::Allow, "GET, HEAD");
      return Ok(response);
    }

    let Some((content, mime)) = self.lookup(request.path())? else {
      return Ok(default_not_found_handler(request));
    };

    let mut response = Response::new();
    response.set_body(content).set_content_type(mime);
    Ok(response)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn prefix_is_normalized() {
    assert_eq!(StaticFiles::new("static/", "static").prefix(), "/static");
    assert_eq!(StaticFiles::new("/assets", "static").prefix(), "/assets");
  }

  #[test]
  fn only_paths_below_prefix_are_static() {
    let files = StaticFiles::new("/static", "static");
    assert!(files.is_static_path("/static/test.css"));
    assert!(files.is_static_path("/static"));
    assert!(!files.is_static_path("/staticfiles/test.css"));
    assert!(!files.is_static_path("/home"));
  }

  #[test]
  fn traversal_is_rejected() {
    let files = StaticFiles::new("/static", env!("CARGO_MANIFEST_DIR"));
    assert!(files.lookup("/static/../Cargo.toml").unwrap().is_none());
    assert!(files.lookup("/static/src/../Cargo.toml").unwrap().is_none());
    assert!(files.lookup("/static/Cargo.toml").unwrap().is_some());
  }

  #[test]
  fn directories_are_not_served() {
    let files = StaticFiles::new("/static", env!("CARGO_MANIFEST_DIR"));
    assert!(files.lookup("/static/src").unwrap().is_none());
    assert!(files.lookup("/static/").unwrap().is_none());
  }
}
