//! Provides functionality for handling HTTP requests.

use crate::http::headers::{HeaderLike, Headers};
use crate::http::method::HttpMethod;
use crate::tez_error::{RequestParsingError, TezResult};
use serde::de::DeserializeOwned;
use std::fmt::Display;

/// Http versions understood by the transport adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpVersion {
  /// HTTP/1.0
  Http10,
  /// HTTP/1.1
  #[default]
  Http11,
}

impl HttpVersion {
  /// The version as it appears on the wire.
  pub const fn as_net_str(&self) -> &'static str {
    match self {
      HttpVersion::Http10 => "HTTP/1.0",
      HttpVersion::Http11 => "HTTP/1.1",
    }
  }

  /// Parses the version from the request line.
  pub fn try_from_net_str(value: &str) -> Option<Self> {
    match value {
      "HTTP/1.0" => Some(HttpVersion::Http10),
      "HTTP/1.1" => Some(HttpVersion::Http11),
      _ => None,
    }
  }
}

impl Display for HttpVersion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_net_str())
  }
}

/// Represents a request to the application.
///
/// A request is constructed once per inbound call by the transport (or the test client)
/// and owned by that call. Handlers only ever see it by shared reference,
/// middleware may adjust it in `process_request` before routing happens.
#[derive(Clone, Debug)]
pub struct Request {
  method: HttpMethod,
  path: String,
  raw_path: Option<String>,
  query: String,
  version: HttpVersion,
  headers: Headers,
  body: Vec<u8>,
}

impl Request {
  /// Creates a request for the given method and target. The target is split at the first `?`
  /// into path and raw query string. The path is taken verbatim.
  ///
  /// ```
  /// let req = tez::Request::new("get", "/hello/davron?greeting=hi");
  /// assert_eq!(req.path(), "/hello/davron");
  /// assert_eq!(req.query(), "greeting=hi");
  /// assert_eq!(req.method(), &tez::HttpMethod::Get);
  /// ```
  pub fn new(method: impl Into<HttpMethod>, target: impl AsRef<str>) -> Self {
    let (path, query) = match target.as_ref().split_once('?') {
      Some((path, query)) => (path.to_string(), query.to_string()),
      None => (target.as_ref().to_string(), String::new()),
    };

    Self {
      method: method.into(),
      path,
      raw_path: None,
      query,
      version: HttpVersion::default(),
      headers: Headers::new(),
      body: Vec::new(),
    }
  }

  /// `raw_path` is the path as received, before percent decoding.
  pub(crate) fn from_parts(
    method: HttpMethod,
    raw_path: &str,
    query: String,
    version: HttpVersion,
    headers: Headers,
    body: Vec<u8>,
  ) -> TezResult<Self> {
    let path = decode_path(raw_path)?;
    let raw_path = Some(raw_path.to_string());
    Ok(Self { method, path, raw_path, query, version, headers, body })
  }

  /// Adds a header.
  pub fn with_header(mut self, name: impl HeaderLike, value: impl AsRef<str>) -> Self {
    self.headers.add(name, value);
    self
  }

  /// Sets the body.
  pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
    self.body = body.into();
    self
  }

  /// Sets the http version.
  pub fn with_version(mut self, version: HttpVersion) -> Self {
    self.version = version;
    self
  }

  /// The request method.
  pub fn method(&self) -> &HttpMethod {
    &self.method
  }

  /// The path without the query string.
  pub fn path(&self) -> &str {
    self.path.as_str()
  }

  /// Replaces the path. Routing uses whatever path is present once all `process_request` hooks ran.
  /// The new path is taken verbatim.
  pub fn set_path(&mut self, path: impl ToString) {
    self.path = path.to_string();
    self.raw_path = None;
  }

  /// The path split at `/`, each segment percent decoded on its own.
  ///
  /// An encoded `%2F` therefore stays inside its segment instead of starting a new one.
  /// Paths that were not received percent encoded are split as they are.
  ///
  /// ```
  /// let req = tez::Request::new("GET", "/hello/davron");
  /// assert_eq!(req.path_segments(), vec!["", "hello", "davron"]);
  /// ```
  pub fn path_segments(&self) -> Vec<String> {
    match &self.raw_path {
      Some(raw) => raw
        .split('/')
        .map(|segment| {
          urlencoding::decode(segment)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| segment.to_string())
        })
        .collect(),
      None => self.path.split('/').map(str::to_string).collect(),
    }
  }

  /// The raw query string without the leading `?`.
  pub fn query(&self) -> &str {
    self.query.as_str()
  }

  /// All query parameters, percent decoded, in order of appearance.
  /// Pairs that fail to decode are skipped.
  pub fn query_params(&self) -> Vec<(String, String)> {
    self
      .query
      .split('&')
      .filter(|pair| !pair.is_empty())
      .filter_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        Some((decode_query_component(key)?, decode_query_component(value)?))
      })
      .collect()
  }

  /// The first value of the named query parameter.
  pub fn query_param(&self, name: impl AsRef<str>) -> Option<String> {
    let name = name.as_ref();
    self.query_params().into_iter().find(|(key, _)| key == name).map(|(_, value)| value)
  }

  /// The http version.
  pub fn version(&self) -> HttpVersion {
    self.version
  }

  /// All request headers.
  pub fn headers(&self) -> &Headers {
    &self.headers
  }

  /// Mutable access to the request headers.
  pub fn headers_mut(&mut self) -> &mut Headers {
    &mut self.headers
  }

  /// The first value of the named header.
  pub fn header(&self, name: impl HeaderLike) -> Option<&str> {
    self.headers.get(name)
  }

  /// The raw body. Empty if the request had none.
  pub fn body(&self) -> &[u8] {
    self.body.as_slice()
  }

  /// The body as utf-8 text.
  pub fn body_text(&self) -> TezResult<&str> {
    Ok(std::str::from_utf8(self.body.as_slice())?)
  }

  /// Deserializes the body as json.
  pub fn json<T: DeserializeOwned>(&self) -> TezResult<T> {
    Ok(serde_json::from_slice(self.body.as_slice())?)
  }
}

/// Percent decodes a request path as received from the wire.
pub(crate) fn decode_path(raw: &str) -> TezResult<String> {
  if !raw.starts_with('/') {
    return Err(RequestParsingError::InvalidPath(raw.to_string()).into());
  }

  urlencoding::decode(raw)
    .map(|decoded| decoded.into_owned())
    .map_err(|_| RequestParsingError::InvalidPathUrlEncoding(raw.to_string()).into())
}

fn decode_query_component(raw: &str) -> Option<String> {
  let spaced = raw.replace('+', " ");
  urlencoding::decode(spaced.as_str()).ok().map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn query_params_are_decoded() {
    let req = Request::new("GET", "/search?q=rust+web&lang=en%2Dgb&flag&q=second");
    assert_eq!(req.query_param("q").as_deref(), Some("rust web"));
    assert_eq!(req.query_param("lang").as_deref(), Some("en-gb"));
    assert_eq!(req.query_param("flag").as_deref(), Some(""));
    assert_eq!(req.query_param("missing"), None);
    assert_eq!(req.query_params().len(), 4);
  }

  #[test]
  fn decode_path_rejects_bad_input() {
    assert_eq!(decode_path("/hello%20world").unwrap(), "/hello world");
    assert!(decode_path("hello").is_err());
    assert!(decode_path("/%BF").is_err());
  }

  #[test]
  fn encoded_slash_stays_in_segment() {
    let req = Request::from_parts(
      HttpMethod::Get,
      "/hello/a%2Fb%20c",
      String::new(),
      HttpVersion::Http11,
      Headers::new(),
      Vec::new(),
    )
    .unwrap();
    assert_eq!(req.path(), "/hello/a/b c");
    assert_eq!(req.path_segments(), vec!["", "hello", "a/b c"]);

    let mut req = req;
    req.set_path("/other/x");
    assert_eq!(req.path_segments(), vec!["", "other", "x"]);
  }
}
