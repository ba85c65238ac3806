//! The response model: a mutable [`Response`] filled in by handlers and middleware,
//! and the [`RenderedResponse`] it turns into once processing is over.

use crate::http::headers::{HeaderLike, HeaderName, Headers};
use crate::http::mime::MimeType;
use crate::http::request::HttpVersion;
use crate::http::status::StatusCode;
use crate::tez_error::TezResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::io::Write;

/// The content a handler produced. Only one variant is ever held by a response.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
  /// Rendered as `application/json`.
  Json(serde_json::Value),
  /// Rendered as `text/html`.
  Html(String),
  /// Rendered as `text/plain`.
  Text(String),
  /// Pre-rendered bytes, e.g. a template or a file. Sent as is.
  Raw(Vec<u8>),
}

impl ResponseBody {
  /// json beats html beats text beats raw.
  const fn priority(&self) -> u8 {
    match self {
      ResponseBody::Json(_) => 3,
      ResponseBody::Html(_) => 2,
      ResponseBody::Text(_) => 1,
      ResponseBody::Raw(_) => 0,
    }
  }
}

/// The response handed to handlers, the exception handler and `process_response` hooks.
///
/// The content is kept as a [`ResponseBody`] and only turned into bytes by [`Response::render`].
/// A setter never replaces content of a higher priority (json, then html, then text, then raw bytes):
///
/// ```
/// let mut resp = tez::Response::new();
/// resp.set_json(serde_json::json!({"name": "tez"})).unwrap();
/// resp.set_text("ignored");
/// let rendered = resp.render();
/// assert_eq!(rendered.content_type(), Some("application/json"));
/// assert_eq!(rendered.body(), br#"{"name":"tez"}"#);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Response {
  status_code: StatusCode,
  headers: Headers,
  body: Option<ResponseBody>,
  content_type: Option<MimeType>,
}

impl Response {
  /// An empty `200 OK` response.
  pub fn new() -> Self {
    Self::default()
  }

  /// A `text/plain` response with the given status. Used for the fixed 404 and 405 replies.
  pub fn with_text(status_code: impl Into<StatusCode>, text: impl ToString) -> Self {
    let mut response = Self::new();
    response.set_status(status_code);
    response.set_text(text);
    response
  }

  /// The status code, `200 OK` unless changed.
  pub fn status_code(&self) -> StatusCode {
    self.status_code
  }

  /// Sets the status code.
  pub fn set_status(&mut self, status_code: impl Into<StatusCode>) -> &mut Self {
    self.status_code = status_code.into();
    self
  }

  /// The content set so far.
  pub fn body(&self) -> Option<&ResponseBody> {
    self.body.as_ref()
  }

  /// Serializes the value and sets it as json content.
  pub fn set_json(&mut self, value: impl Serialize) -> TezResult<&mut Self> {
    let value = serde_json::to_value(value)?;
    Ok(self.set_body_content(ResponseBody::Json(value)))
  }

  /// Sets html content.
  pub fn set_html(&mut self, html: impl ToString) -> &mut Self {
    self.set_body_content(ResponseBody::Html(html.to_string()))
  }

  /// Sets plain text content.
  pub fn set_text(&mut self, text: impl ToString) -> &mut Self {
    self.set_body_content(ResponseBody::Text(text.to_string()))
  }

  /// Sets pre-rendered bytes. They are sent with the content type given by
  /// [`Response::set_content_type`], or `text/html` if none was given.
  pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
    self.set_body_content(ResponseBody::Raw(body.into()))
  }

  /// Sets the content type used for raw bytes. Json, html and text content always use their own.
  pub fn set_content_type(&mut self, mime: impl Into<MimeType>) -> &mut Self {
    self.content_type = Some(mime.into());
    self
  }

  /// Removes any content and the explicit content type, so a lower priority setter takes effect.
  ///
  /// ```
  /// let mut resp = tez::Response::new();
  /// resp.set_json(serde_json::json!({"partial": true})).unwrap();
  /// resp.clear_body().set_text("replaced");
  /// assert_eq!(resp.render().text(), "replaced");
  /// ```
  pub fn clear_body(&mut self) -> &mut Self {
    self.body = None;
    self.content_type = None;
    self
  }

  fn set_body_content(&mut self, content: ResponseBody) -> &mut Self {
    match &self.body {
      Some(current) if current.priority() > content.priority() => {}
      _ => self.body = Some(content),
    }
    self
  }

  /// Adds a header. `Content-Type` and `Content-Length` are managed by the render step and ignored here.
  pub fn add_header(&mut self, name: impl HeaderLike, value: impl AsRef<str>) -> &mut Self {
    let name = name.to_header();
    if !is_managed_header(&name) {
      self.headers.add(name, value);
    }
    self
  }

  /// Replaces all values of a header. Same restrictions as [`Response::add_header`].
  pub fn set_header(&mut self, name: impl HeaderLike, value: impl AsRef<str>) -> &mut Self {
    let name = name.to_header();
    if !is_managed_header(&name) {
      self.headers.set(name, value);
    }
    self
  }

  /// The first value of the named header.
  pub fn header(&self, name: impl HeaderLike) -> Option<&str> {
    self.headers.get(name)
  }

  /// Resolves the content into body bytes and a content type.
  ///
  /// This only reads `self`, so rendering twice yields the same result.
  pub fn render(&self) -> RenderedResponse {
    let (body, content_type) = match &self.body {
      Some(ResponseBody::Json(value)) => {
        (value.to_string().into_bytes(), Some(MimeType::ApplicationJson))
      }
      Some(ResponseBody::Html(html)) => (html.as_bytes().to_vec(), Some(MimeType::TextHtml)),
      Some(ResponseBody::Text(text)) => (text.as_bytes().to_vec(), Some(MimeType::TextPlain)),
      Some(ResponseBody::Raw(raw)) => {
        (raw.clone(), Some(self.content_type.clone().unwrap_or(MimeType::TextHtml)))
      }
      None => (Vec::new(), self.content_type.clone()),
    };

    let mut headers = self.headers.clone();
    if let Some(content_type) = content_type {
      headers.set(HeaderName::ContentType, content_type.as_str());
    }

    RenderedResponse { status_code: self.status_code, headers, body }
  }
}

fn is_managed_header(name: &HeaderName) -> bool {
  matches!(name, HeaderName::ContentType | HeaderName::ContentLength)
}

/// The final form of a response: status, headers including `Content-Type`, and body bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedResponse {
  status_code: StatusCode,
  headers: Headers,
  body: Vec<u8>,
}

impl RenderedResponse {
  /// The status code.
  pub fn status_code(&self) -> StatusCode {
    self.status_code
  }

  /// The numeric status code.
  pub fn status(&self) -> u16 {
    self.status_code.code()
  }

  /// All headers. `Content-Length` is only added when written to the wire.
  pub fn headers(&self) -> &Headers {
    &self.headers
  }

  /// The first value of the named header.
  pub fn header(&self, name: impl HeaderLike) -> Option<&str> {
    self.headers.get(name)
  }

  pub(crate) fn set_header(&mut self, name: HeaderName, value: impl AsRef<str>) {
    self.headers.set(name, value);
  }

  /// The resolved content type.
  pub fn content_type(&self) -> Option<&str> {
    self.headers.get(HeaderName::ContentType)
  }

  /// The body bytes.
  pub fn body(&self) -> &[u8] {
    self.body.as_slice()
  }

  /// Consumes the response and returns the body bytes.
  pub fn into_body(self) -> Vec<u8> {
    self.body
  }

  /// The body as text, lossy.
  pub fn text(&self) -> String {
    String::from_utf8_lossy(self.body.as_slice()).into_owned()
  }

  /// Deserializes the body as json.
  pub fn json<T: DeserializeOwned>(&self) -> TezResult<T> {
    Ok(serde_json::from_slice(self.body.as_slice())?)
  }

  /// Serializes the response as an HTTP/1.x message.
  pub fn write_to(&self, version: HttpVersion, destination: &mut impl Write) -> io::Result<()> {
    self.write_message(version, destination, true)
  }

  /// Serializes status line and headers only, as the reply to a HEAD request.
  /// `Content-Length` still announces the length of the body.
  pub fn write_head_to(&self, version: HttpVersion, destination: &mut impl Write) -> io::Result<()> {
    self.write_message(version, destination, false)
  }

  fn write_message(
    &self,
    version: HttpVersion,
    destination: &mut impl Write,
    with_body: bool,
  ) -> io::Result<()> {
    destination.write_all(version.as_net_str().as_bytes())?;
    destination.write_all(b" ")?;
    destination.write_all(self.status_code.code().to_string().as_bytes())?;
    destination.write_all(b" ")?;
    destination.write_all(self.status_code.status_line().as_bytes())?;

    for header in self.headers.iter() {
      destination.write_all(b"\r\n")?;
      destination.write_all(header.name.to_str().as_bytes())?;
      destination.write_all(b": ")?;
      destination.write_all(header.value.as_bytes())?;
    }

    destination.write_all(format!("\r\nContent-Length: {}\r\n\r\n", self.body.len()).as_bytes())?;
    if with_body {
      destination.write_all(self.body.as_slice())?;
    }
    destination.flush()
  }
}
