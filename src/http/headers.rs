//! Provides functionality for handling HTTP headers.

use std::fmt::Display;

/// Represents a collection of headers as part of a request or response.
///
/// Anywhere where you would specify the header name, e.g. `HeaderName::ContentType`, you can replace it
///   with the string name of the header, e.g. `Content-Type`, since both these types implement `HeaderLike`.
/// Names compare case-insensitively.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Headers(Vec<Header>);

/// Represents an individual header.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Header {
  /// The name of the header.
  pub name: HeaderName,
  /// The value of the header.
  pub value: String,
}

impl Headers {
  /// Create an empty collection of headers.
  pub fn new() -> Self {
    Self::default()
  }

  /// Get the number of headers in the collection.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns `true` if the collection is empty.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Create and add a new header with the given name and value.
  pub fn add(&mut self, name: impl HeaderLike, value: impl AsRef<str>) {
    self.0.push(Header::new(name.to_header(), value));
  }

  /// Get a reference to the value of the first header with the given name.
  pub fn get(&self, name: impl HeaderLike) -> Option<&str> {
    let header = name.to_header();
    self.0.iter().find(|h| h.name == header).map(|h| h.value.as_str())
  }

  /// Removes all previous instances of the header and sets the header to the single value.
  pub fn set(&mut self, name: impl HeaderLike, value: impl AsRef<str>) {
    let header = name.to_header();
    self.remove(&header);
    self.add(header, value);
  }

  /// Get a list of all the values of the headers with the given name.
  pub fn get_all(&self, name: impl HeaderLike) -> Vec<&str> {
    let header = name.to_header();
    self.0.iter().filter(|h| h.name == header).map(|h| h.value.as_str()).collect()
  }

  /// Remove all headers with the given name.
  pub fn remove(&mut self, name: impl HeaderLike) {
    let header = name.to_header();
    self.0.retain(|h| h.name != header);
  }

  /// Return an iterator over the headers in the collection.
  pub fn iter(&self) -> impl Iterator<Item = &Header> {
    self.0.iter()
  }
}

impl Header {
  /// Create a new header with the given name and value.
  pub fn new(name: impl HeaderLike, value: impl AsRef<str>) -> Self {
    Self { name: name.to_header(), value: value.as_ref().to_string() }
  }
}

/// Represents a type which can be interpreted as a header name.
///
/// This includes `HeaderName` and strings.
pub trait HeaderLike {
  /// Consume the value and return the corresponding header name.
  fn to_header(self) -> HeaderName;
}

impl HeaderLike for HeaderName {
  fn to_header(self) -> HeaderName {
    self
  }
}

impl HeaderLike for &HeaderName {
  fn to_header(self) -> HeaderName {
    self.clone()
  }
}

impl<T> HeaderLike for T
where
  T: AsRef<str>,
{
  fn to_header(self) -> HeaderName {
    HeaderName::from(self.as_ref())
  }
}

/// Represents the name of a header.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum HeaderName {
  /// Informs the server about the types of data that can be sent back.
  Accept,
  /// Provides credentials for HTTP authentication.
  Authorization,
  /// Indicates how the cache should behave.
  CacheControl,
  /// Indicates what should happen to the connection after the request is served.
  Connection,
  /// Indicates the length of the payload body.
  ContentLength,
  /// Indicates the MIME type of the payload body.
  ContentType,
  /// Shares any applicable HTTP cookies with the server.
  Cookie,
  /// Specifies the host to which the request is being sent, e.g. "www.example.com".
  Host,
  /// Informs the server of basic browser and device information.
  UserAgent,
  /// The set of methods supported by the resource.
  Allow,
  /// Indicates the location at which the resource can be found, used for redirects.
  Location,
  /// Contains information about the server which served the request.
  Server,
  /// Indicates that the client should set the specified cookies.
  SetCookie,
  /// Indicates the encoding used in the transfer of the payload body.
  TransferEncoding,

  /// Custom header with a lowercase name
  Custom(String),
}

/// Contains a list of all well known headers.
static WELL_KNOWN: &[HeaderName] = &[
  HeaderName::Accept,
  HeaderName::Authorization,
  HeaderName::CacheControl,
  HeaderName::Connection,
  HeaderName::ContentLength,
  HeaderName::ContentType,
  HeaderName::Cookie,
  HeaderName::Host,
  HeaderName::UserAgent,
  HeaderName::Allow,
  HeaderName::Location,
  HeaderName::Server,
  HeaderName::SetCookie,
  HeaderName::TransferEncoding,
];

impl HeaderName {
  /// Returns a static array of all well known header names
  #[must_use]
  pub fn well_known() -> &'static [HeaderName] {
    WELL_KNOWN
  }

  /// Returns true if the header is not well known.
  #[must_use]
  pub fn is_custom(&self) -> bool {
    matches!(self, HeaderName::Custom(_))
  }

  /// Returns a &str of the header name without copying.
  #[must_use]
  pub fn to_str(&self) -> &str {
    match self {
      HeaderName::Accept => "Accept",
      HeaderName::Authorization => "Authorization",
      HeaderName::CacheControl => "Cache-Control",
      HeaderName::Connection => "Connection",
      HeaderName::ContentLength => "Content-Length",
      HeaderName::ContentType => "Content-Type",
      HeaderName::Cookie => "Cookie",
      HeaderName::Host => "Host",
      HeaderName::UserAgent => "User-Agent",
      HeaderName::Allow => "Allow",
      HeaderName::Location => "Location",
      HeaderName::Server => "Server",
      HeaderName::SetCookie => "Set-Cookie",
      HeaderName::TransferEncoding => "Transfer-Encoding",
      HeaderName::Custom(name) => name.as_str(),
    }
  }
}

impl From<&str> for HeaderName {
  fn from(name: &str) -> Self {
    let lower = name.to_ascii_lowercase();
    for known in WELL_KNOWN {
      if known.to_str().eq_ignore_ascii_case(&lower) {
        return known.clone();
      }
    }

    HeaderName::Custom(lower)
  }
}

impl Display for HeaderName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.to_str())
  }
}
