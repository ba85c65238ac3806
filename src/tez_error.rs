//! Error types of the crate.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::io::ErrorKind;

/// Result type used throughout tez.
pub type TezResult<T> = Result<T, TezError>;

/// Errors raised while routes are registered.
/// These only ever occur while an application is built, never while serving.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum RouteRegistrationError {
  /// The raw pattern string is already registered.
  DuplicateRoute(String),
  /// The pattern could not be parsed. (pattern, reason)
  InvalidPattern(String, String),
  /// The route would not accept any http method.
  NoMethods(String),
}

impl Display for RouteRegistrationError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RouteRegistrationError::DuplicateRoute(pattern) => {
        write!(f, "route {pattern} is already registered")
      }
      RouteRegistrationError::InvalidPattern(pattern, reason) => {
        write!(f, "route pattern {pattern} is invalid: {reason}")
      }
      RouteRegistrationError::NoMethods(pattern) => {
        write!(f, "route {pattern} does not accept any http method")
      }
    }
  }
}

impl Error for RouteRegistrationError {}

/// Errors raised by the transport adapter while reading a request off the wire.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum RequestParsingError {
  /// The connection was closed before a request line was received.
  ConnectionClosed,
  /// The request line is not `METHOD PATH VERSION`.
  InvalidStatusLine(String),
  /// The request line or a header line is not valid utf-8.
  NotUtf8,
  /// The request head exceeded the configured buffer size.
  HeadTooLarge(usize),
  /// The path is not absolute.
  InvalidPath(String),
  /// The path contains an invalid percent encoding.
  InvalidPathUrlEncoding(String),
  /// A header line has no colon or an empty name.
  InvalidHeaderLine(String),
  /// The http version is not 1.0 or 1.1.
  HttpVersionNotSupported(String),
  /// The Content-Length header is not a number.
  InvalidContentLength(String),
  /// The Content-Length header exceeds the configured maximum.
  BodyTooLarge(u64),
  /// Chunked or otherwise encoded request bodies are not supported.
  TransferEncodingNotSupported(String),
}

impl Display for RequestParsingError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RequestParsingError::ConnectionClosed => f.write_str("connection closed before request"),
      RequestParsingError::InvalidStatusLine(line) => write!(f, "invalid request line {line:?}"),
      RequestParsingError::NotUtf8 => f.write_str("request head is not valid utf-8"),
      RequestParsingError::HeadTooLarge(limit) => {
        write!(f, "request head exceeds {limit} bytes")
      }
      RequestParsingError::InvalidPath(path) => write!(f, "invalid request path {path:?}"),
      RequestParsingError::InvalidPathUrlEncoding(path) => {
        write!(f, "invalid percent encoding in path {path:?}")
      }
      RequestParsingError::InvalidHeaderLine(line) => write!(f, "invalid header line {line:?}"),
      RequestParsingError::HttpVersionNotSupported(version) => {
        write!(f, "http version {version:?} is not supported")
      }
      RequestParsingError::InvalidContentLength(value) => {
        write!(f, "invalid Content-Length {value:?}")
      }
      RequestParsingError::BodyTooLarge(len) => write!(f, "request body of {len} bytes is too large"),
      RequestParsingError::TransferEncodingNotSupported(enc) => {
        write!(f, "transfer encoding {enc:?} is not supported")
      }
    }
  }
}

impl Error for RequestParsingError {}

/// Errors raised by the template collaborator.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum TemplateError {
  /// No template with this name exists in the template directory.
  NotFound(String),
  /// The template exists but could not be rendered. (name, message)
  Render(String, String),
}

impl Display for TemplateError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      TemplateError::NotFound(name) => write!(f, "template {name} not found"),
      TemplateError::Render(name, msg) => write!(f, "template {name} failed to render: {msg}"),
    }
  }
}

impl Error for TemplateError {}

/// Errors caused by invalid application configuration.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum UserError {
  /// The head buffer size is below the minimum of 256 bytes.
  HeadBufferTooSmall(usize),
  /// The static file prefix is empty or `/`, which would shadow every route.
  InvalidStaticPrefix(String),
}

impl Display for UserError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      UserError::HeadBufferTooSmall(size) => {
        write!(f, "head buffer size {size} is below the minimum of 256 bytes")
      }
      UserError::InvalidStaticPrefix(prefix) => write!(f, "invalid static prefix {prefix:?}"),
    }
  }
}

impl Error for UserError {}

/// The error type of tez.
///
/// Any `std::error::Error` converts into this via `?`, which is what handlers rely on.
#[derive(Debug)]
#[non_exhaustive]
pub enum TezError {
  /// A route could not be registered.
  RouteRegistration(RouteRegistrationError),
  /// A request could not be read from the transport.
  RequestParsing(RequestParsingError),
  /// A template could not be rendered.
  Template(TemplateError),
  /// The application was configured with invalid values.
  User(UserError),
  /// An io error.
  IO(io::Error),
  /// Anything else, most commonly an error returned by a handler.
  Other(Box<dyn Error + Send + Sync>),
}

impl TezError {
  /// Creates an io error with the given kind and message.
  pub fn new_io<E: Into<Box<dyn Error + Send + Sync>>>(kind: ErrorKind, message: E) -> TezError {
    io::Error::new(kind, message).into()
  }

  /// Wraps an arbitrary message as an error. Handy inside handlers.
  pub fn msg(message: impl ToString) -> TezError {
    TezError::Other(message.to_string().into())
  }

  /// Best effort io error kind of this error.
  pub fn kind(&self) -> ErrorKind {
    match self {
      TezError::IO(io) => io.kind(),
      TezError::RequestParsing(_) => ErrorKind::InvalidData,
      TezError::Template(TemplateError::NotFound(_)) => ErrorKind::NotFound,
      TezError::User(_) => ErrorKind::InvalidInput,
      _ => ErrorKind::Other,
    }
  }

  /// Attempts to downcast the contained error.
  pub fn downcast_ref<T: Error + Send + 'static>(&self) -> Option<&T> {
    match self {
      TezError::RouteRegistration(err) => (err as &dyn Error).downcast_ref::<T>(),
      TezError::RequestParsing(err) => (err as &dyn Error).downcast_ref::<T>(),
      TezError::Template(err) => (err as &dyn Error).downcast_ref::<T>(),
      TezError::User(err) => (err as &dyn Error).downcast_ref::<T>(),
      TezError::IO(err) => (err as &dyn Error).downcast_ref::<T>(),
      TezError::Other(other) => other.downcast_ref::<T>(),
    }
  }

  /// Attempts to downcast the contained error.
  pub fn downcast_mut<T: Error + Send + 'static>(&mut self) -> Option<&mut T> {
    match self {
      TezError::RouteRegistration(err) => (err as &mut dyn Error).downcast_mut::<T>(),
      TezError::RequestParsing(err) => (err as &mut dyn Error).downcast_mut::<T>(),
      TezError::Template(err) => (err as &mut dyn Error).downcast_mut::<T>(),
      TezError::User(err) => (err as &mut dyn Error).downcast_mut::<T>(),
      TezError::IO(err) => (err as &mut dyn Error).downcast_mut::<T>(),
      TezError::Other(other) => other.downcast_mut::<T>(),
    }
  }

  /// Unwraps the contained error.
  pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
    match self {
      TezError::RouteRegistration(err) => Box::new(err),
      TezError::RequestParsing(err) => Box::new(err),
      TezError::Template(err) => Box::new(err),
      TezError::User(err) => Box::new(err),
      TezError::IO(err) => Box::new(err),
      TezError::Other(other) => other,
    }
  }
}

impl Display for TezError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      TezError::RouteRegistration(err) => Display::fmt(err, f),
      TezError::RequestParsing(err) => Display::fmt(err, f),
      TezError::Template(err) => Display::fmt(err, f),
      TezError::User(err) => Display::fmt(err, f),
      TezError::IO(err) => Display::fmt(err, f),
      TezError::Other(err) => Display::fmt(err, f),
    }
  }
}

impl<T> From<T> for TezError
where
  T: Error + Send + Sync + 'static,
{
  fn from(value: T) -> Self {
    let mut dyn_box = Box::new(value) as Box<dyn Error + Send + Sync>;
    dyn_box = match dyn_box.downcast::<io::Error>() {
      Ok(err) => return TezError::IO(*err),
      Err(err) => err,
    };
    dyn_box = match dyn_box.downcast::<RouteRegistrationError>() {
      Ok(err) => return TezError::RouteRegistration(*err),
      Err(err) => err,
    };
    dyn_box = match dyn_box.downcast::<RequestParsingError>() {
      Ok(err) => return TezError::RequestParsing(*err),
      Err(err) => err,
    };
    dyn_box = match dyn_box.downcast::<TemplateError>() {
      Ok(err) => return TezError::Template(*err),
      Err(err) => err,
    };
    dyn_box = match dyn_box.downcast::<UserError>() {
      Ok(err) => return TezError::User(*err),
      Err(err) => err,
    };

    TezError::Other(dyn_box)
  }
}

impl From<TezError> for io::Error {
  fn from(value: TezError) -> Self {
    match value {
      TezError::IO(io) => io,
      err => io::Error::new(err.kind(), err.into_inner()),
    }
  }
}
