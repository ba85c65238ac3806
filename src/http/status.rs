//! Provides functionality for handling HTTP status codes.

use std::fmt::Display;

/// Represents an HTTP status code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusCode {
  /// `100 Continue`: Continue with request.
  Continue,
  /// `101 Switching Protocols`: Protocol upgrade.
  SwitchingProtocols,
  /// `200 OK`: Request succeeded.
  #[default]
  OK,
  /// `201 Created`: Resource created.
  Created,
  /// `202 Accepted`: Request received, but not yet acted upon.
  Accepted,
  /// `204 No Content`: There is no content to send for this request.
  NoContent,
  /// `301 Moved Permanently`: The resource has moved permanently to a new location.
  MovedPermanently,
  /// `302 Found`: The resource has moved temporarily to a new location.
  Found,
  /// `303 See Other`: The resource can be found under a different URI.
  SeeOther,
  /// `304 Not Modified`: The resource has not been modified since the last request.
  NotModified,
  /// `307 Temporary Redirect`: The resource has moved temporarily to a new location.
  TemporaryRedirect,
  /// `308 Permanent Redirect`: The resource has moved permanently to a new location.
  PermanentRedirect,
  /// `400 Bad Request`: The request could not be understood by the server.
  BadRequest,
  /// `401 Unauthorized`: The request requires user authentication.
  Unauthorized,
  /// `403 Forbidden`: The client is not allowed to access this content.
  Forbidden,
  /// `404 Not Found`: The server can not find the requested resource.
  NotFound,
  /// `405 Method Not Allowed`: The method specified in the request is not allowed for the resource.
  MethodNotAllowed,
  /// `406 Not Acceptable`: No content that meets the criteria is available.
  NotAcceptable,
  /// `408 Request Timeout`: The server timed out waiting for the request.
  RequestTimeout,
  /// `409 Conflict`: The request could not be completed because of a conflict with the server's current state.
  Conflict,
  /// `410 Gone`: The requested resource is no longer available.
  Gone,
  /// `411 Length Required`: The request did not specify the length of its content.
  LengthRequired,
  /// `413 Content Too Large`: The request is larger than the server is willing or able to process.
  ContentTooLarge,
  /// `414 URI Too Long`: The URI provided was too long for the server to process.
  RequestURITooLong,
  /// `415 Unsupported Media Type`: The request entity has a media type which the server or resource does not support.
  UnsupportedMediaType,
  /// `422 Unprocessable Content`: The request was well-formed but contained semantic errors.
  UnprocessableContent,
  /// `431 Request Header Fields Too Large`: The request head is too large.
  RequestHeaderFieldsTooLarge,
  /// `500 Internal Server Error`: The server encountered an unexpected error which prevented it from fulfilling the request.
  InternalServerError,
  /// `501 Not Implemented`: The server does not support the functionality required to fulfill the request.
  NotImplemented,
  /// `502 Bad Gateway`: The server, while acting as a gateway or proxy, received an invalid response from the upstream server.
  BadGateway,
  /// `503 Service Unavailable`: The server is temporarily unable to handle the request.
  ServiceUnavailable,
  /// `505 HTTP Version Not Supported`: The server does not support the HTTP protocol version used in the request.
  VersionNotSupported,

  /// Any other three digit status code. Handlers and exception handlers may pick these freely.
  Custom(u16),
}

static WELL_KNOWN: &[StatusCode] = &[
  StatusCode::Continue,
  StatusCode::SwitchingProtocols,
  StatusCode::OK,
  StatusCode::Created,
  StatusCode::Accepted,
  StatusCode::NoContent,
  StatusCode::MovedPermanently,
  StatusCode::Found,
  StatusCode::SeeOther,
  StatusCode::NotModified,
  StatusCode::TemporaryRedirect,
  StatusCode::PermanentRedirect,
  StatusCode::BadRequest,
  StatusCode::Unauthorized,
  StatusCode::Forbidden,
  StatusCode::NotFound,
  StatusCode::MethodNotAllowed,
  StatusCode::NotAcceptable,
  StatusCode::RequestTimeout,
  StatusCode::Conflict,
  StatusCode::Gone,
  StatusCode::LengthRequired,
  StatusCode::ContentTooLarge,
  StatusCode::RequestURITooLong,
  StatusCode::UnsupportedMediaType,
  StatusCode::UnprocessableContent,
  StatusCode::RequestHeaderFieldsTooLarge,
  StatusCode::InternalServerError,
  StatusCode::NotImplemented,
  StatusCode::BadGateway,
  StatusCode::ServiceUnavailable,
  StatusCode::VersionNotSupported,
];

impl StatusCode {
  /// Returns the well known status code for the number, if there is one.
  pub fn from_well_known_code(code: u16) -> Option<Self> {
    WELL_KNOWN.iter().find(|status| status.code() == code).copied()
  }

  /// Returns the status code for the number. Unknown numbers become `Custom`.
  pub fn from_code(code: u16) -> Self {
    Self::from_well_known_code(code).unwrap_or(Self::Custom(code))
  }

  /// The numeric code.
  pub const fn code(&self) -> u16 {
    match self {
      StatusCode::Continue => 100,
      StatusCode::SwitchingProtocols => 101,
      StatusCode::OK => 200,
      StatusCode::Created => 201,
      StatusCode::Accepted => 202,
      StatusCode::NoContent => 204,
      StatusCode::MovedPermanently => 301,
      StatusCode::Found => 302,
      StatusCode::SeeOther => 303,
      StatusCode::NotModified => 304,
      StatusCode::TemporaryRedirect => 307,
      StatusCode::PermanentRedirect => 308,
      StatusCode::BadRequest => 400,
      StatusCode::Unauthorized => 401,
      StatusCode::Forbidden => 403,
      StatusCode::NotFound => 404,
      StatusCode::MethodNotAllowed => 405,
      StatusCode::NotAcceptable => 406,
      StatusCode::RequestTimeout => 408,
      StatusCode::Conflict => 409,
      StatusCode::Gone => 410,
      StatusCode::LengthRequired => 411,
      StatusCode::ContentTooLarge => 413,
      StatusCode::RequestURITooLong => 414,
      StatusCode::UnsupportedMediaType => 415,
      StatusCode::UnprocessableContent => 422,
      StatusCode::RequestHeaderFieldsTooLarge => 431,
      StatusCode::InternalServerError => 500,
      StatusCode::NotImplemented => 501,
      StatusCode::BadGateway => 502,
      StatusCode::ServiceUnavailable => 503,
      StatusCode::VersionNotSupported => 505,
      StatusCode::Custom(code) => *code,
    }
  }

  /// The reason phrase that follows the code in the status line.
  pub const fn status_line(&self) -> &'static str {
    match self {
      StatusCode::Continue => "Continue",
      StatusCode::SwitchingProtocols => "Switching Protocols",
      StatusCode::OK => "OK",
      StatusCode::Created => "Created",
      StatusCode::Accepted => "Accepted",
      StatusCode::NoContent => "No Content",
      StatusCode::MovedPermanently => "Moved Permanently",
      StatusCode::Found => "Found",
      StatusCode::SeeOther => "See Other",
      StatusCode::NotModified => "Not Modified",
      StatusCode::TemporaryRedirect => "Temporary Redirect",
      StatusCode::PermanentRedirect => "Permanent Redirect",
      StatusCode::BadRequest => "Bad Request",
      StatusCode::Unauthorized => "Unauthorized",
      StatusCode::Forbidden => "Forbidden",
      StatusCode::NotFound => "Not Found",
      StatusCode::MethodNotAllowed => "Method Not Allowed",
      StatusCode::NotAcceptable => "Not Acceptable",
      StatusCode::RequestTimeout => "Request Timeout",
      StatusCode::Conflict => "Conflict",
      StatusCode::Gone => "Gone",
      StatusCode::LengthRequired => "Length Required",
      StatusCode::ContentTooLarge => "Content Too Large",
      StatusCode::RequestURITooLong => "URI Too Long",
      StatusCode::UnsupportedMediaType => "Unsupported Media Type",
      StatusCode::UnprocessableContent => "Unprocessable Content",
      StatusCode::RequestHeaderFieldsTooLarge => "Request Header Fields Too Large",
      StatusCode::InternalServerError => "Internal Server Error",
      StatusCode::NotImplemented => "Not Implemented",
      StatusCode::BadGateway => "Bad Gateway",
      StatusCode::ServiceUnavailable => "Service Unavailable",
      StatusCode::VersionNotSupported => "HTTP Version Not Supported",
      StatusCode::Custom(_) => "Unknown",
    }
  }

  /// true for 2xx codes.
  pub const fn is_success(&self) -> bool {
    let code = self.code();
    code >= 200 && code < 300
  }
}

impl From<u16> for StatusCode {
  fn from(value: u16) -> Self {
    StatusCode::from_code(value)
  }
}

impl Display for StatusCode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", self.code(), self.status_line())
  }
}
