//! Provides functionality for handling HTTP methods.

use std::fmt::Display;

/// Represents an HTTP method.
#[derive(Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub enum HttpMethod {
  /// The `GET` method.
  Get,
  /// The `HEAD` method.
  Head,
  /// The `POST` method.
  Post,
  /// The `PUT` method.
  Put,
  /// The `DELETE` method.
  Delete,
  /// The `OPTIONS` method.
  Options,
  /// The `TRACE` method.
  Trace,
  /// The 'PATCH' method.
  Patch,
  /// Any other method, stored upper case.
  Custom(String),
}

static WELL_KNOWN: &[HttpMethod] = &[
  HttpMethod::Get,
  HttpMethod::Head,
  HttpMethod::Post,
  HttpMethod::Put,
  HttpMethod::Delete,
  HttpMethod::Options,
  HttpMethod::Trace,
  HttpMethod::Patch,
];

impl HttpMethod {
  /// Converts an HTTP verb into an enum variant. Matching ignores case.
  ///
  /// ## Example
  /// ```
  /// assert_eq!(tez::HttpMethod::from("post"), tez::HttpMethod::Post);
  /// assert_eq!(tez::HttpMethod::from("Purge"), tez::HttpMethod::Custom("PURGE".to_string()));
  /// ```
  pub fn from(name: &str) -> Self {
    let upper = name.to_ascii_uppercase();
    match upper.as_str() {
      "GET" => Self::Get,
      "HEAD" => Self::Head,
      "POST" => Self::Post,
      "PUT" => Self::Put,
      "DELETE" => Self::Delete,
      "OPTIONS" => Self::Options,
      "TRACE" => Self::Trace,
      "PATCH" => Self::Patch,
      _ => Self::Custom(upper),
    }
  }

  /// Returns an array of all well known http Methods.
  #[must_use]
  pub fn well_known() -> &'static [HttpMethod] {
    WELL_KNOWN
  }

  /// returns true if this is a well known http method.
  pub fn is_well_known(&self) -> bool {
    !matches!(self, Self::Custom(_))
  }

  /// returns true if this is a custom http method.
  pub fn is_custom(&self) -> bool {
    matches!(self, Self::Custom(_))
  }

  /// returns a &str with the same lifetime as self. this works for custom and none custom methods.
  pub fn as_str(&self) -> &str {
    match self {
      HttpMethod::Get => "GET",
      HttpMethod::Head => "HEAD",
      HttpMethod::Post => "POST",
      HttpMethod::Put => "PUT",
      HttpMethod::Delete => "DELETE",
      HttpMethod::Options => "OPTIONS",
      HttpMethod::Trace => "TRACE",
      HttpMethod::Patch => "PATCH",
      HttpMethod::Custom(meth) => meth.as_str(),
    }
  }
}

impl Display for HttpMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<&str> for HttpMethod {
  fn from(value: &str) -> Self {
    HttpMethod::from(value)
  }
}

impl From<&HttpMethod> for HttpMethod {
  fn from(value: &HttpMethod) -> Self {
    value.clone()
  }
}
