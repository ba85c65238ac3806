//! Values bound to `{name}` placeholders of a matched route.

use crate::tez_error::{TezError, TezResult};
use std::error::Error;
use std::str::FromStr;

/// The placeholder values of the route that matched a request, in pattern order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
  /// No parameters.
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn insert(&mut self, name: &str, value: &str) {
    self.0.push((name.to_string(), value.to_string()));
  }

  /// The value bound to `name`.
  pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
    let name = name.as_ref();
    self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
  }

  /// Parses the value bound to `name`.
  ///
  /// ```
  /// # use tez::{PathParams, Request, Response, TezResult};
  /// fn book(_: &Request, resp: &mut Response, params: &PathParams) -> TezResult<()> {
  ///   let id: u64 = params.parse("id")?;
  ///   resp.set_text(format!("book {id}"));
  ///   Ok(())
  /// }
  /// ```
  pub fn parse<T, E>(&self, name: impl AsRef<str>) -> TezResult<T>
  where
    T: FromStr<Err = E>,
    E: Error + Send + Sync + 'static,
  {
    let name = name.as_ref();
    let value = self
      .get(name)
      .ok_or_else(|| TezError::msg(format!("path parameter {name} is not bound")))?;
    Ok(value.parse::<T>()?)
  }

  /// Iterates over `(name, value)` pairs in pattern order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
  }

  /// Number of bound parameters.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// true if the route has no placeholders.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
