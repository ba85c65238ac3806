//! Contains the route table and the matching of request paths against route patterns.

use crate::handler::{Endpoint, ResourceBuilder};
use crate::http::{HttpMethod, Request};
use crate::path_params::PathParams;
use crate::tez_error::{RouteRegistrationError, TezResult};
use crate::{debug_log, trace_log, warn_log};
use regex::Regex;
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};

#[derive(Debug, Clone)]
enum PathPart {
  Literal(String),
  Variable(String),
  RegexVariable(String, Regex),
}

impl PathPart {
  fn parse(pattern: &str) -> TezResult<Vec<PathPart>> {
    let invalid = |reason: &str| {
      warn_log!("Invalid route pattern {} {}", pattern, reason);
      RouteRegistrationError::InvalidPattern(pattern.to_string(), reason.to_string())
    };

    if !pattern.starts_with('/') {
      return Err(invalid("pattern must start with /").into());
    }

    let mut names = HashSet::new();
    let mut parts = Vec::new();
    for segment in pattern.split('/') {
      let Some(variable) = segment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) else {
        parts.push(PathPart::Literal(segment.to_string()));
        continue;
      };

      let (name, constraint) = match variable.split_once(':') {
        Some((name, constraint)) => (name, Some(constraint)),
        None => (variable, None),
      };

      if !is_identifier(name) {
        return Err(invalid(&format!("placeholder name {name:?} is not an identifier")).into());
      }

      if !names.insert(name) {
        return Err(invalid(&format!("placeholder {name} is used twice")).into());
      }

      let Some(constraint) = constraint else {
        parts.push(PathPart::Variable(name.to_string()));
        continue;
      };

      let regex = Regex::new(&format!("^(?:{constraint})$"))
        .map_err(|e| invalid(&format!("placeholder {name} has an invalid regex: {e}")))?;
      parts.push(PathPart::RegexVariable(name.to_string(), regex));
    }

    Ok(parts)
  }

  fn matches(&self, segment: &str, params: &mut PathParams) -> bool {
    match self {
      PathPart::Literal(literal) => segment == literal.as_str(),
      PathPart::Variable(name) => {
        if segment.is_empty() {
          return false;
        }
        params.insert(name, segment);
        true
      }
      PathPart::RegexVariable(name, regex) => {
        if segment.is_empty() || !regex.is_match(segment) {
          return false;
        }
        params.insert(name, segment);
        true
      }
    }
  }
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) enum RouteHandler {
  Function(Box<dyn Endpoint>),
  Resource(Vec<(HttpMethod, Box<dyn Endpoint>)>),
}

/// A registered route: a pattern, the methods it accepts and its handler.
pub struct Route {
  pattern: String,
  parts: Vec<PathPart>,
  methods: Vec<HttpMethod>,
  handler: RouteHandler,
}

impl Route {
  /// A route served by a single function for the given methods.
  /// An empty method list is rejected, use [`Route::get`] for the default.
  pub fn function<M>(
    pattern: impl ToString,
    methods: impl IntoIterator<Item = M>,
    endpoint: impl Endpoint + 'static,
  ) -> TezResult<Self>
  where
    M: Into<HttpMethod>,
  {
    let methods = methods.into_iter().map(Into::into).collect();
    Self::new(pattern.to_string(), methods, RouteHandler::Function(Box::new(endpoint)))
  }

  /// A route served by a single function for GET requests only.
  pub fn get(pattern: impl ToString, endpoint: impl Endpoint + 'static) -> TezResult<Self> {
    Self::function(pattern, [HttpMethod::Get], endpoint)
  }

  /// A route served by a resource. It accepts exactly the methods listed on the builder.
  pub fn resource<T: Send + Sync + 'static>(
    pattern: impl ToString,
    resource: ResourceBuilder<T>,
  ) -> TezResult<Self> {
    let endpoints = resource.into_endpoints();
    let methods = endpoints.iter().map(|(method, _)| method.clone()).collect();
    Self::new(pattern.to_string(), methods, RouteHandler::Resource(endpoints))
  }

  fn new(pattern: String, mut methods: Vec<HttpMethod>, handler: RouteHandler) -> TezResult<Self> {
    let parts = PathPart::parse(pattern.as_str())?;
    methods.sort();
    methods.dedup();
    if methods.is_empty() {
      return Err(RouteRegistrationError::NoMethods(pattern).into());
    }

    Ok(Self { pattern, parts, methods, handler })
  }

  /// The raw pattern string this route was registered with.
  pub fn pattern(&self) -> &str {
    self.pattern.as_str()
  }

  /// The methods this route accepts, sorted.
  pub fn methods(&self) -> &[HttpMethod] {
    self.methods.as_slice()
  }

  /// true if the method is accepted by this route.
  pub fn permits(&self, method: &HttpMethod) -> bool {
    self.methods.contains(method)
  }

  /// Matches the path against the pattern, segment by segment.
  /// Returns the bound placeholders on success.
  pub fn match_path(&self, path: &str) -> Option<PathParams> {
    self.match_segments(path.split('/'))
  }

  /// Matches already split and decoded path segments against the pattern.
  /// The first segment is the empty one before the leading `/`.
  pub fn match_segments<S: AsRef<str>>(
    &self,
    segments: impl IntoIterator<Item = S>,
  ) -> Option<PathParams> {
    let mut params = PathParams::new();
    let mut segments = segments.into_iter();
    for part in &self.parts {
      let segment = segments.next()?;
      if !part.matches(segment.as_ref(), &mut params) {
        return None;
      }
    }

    if segments.next().is_some() {
      return None;
    }

    Some(params)
  }

  pub(crate) fn endpoint(&self, method: &HttpMethod) -> Option<&dyn Endpoint> {
    match &self.handler {
      RouteHandler::Function(endpoint) => Some(endpoint.as_ref()),
      RouteHandler::Resource(endpoints) => endpoints
        .iter()
        .find(|(candidate, _)| candidate == method)
        .map(|(_, endpoint)| endpoint.as_ref()),
    }
  }
}

impl Debug for Route {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let kind = match self.handler {
      RouteHandler::Function(_) => "function",
      RouteHandler::Resource(_) => "resource",
    };
    write!(f, "Route({} {:?} {})", self.pattern, self.methods, kind)
  }
}

/// Outcome of resolving a request against the route table.
#[derive(Debug)]
pub enum RoutingDecision<'a> {
  /// The route accepts the path and the method.
  Matched {
    /// The matched route.
    route: &'a Route,
    /// The values bound to its placeholders.
    params: PathParams,
  },
  /// No pattern matches the path.
  NotFound,
  /// Some pattern matches the path, but none of those routes accept the method.
  MethodNotAllowed {
    /// Union of the methods the matching routes accept, sorted.
    allowed: Vec<HttpMethod>,
  },
}

/// The route table. Filled while the application is built, read-only afterwards.
#[derive(Debug, Default)]
pub struct Router {
  routes: Vec<Route>,
}

impl Router {
  /// An empty route table.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a route. Fails if a route with the identical pattern string exists,
  /// in which case the table is left as it was.
  pub fn register(&mut self, route: Route) -> TezResult<()> {
    if self.routes.iter().any(|existing| existing.pattern == route.pattern) {
      warn_log!("Route {} is already registered", route.pattern);
      return Err(RouteRegistrationError::DuplicateRoute(route.pattern).into());
    }

    debug_log!("Registered {:?}", route);
    self.routes.push(route);
    Ok(())
  }

  /// Finds the route for the path and method.
  ///
  /// Routes are tried in registration order, the first one whose pattern matches the path and
  /// which accepts the method wins. Method names compare case-insensitively since
  /// [`HttpMethod`] normalizes them.
  pub fn resolve(&self, path: &str, method: &HttpMethod) -> RoutingDecision<'_> {
    let segments = path.split('/').collect::<Vec<_>>();
    self.resolve_segments(path, &segments, method)
  }

  /// Finds the route for the request. Placeholders bind the individually decoded
  /// segments from [`Request::path_segments`], so `%2F` inside a value does not split it.
  pub fn resolve_request(&self, request: &Request) -> RoutingDecision<'_> {
    let segments = request.path_segments();
    self.resolve_segments(request.path(), &segments, request.method())
  }

  fn resolve_segments<S: AsRef<str>>(
    &self,
    path: &str,
    segments: &[S],
    method: &HttpMethod,
  ) -> RoutingDecision<'_> {
    let mut allowed: Vec<HttpMethod> = Vec::new();

    for route in &self.routes {
      let Some(params) = route.match_segments(segments) else {
        continue;
      };

      if route.permits(method) {
        trace_log!("Resolved {} {} to {:?}", method, path, route);
        return RoutingDecision::Matched { route, params };
      }

      allowed.extend(route.methods.iter().cloned());
    }

    if allowed.is_empty() {
      trace_log!("No route for {} {}", method, path);
      return RoutingDecision::NotFound;
    }

    allowed.sort();
    allowed.dedup();
    trace_log!("Method {} not allowed for {}, allowed {:?}", method, path, allowed);
    RoutingDecision::MethodNotAllowed { allowed }
  }

  /// The registered routes in registration order.
  pub fn routes(&self) -> impl Iterator<Item = &Route> {
    self.routes.iter()
  }

  /// Number of registered routes.
  pub fn len(&self) -> usize {
    self.routes.len()
  }

  /// true if no route is registered.
  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::http::{Request, Response};

  fn noop(_: &Request, _: &mut Response, _: &PathParams) -> TezResult<()> {
    Ok(())
  }

  #[test]
  fn segments_must_line_up() {
    let route = Route::get("/hello/{name}", noop).unwrap();
    let params = route.match_path("/hello/davron").unwrap();
    assert_eq!(params.get("name"), Some("davron"));

    assert!(route.match_path("/hello").is_none());
    assert!(route.match_path("/hello/").is_none());
    assert!(route.match_path("/hello/davron/again").is_none());
    assert!(route.match_path("/hi/davron").is_none());
  }

  #[test]
  fn decoded_segments_keep_slashes() {
    let route = Route::get("/hello/{name}", noop).unwrap();
    let params = route.match_segments(["", "hello", "a/b"]).unwrap();
    assert_eq!(params.get("name"), Some("a/b"));
    assert!(route.match_path("/hello/a/b").is_none());
  }

  #[test]
  fn root_pattern() {
    let route = Route::get("/", noop).unwrap();
    assert!(route.match_path("/").is_some());
    assert!(route.match_path("/home").is_none());
  }

  #[test]
  fn constrained_placeholder() {
    let route = Route::get("/books/{id:[0-9]+}", noop).unwrap();
    assert_eq!(route.match_path("/books/42").unwrap().get("id"), Some("42"));
    assert!(route.match_path("/books/abc").is_none());
    assert!(route.match_path("/books/42abc").is_none());
  }

  #[test]
  fn invalid_patterns_are_rejected() {
    for pattern in ["home", "/a/{}", "/a/{1x}", "/a/{x}/{x}", "/a/{x:(}"] {
      let err = Route::get(pattern, noop).unwrap_err();
      assert!(
        matches!(
          err.downcast_ref::<RouteRegistrationError>(),
          Some(RouteRegistrationError::InvalidPattern(_, _))
        ),
        "{pattern}"
      );
    }
  }

  #[test]
  fn empty_method_set_is_rejected() {
    let err = Route::function("/home", Vec::<HttpMethod>::new(), noop).unwrap_err();
    assert!(matches!(
      err.downcast_ref::<RouteRegistrationError>(),
      Some(RouteRegistrationError::NoMethods(_))
    ));
  }
}
