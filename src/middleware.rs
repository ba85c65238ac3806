//! Middleware observe or adjust every request before it is dispatched and every response after.

use crate::http::{Request, Response};
use crate::tez_error::TezResult;
use crate::trace_log;
use std::fmt::{Debug, Formatter};

/// A two phase hook around dispatching.
///
/// Use cases: (Non-Exhaustive)
/// - Logging of requests and responses
/// - Adding headers to every response
/// - Rewriting paths before routing
///
/// Errors returned from either hook are not given to the exception handler.
/// They abort the request and are returned to the transport.
pub trait Middleware: Send + Sync {
  /// Called before the request is routed. May modify the request.
  fn process_request(&self, _request: &mut Request) -> TezResult<()> {
    Ok(())
  }

  /// Called after the handler produced its response, before it is rendered. May modify the response.
  fn process_response(&self, _request: &Request, _response: &mut Response) -> TezResult<()> {
    Ok(())
  }
}

/// An ordered list of middleware, outermost first.
///
/// The middleware added last is the outermost one: its `process_request` runs first
/// and its `process_response` runs last.
#[derive(Default)]
pub struct MiddlewareChain {
  layers: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
  /// A chain without middleware. Handling through it is the same as calling the inner target.
  pub fn new() -> Self {
    Self::default()
  }

  /// Wraps everything added so far in the given middleware.
  pub fn add(&mut self, middleware: impl Middleware + 'static) {
    self.layers.insert(0, Box::new(middleware));
  }

  /// Number of middleware in the chain.
  pub fn len(&self) -> usize {
    self.layers.len()
  }

  /// true if there is no middleware.
  pub fn is_empty(&self) -> bool {
    self.layers.is_empty()
  }

  /// Runs the request phase, the inner target, then the response phase.
  pub fn handle<F>(&self, request: &mut Request, inner: F) -> TezResult<Response>
  where
    F: FnOnce(&Request) -> TezResult<Response>,
  {
    for layer in self.layers.iter() {
      layer.process_request(request)?;
    }

    trace_log!("Request phase done for {} {}", request.method(), request.path());
    let mut response = inner(&*request)?;

    for layer in self.layers.iter().rev() {
      layer.process_response(request, &mut response)?;
    }

    Ok(response)
  }
}

impl Debug for MiddlewareChain {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_fmt(format_args!("MiddlewareChain({})", self.layers.len()))
  }
}
