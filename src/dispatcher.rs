//! Runs one request against the route table and invokes the handler.

use crate::default_functions::{default_method_not_allowed_handler, default_not_found_handler};
use crate::handler::ExceptionHandler;
use crate::http::{Request, Response};
use crate::router::{Router, RoutingDecision};
use crate::tez_error::TezResult;
use crate::{error_log, trace_log, warn_log};
use std::fmt::{Debug, Formatter};

/// Owns the route table and the optional exception handler.
///
/// Route misses are ordinary outcomes and become fixed 404/405 responses.
/// Handler errors are given to the exception handler, or returned to the caller if there is none.
pub struct Dispatcher {
  router: Router,
  exception_handler: Option<Box<dyn ExceptionHandler>>,
}

impl Dispatcher {
  /// Creates a dispatcher over the route table.
  pub fn new(router: Router, exception_handler: Option<Box<dyn ExceptionHandler>>) -> Self {
    Self { router, exception_handler }
  }

  /// The route table.
  pub fn router(&self) -> &Router {
    &self.router
  }

  /// true if an exception handler is installed.
  pub fn has_exception_handler(&self) -> bool {
    self.exception_handler.is_some()
  }

  /// Resolves the route and invokes its handler.
  ///
  /// The returned response is not rendered yet, middleware may still change it.
  pub fn dispatch(&self, request: &Request) -> TezResult<Response> {
    let (route, params) = match self.router.resolve_request(request) {
      RoutingDecision::Matched { route, params } => (route, params),
      RoutingDecision::NotFound => return Ok(default_not_found_handler(request)),
      RoutingDecision::MethodNotAllowed { allowed } => {
        return Ok(default_method_not_allowed_handler(request, &allowed))
      }
    };

    let mut response = Response::new();
    let Some(endpoint) = route.endpoint(request.method()) else {
      // the router only matches routes that permit the method.
      return Ok(default_method_not_allowed_handler(request, route.methods()));
    };

    trace_log!("Dispatching {} {} to {:?}", request.method(), request.path(), route);
    let Err(error) = endpoint.serve(request, &mut response, &params) else {
      return Ok(response);
    };

    match &self.exception_handler {
      Some(handler) => {
        warn_log!("Handler for {} {} failed: {}", request.method(), request.path(), error);
        // the exception handler decides the body.
        response.clear_body();
        handler.handle(request, &mut response, error)?;
        Ok(response)
      }
      None => {
        error_log!(
          "Handler for {} {} failed without exception handler: {}",
          request.method(),
          request.path(),
          error
        );
        Err(error)
      }
    }
  }
}

impl Debug for Dispatcher {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_fmt(format_args!(
      "Dispatcher(routes={:?}, exception_handler={})",
      self.router,
      self.exception_handler.is_some()
    ))
  }
}
