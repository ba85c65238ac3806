//! Defines traits for handlers: function endpoints, per-method resource capabilities and the exception handler.

use crate::http::{HttpMethod, Request, Response};
use crate::path_params::PathParams;
use crate::tez_error::{TezError, TezResult};
use std::sync::Arc;

/// Represents a function able to handle a request.
/// It fills in the response it is given. Errors go to the exception handler, if there is one.
///
/// ## Example
/// ```
/// fn home(_: &tez::Request, resp: &mut tez::Response, _: &tez::PathParams) -> tez::TezResult<()> {
///   resp.set_text("Hello from home page");
///   Ok(())
/// }
/// ```
pub trait Endpoint: Send + Sync {
  /// Serve the request.
  fn serve(&self, request: &Request, response: &mut Response, params: &PathParams) -> TezResult<()>;
}

impl<F> Endpoint for F
where
  F: Fn(&Request, &mut Response, &PathParams) -> TezResult<()> + Send + Sync,
{
  fn serve(&self, request: &Request, response: &mut Response, params: &PathParams) -> TezResult<()> {
    self(request, response, params)
  }
}

/// Called with the request, the response the failed handler was working on and the error.
/// Whatever it leaves in the response is sent. An error returned from here is not caught.
pub trait ExceptionHandler: Send + Sync {
  /// Handle the error.
  fn handle(&self, request: &Request, response: &mut Response, error: TezError) -> TezResult<()>;
}

impl<F> ExceptionHandler for F
where
  F: Fn(&Request, &mut Response, TezError) -> TezResult<()> + Send + Sync,
{
  fn handle(&self, request: &Request, response: &mut Response, error: TezError) -> TezResult<()> {
    self(request, response, error)
  }
}

/// Collects the methods a resource is registered for. Obtained from
/// [`ApplicationBuilder::add_resource`](crate::ApplicationBuilder::add_resource).
///
/// Each method can only be listed if the resource type implements the matching capability trait.
pub struct ResourceBuilder<T> {
  resource: Arc<T>,
  endpoints: Vec<(HttpMethod, Box<dyn Endpoint>)>,
}

impl<T: Send + Sync + 'static> ResourceBuilder<T> {
  pub(crate) fn new(resource: T) -> Self {
    Self { resource: Arc::new(resource), endpoints: Vec::new() }
  }

  fn with_endpoint(mut self, method: HttpMethod, endpoint: impl Endpoint + 'static) -> Self {
    self.endpoints.retain(|(existing, _)| existing != &method);
    self.endpoints.push((method, Box::new(endpoint)));
    self
  }

  pub(crate) fn into_endpoints(self) -> Vec<(HttpMethod, Box<dyn Endpoint>)> {
    self.endpoints
  }
}

macro_rules! capability {
  ($cap:ident, $op:ident, $adapter:ident, $method:expr, $verb:literal) => {
    #[doc = concat!("Capability of a resource to handle `", $verb, "` requests.")]
    pub trait $cap: Send + Sync {
      #[doc = concat!("Serve a `", $verb, "` request.")]
      fn $op(&self, request: &Request, response: &mut Response, params: &PathParams)
        -> TezResult<()>;
    }

    struct $adapter<T>(Arc<T>);

    impl<T: $cap> Endpoint for $adapter<T> {
      fn serve(
        &self,
        request: &Request,
        response: &mut Response,
        params: &PathParams,
      ) -> TezResult<()> {
        self.0.$op(request, response, params)
      }
    }

    impl<T: $cap + 'static> ResourceBuilder<T> {
      #[doc = concat!("Routes `", $verb, "` requests to the resource.")]
      pub fn $op(self) -> Self {
        let adapter = $adapter(Arc::clone(&self.resource));
        self.with_endpoint($method, adapter)
      }
    }
  };
}

capability!(Get, get, GetEndpoint, HttpMethod::Get, "GET");
capability!(Post, post, PostEndpoint, HttpMethod::Post, "POST");
capability!(Put, put, PutEndpoint, HttpMethod::Put, "PUT");
capability!(Patch, patch, PatchEndpoint, HttpMethod::Patch, "PATCH");
capability!(Delete, delete, DeleteEndpoint, HttpMethod::Delete, "DELETE");
capability!(Options, options, OptionsEndpoint, HttpMethod::Options, "OPTIONS");
