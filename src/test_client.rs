//! In-process client for exercising an [`Application`] without a network.

use crate::app::Application;
use crate::http::{HeaderLike, HttpMethod, RenderedResponse, Request};
use crate::tez_error::TezResult;

/// Sends requests straight to [`Application::handle`].
///
/// ```
/// use tez::{ApplicationBuilder, PathParams, Request, Response, TezResult};
///
/// fn greeting(_: &Request, resp: &mut Response, params: &PathParams) -> TezResult<()> {
///   resp.set_text(format!("Hello from {}", params.get("name").unwrap_or_default()));
///   Ok(())
/// }
///
/// let app = ApplicationBuilder::builder(|b| b.add_route("/hello/{name}", greeting)).unwrap();
/// let client = app.test_client();
/// assert_eq!(client.get("/hello/davron").unwrap().text(), "Hello from davron");
/// assert_eq!(client.get("/nope").unwrap().status(), 404);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TestClient<'a> {
  app: &'a Application,
}

impl<'a> TestClient<'a> {
  /// A client for the application.
  pub fn new(app: &'a Application) -> Self {
    Self { app }
  }

  /// Sends the request as is.
  pub fn send(&self, request: Request) -> TezResult<RenderedResponse> {
    self.app.handle(request)
  }

  /// Sends a request without body. The target may contain a query string.
  pub fn request(
    &self,
    method: impl Into<HttpMethod>,
    target: impl AsRef<str>,
  ) -> TezResult<RenderedResponse> {
    self.send(Request::new(method, target))
  }

  /// Sends a request with the given headers and body.
  pub fn request_with<H: HeaderLike, V: AsRef<str>>(
    &self,
    method: impl Into<HttpMethod>,
    target: impl AsRef<str>,
    headers: impl IntoIterator<Item = (H, V)>,
    body: impl Into<Vec<u8>>,
  ) -> TezResult<RenderedResponse> {
    let mut request = Request::new(method, target).with_body(body);
    for (name, value) in headers {
      request.headers_mut().add(name, value);
    }
    self.send(request)
  }

  /// Sends a GET request.
  pub fn get(&self, target: impl AsRef<str>) -> TezResult<RenderedResponse> {
    self.request(HttpMethod::Get, target)
  }

  /// Sends a HEAD request.
  pub fn head(&self, target: impl AsRef<str>) -> TezResult<RenderedResponse> {
    self.request(HttpMethod::Head, target)
  }

  /// Sends a POST request with a body.
  pub fn post(
    &self,
    target: impl AsRef<str>,
    body: impl Into<Vec<u8>>,
  ) -> TezResult<RenderedResponse> {
    self.send(Request::new(HttpMethod::Post, target).with_body(body))
  }

  /// Sends a PUT request with a body.
  pub fn put(&self, target: impl AsRef<str>, body: impl Into<Vec<u8>>) -> TezResult<RenderedResponse> {
    self.send(Request::new(HttpMethod::Put, target).with_body(body))
  }

  /// Sends a PATCH request with a body.
  pub fn patch(
    &self,
    target: impl AsRef<str>,
    body: impl Into<Vec<u8>>,
  ) -> TezResult<RenderedResponse> {
    self.send(Request::new(HttpMethod::Patch, target).with_body(body))
  }

  /// Sends a DELETE request.
  pub fn delete(&self, target: impl AsRef<str>) -> TezResult<RenderedResponse> {
    self.request(HttpMethod::Delete, target)
  }
}
