//! Provides the composition root: [`ApplicationBuilder`] for registration and configuration,
//! [`Application`] for serving requests.

use crate::dispatcher::Dispatcher;
use crate::handler::{Endpoint, ExceptionHandler, ResourceBuilder};
use crate::http::{Headers, HttpMethod, RenderedResponse, Request, StatusCode};
use crate::middleware::{Middleware, MiddlewareChain};
use crate::router::{Route, Router};
use crate::static_files::StaticFiles;
use crate::templates::Templates;
use crate::test_client::TestClient;
use crate::tez_error::{TezResult, UserError};
use crate::{debug_log, trace_log};
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Collects routes, middleware and configuration. Consumed by [`ApplicationBuilder::build`].
pub struct ApplicationBuilder {
  router: Router,
  middleware: MiddlewareChain,
  exception_handler: Option<Box<dyn ExceptionHandler>>,
  static_dir: Option<PathBuf>,
  static_prefix: String,
  templates: Templates,
  max_head_buffer_size: usize,
  max_body_size: u64,
}

impl Default for ApplicationBuilder {
  fn default() -> Self {
    Self {
      router: Router::new(),
      middleware: MiddlewareChain::new(),
      exception_handler: None,
      static_dir: Some(PathBuf::from("static")),
      static_prefix: "/static".to_string(),
      templates: Templates::new("templates"),
      max_head_buffer_size: 8192,
      max_body_size: 1024 * 1024,
    }
  }
}

impl ApplicationBuilder {
  /// Build an [`Application`] using a closure or fn which receives the builder.
  ///
  /// ```
  /// use tez::{ApplicationBuilder, PathParams, Request, Response, TezResult};
  ///
  /// fn home(_: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  ///   resp.set_text("Hello from home page");
  ///   Ok(())
  /// }
  ///
  /// let app = ApplicationBuilder::builder(|builder| builder.add_route("/home", home)).unwrap();
  /// let resp = app.test_client().get("/home").unwrap();
  /// assert_eq!(resp.text(), "Hello from home page");
  /// ```
  pub fn builder<T: FnOnce(ApplicationBuilder) -> TezResult<ApplicationBuilder>>(
    closure: T,
  ) -> TezResult<Application> {
    closure(ApplicationBuilder::default()).map(|builder| builder.build())
  }

  /// Build `Arc<Application>` using a closure or fn which receives the builder.
  pub fn builder_arc<T: FnOnce(ApplicationBuilder) -> TezResult<ApplicationBuilder>>(
    closure: T,
  ) -> TezResult<Arc<Application>> {
    closure(ApplicationBuilder::default()).map(|builder| builder.build_arc())
  }

  /// Creates the application. Nothing can be registered afterwards.
  pub fn build(self) -> Application {
    let static_files =
      self.static_dir.map(|directory| StaticFiles::new(self.static_prefix.as_str(), directory));

    debug_log!(
      "Building application with {} routes, {} middleware, static files {:?}",
      self.router.len(),
      self.middleware.len(),
      static_files
    );

    Application {
      dispatcher: Dispatcher::new(self.router, self.exception_handler),
      middleware: self.middleware,
      static_files,
      templates: self.templates,
      max_head_buffer_size: self.max_head_buffer_size,
      max_body_size: self.max_body_size,
    }
  }

  /// This method is equivalent to calling `Arc::new(builder.build())`
  pub fn build_arc(self) -> Arc<Application> {
    Arc::new(self.build())
  }

  /// Registers a function handler that only accepts GET.
  ///
  /// Fails if the pattern is invalid or already registered.
  pub fn add_route(
    self,
    pattern: impl ToString,
    endpoint: impl Endpoint + 'static,
  ) -> TezResult<Self> {
    self.add(Route::get(pattern, endpoint)?)
  }

  /// Registers a function handler for an explicit set of methods.
  /// Method names are case-insensitive, `["post"]` and `[HttpMethod::Post]` are the same.
  pub fn add_route_with_methods<M: Into<HttpMethod>>(
    self,
    pattern: impl ToString,
    methods: impl IntoIterator<Item = M>,
    endpoint: impl Endpoint + 'static,
  ) -> TezResult<Self> {
    self.add(Route::function(pattern, methods, endpoint)?)
  }

  /// Registers a resource. The closure lists the methods it serves, each one requires the
  /// matching capability trait:
  ///
  /// ```
  /// use tez::{ApplicationBuilder, Get, PathParams, Post, Request, Response, TezResult};
  ///
  /// struct Books;
  ///
  /// impl Get for Books {
  ///   fn get(&self, _: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  ///     resp.set_text("Books page");
  ///     Ok(())
  ///   }
  /// }
  ///
  /// impl Post for Books {
  ///   fn post(&self, _: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  ///     resp.set_text("Endpoint to create a book");
  ///     Ok(())
  ///   }
  /// }
  ///
  /// let app = ApplicationBuilder::builder(|builder| {
  ///   builder.add_resource("/books", Books, |books| books.get().post())
  /// })
  /// .unwrap();
  /// assert_eq!(app.test_client().post("/books", "").unwrap().text(), "Endpoint to create a book");
  /// ```
  pub fn add_resource<T: Send + Sync + 'static>(
    self,
    pattern: impl ToString,
    resource: T,
    methods: impl FnOnce(ResourceBuilder<T>) -> ResourceBuilder<T>,
  ) -> TezResult<Self> {
    let route = Route::resource(pattern, methods(ResourceBuilder::new(resource)))?;
    self.add(route)
  }

  /// Registers a prepared route.
  pub fn add(mut self, route: Route) -> TezResult<Self> {
    self.router.register(route)?;
    Ok(self)
  }

  /// Wraps the middleware added so far. The last added middleware sees the request first
  /// and the response last.
  pub fn add_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
    self.middleware.add(middleware);
    self
  }

  /// Sets the exception handler, replacing a previously set one.
  pub fn add_exception_handler(mut self, handler: impl ExceptionHandler + 'static) -> Self {
    if self.exception_handler.is_some() {
      debug_log!("Replacing exception handler");
    }
    self.exception_handler = Some(Box::new(handler));
    self
  }

  /// Sets the directory static files are served from. Default is `static`.
  pub fn with_static_dir(mut self, directory: impl Into<PathBuf>) -> Self {
    self.static_dir = Some(directory.into());
    self
  }

  /// Sets the url prefix for static files. Default is `/static`.
  ///
  /// An empty prefix or `/` would capture every request and is rejected.
  pub fn with_static_prefix(mut self, prefix: impl ToString) -> TezResult<Self> {
    let prefix = prefix.to_string();
    if prefix.trim_matches('/').is_empty() {
      return Err(UserError::InvalidStaticPrefix(prefix).into());
    }

    self.static_prefix = prefix;
    Ok(self)
  }

  /// Disables static file serving. Paths under the prefix are then routed like any other path.
  pub fn without_static_files(mut self) -> Self {
    self.static_dir = None;
    self
  }

  /// Sets the template directory. Default is `templates`.
  pub fn with_templates_dir(mut self, directory: impl Into<PathBuf>) -> Self {
    self.templates = Templates::new(directory);
    self
  }

  /// The templates of the application under construction, for handlers that render html.
  /// Call this after [`ApplicationBuilder::with_templates_dir`].
  pub fn templates(&self) -> Templates {
    self.templates.clone()
  }

  /// Wraps the builder in `Ok`, for closures whose last step cannot fail.
  pub fn ok(self) -> TezResult<Self> {
    Ok(self)
  }

  /// Sets the maximum head buffer size. Default value is 8192.
  ///
  /// This is the maximum length of the request line and all header lines together
  /// as read by [`Application::handle_connection`], including the CRLF trailers.
  ///
  /// Setting this value to below a minimum of 0x100/256 is prevented and will cause this fn to return Err.
  pub fn with_max_head_buffer_size(mut self, size: usize) -> TezResult<Self> {
    if size < 0x100 {
      return Err(UserError::HeadBufferTooSmall(size).into());
    }

    self.max_head_buffer_size = size;
    Ok(self)
  }

  /// Sets the largest accepted Content-Length for [`Application::handle_connection`]. Default 1 MiB.
  pub fn with_max_body_size(mut self, size: u64) -> Self {
    self.max_body_size = size;
    self
  }
}

impl Debug for ApplicationBuilder {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ApplicationBuilder")
      .field("router", &self.router)
      .field("middleware", &self.middleware)
      .field("exception_handler", &self.exception_handler.is_some())
      .field("static_dir", &self.static_dir)
      .field("static_prefix", &self.static_prefix)
      .field("templates", &self.templates)
      .finish()
  }
}

/// A built application. Immutable, so it can be shared between threads serving requests.
pub struct Application {
  dispatcher: Dispatcher,
  middleware: MiddlewareChain,
  static_files: Option<StaticFiles>,
  templates: Templates,
  max_head_buffer_size: usize,
  max_body_size: u64,
}

impl Application {
  /// Shorthand for [`ApplicationBuilder::builder`].
  pub fn builder<T: FnOnce(ApplicationBuilder) -> TezResult<ApplicationBuilder>>(
    closure: T,
  ) -> TezResult<Application> {
    ApplicationBuilder::builder(closure)
  }

  /// Processes one request and renders the response.
  ///
  /// Requests under the static prefix are answered from the static directory without running
  /// middleware. All other requests go through the middleware chain and the dispatcher.
  /// The response is rendered once, after the last `process_response` hook.
  ///
  /// Errors from middleware, from handlers without an exception handler,
  /// and from the exception handler itself are returned.
  pub fn handle(&self, mut request: Request) -> TezResult<RenderedResponse> {
    if let Some(static_files) = self.static_files.as_ref() {
      if static_files.is_static_path(request.path()) {
        trace_log!("Static request {} {}", request.method(), request.path());
        return Ok(static_files.serve(&request)?.render());
      }
    }

    let response =
      self.middleware.handle(&mut request, |request| self.dispatcher.dispatch(request))?;
    Ok(response.render())
  }

  /// The transport boundary. `start_response` receives status and headers before the body
  /// is returned, the way a gateway interface hands them to a server.
  pub fn call<F>(&self, request: Request, start_response: F) -> TezResult<Vec<u8>>
  where
    F: FnOnce(&StatusCode, &Headers),
  {
    let response = self.handle(request)?;
    start_response(&response.status_code(), response.headers());
    Ok(response.into_body())
  }

  /// Reads one HTTP/1.x request from the stream, handles it and writes the response.
  /// The connection is not kept alive.
  pub fn handle_connection<S: Read + Write>(&self, stream: &mut S) -> TezResult<()> {
    crate::connection::serve_connection(self, stream)
  }

  /// Renders `<templates dir>/<name>` with the context.
  pub fn template(&self, name: &str, context: impl Serialize) -> TezResult<String> {
    self.templates.render_template(name, context)
  }

  /// The templates of this application.
  pub fn templates(&self) -> &Templates {
    &self.templates
  }

  /// The static file collaborator, unless disabled.
  pub fn static_files(&self) -> Option<&StaticFiles> {
    self.static_files.as_ref()
  }

  /// The dispatcher owning the route table.
  pub fn dispatcher(&self) -> &Dispatcher {
    &self.dispatcher
  }

  /// The route table.
  pub fn router(&self) -> &Router {
    self.dispatcher.router()
  }

  /// A client that sends requests to this application without a network.
  pub fn test_client(&self) -> TestClient<'_> {
    TestClient::new(self)
  }

  pub(crate) fn max_head_buffer_size(&self) -> usize {
    self.max_head_buffer_size
  }

  pub(crate) fn max_body_size(&self) -> u64 {
    self.max_body_size
  }
}

impl Debug for Application {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Application")
      .field("dispatcher", &self.dispatcher)
      .field("middleware", &self.middleware)
      .field("static_files", &self.static_files)
      .field("templates", &self.templates)
      .field("max_head_buffer_size", &self.max_head_buffer_size)
      .field("max_body_size", &self.max_body_size)
      .finish()
  }
}
