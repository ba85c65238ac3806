use tez::{
  ApplicationBuilder, HeaderName, HttpMethod, PathParams, Request, Response, Route,
  RouteRegistrationError, Router, RoutingDecision, TezError, TezResult,
};

fn home(_: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  resp.set_text("Hello from home page");
  Ok(())
}

fn about(_: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  resp.set_text("Hello from about page");
  Ok(())
}

fn greeting(_: &Request, resp: &mut Response, params: &PathParams) -> TezResult<()> {
  resp.set_text(format!("Hello from {}", params.get("name").unwrap_or_default()));
  Ok(())
}

fn book(_: &Request, resp: &mut Response, params: &PathParams) -> TezResult<()> {
  let id: u32 = params.parse("id")?;
  resp.set_text(format!("book {id}"));
  Ok(())
}

fn create(req: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  resp.set_text(format!("created {}", req.body_text()?));
  Ok(())
}

fn assert_duplicate(err: TezError) {
  match err {
    TezError::RouteRegistration(RouteRegistrationError::DuplicateRoute(pattern)) => {
      assert_eq!(pattern, "/home");
    }
    e => panic!("Unexpected error {e}"),
  }
}

#[test]
fn duplicate_route_leaves_table_unchanged() {
  let mut router = Router::new();
  router.register(Route::get("/home", home).unwrap()).unwrap();

  let err = router.register(Route::get("/home", about).unwrap()).unwrap_err();
  assert_duplicate(err);
  assert_eq!(router.len(), 1);

  let err = router
    .register(Route::function("/home", [HttpMethod::Post], about).unwrap())
    .unwrap_err();
  assert_duplicate(err);
  assert_eq!(router.len(), 1);

  match router.resolve("/home", &HttpMethod::Get) {
    RoutingDecision::Matched { route, .. } => {
      assert_eq!(route.pattern(), "/home");
      assert_eq!(route.methods(), &[HttpMethod::Get]);
    }
    other => panic!("Unexpected decision {other:?}"),
  }
}

#[test]
fn duplicate_route_fails_the_build() {
  let err = ApplicationBuilder::builder(|builder| {
    builder.add_route("/home", home)?.add_route("/about", about)?.add_route("/home", about)
  })
  .unwrap_err();
  assert_duplicate(err);
}

#[test]
fn basic_routes() {
  let app = ApplicationBuilder::builder(|builder| {
    builder.add_route("/home", home)?.add_route("/about", about)
  })
  .unwrap();
  let client = app.test_client();

  let resp = client.get("/home").unwrap();
  assert_eq!(resp.status(), 200);
  assert_eq!(resp.text(), "Hello from home page");
  assert_eq!(resp.content_type(), Some("text/plain"));

  assert_eq!(client.get("/about").unwrap().text(), "Hello from about page");
}

#[test]
fn unknown_path_is_not_found() {
  let app = ApplicationBuilder::builder(|builder| builder.add_route("/home", home)).unwrap();
  let client = app.test_client();

  for path in ["/nope", "/", "/home/again", "/Home"] {
    let resp = client.get(path).unwrap();
    assert_eq!(resp.status(), 404, "{path}");
    assert_eq!(resp.text(), "Not Found");
    assert_eq!(resp.content_type(), Some("text/plain"));
  }
}

#[test]
fn parameter_is_extracted() {
  let app =
    ApplicationBuilder::builder(|builder| builder.add_route("/hello/{name}", greeting)).unwrap();
  let client = app.test_client();

  let resp = client.get("/hello/davron").unwrap();
  assert_eq!(resp.status(), 200);
  assert!(resp.text().contains("davron"));

  assert_eq!(client.get("/hello/").unwrap().status(), 404);
  assert_eq!(client.get("/hello").unwrap().status(), 404);
}

#[test]
fn function_routes_default_to_get() {
  let app = ApplicationBuilder::builder(|builder| builder.add_route("/home", home)).unwrap();
  let resp = app.test_client().post("/home", "").unwrap();
  assert_eq!(resp.status(), 405);
  assert_eq!(resp.text(), "Method Not Allowed");
  assert_eq!(resp.header(HeaderName::Allow), Some("GET"));
}

#[test]
fn explicit_methods_restrict_the_route() {
  let app = ApplicationBuilder::builder(|builder| {
    builder.add_route_with_methods("/books", ["post"], create)
  })
  .unwrap();
  let client = app.test_client();

  let resp = client.get("/books").unwrap();
  assert_eq!(resp.status(), 405);
  assert_eq!(resp.text(), "Method Not Allowed");
  assert_eq!(resp.header("allow"), Some("POST"));

  let resp = client.post("/books", "dune").unwrap();
  assert_eq!(resp.status(), 200);
  assert_eq!(resp.text(), "created dune");

  let resp = client.request("Post", "/books").unwrap();
  assert_eq!(resp.status(), 200);
}

#[test]
fn allow_header_is_union_of_matching_routes() {
  let app = ApplicationBuilder::builder(|builder| {
    builder
      .add_route_with_methods("/items/{id}", [HttpMethod::Put], home)?
      .add_route_with_methods("/items/{name}", [HttpMethod::Get, HttpMethod::Delete], about)
  })
  .unwrap();

  let resp = app.test_client().post("/items/1", "").unwrap();
  assert_eq!(resp.status(), 405);
  assert_eq!(resp.header(HeaderName::Allow), Some("GET, PUT, DELETE"));
}

#[test]
fn first_matching_route_wins() {
  let app = ApplicationBuilder::builder(|builder| {
    builder.add_route("/hello/{name}", greeting)?.add_route("/hello/world", home)
  })
  .unwrap();
  assert_eq!(app.test_client().get("/hello/world").unwrap().text(), "Hello from world");
}

#[test]
fn later_route_serves_other_method() {
  let app = ApplicationBuilder::builder(|builder| {
    builder
      .add_route("/books", home)?
      .add_route_with_methods("/books/", [HttpMethod::Post], create)?
      .add_route_with_methods("/{section}", [HttpMethod::Post], create)
  })
  .unwrap();
  let client = app.test_client();

  assert_eq!(client.get("/books").unwrap().text(), "Hello from home page");
  assert_eq!(client.post("/books", "x").unwrap().text(), "created x");
}

#[test]
fn constrained_parameter() {
  let app =
    ApplicationBuilder::builder(|builder| builder.add_route("/books/{id:[0-9]+}", book)).unwrap();
  let client = app.test_client();

  assert_eq!(client.get("/books/42").unwrap().text(), "book 42");
  assert_eq!(client.get("/books/dune").unwrap().status(), 404);
}

#[test]
fn query_string_is_not_part_of_the_path() {
  let app =
    ApplicationBuilder::builder(|builder| builder.add_route("/hello/{name}", greeting)).unwrap();
  let resp = app.test_client().get("/hello/davron?lang=uz").unwrap();
  assert_eq!(resp.text(), "Hello from davron");
}

#[test]
fn invalid_pattern_fails_the_build() {
  for pattern in ["hello", "/hello/{}", "/hello/{name}/{name}", "/books/{id:[0-9}"] {
    let err =
      ApplicationBuilder::builder(|builder| builder.add_route(pattern, greeting)).unwrap_err();
    assert!(
      matches!(err, TezError::RouteRegistration(RouteRegistrationError::InvalidPattern(_, _))),
      "{pattern}"
    );
  }
}
