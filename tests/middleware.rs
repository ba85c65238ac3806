use std::sync::{Arc, Mutex};
use tez::{
  ApplicationBuilder, Middleware, PathParams, Request, Response, StatusCode, TezError, TezResult,
};

type Journal = Arc<Mutex<Vec<String>>>;

struct Recorder {
  name: &'static str,
  journal: Journal,
}

impl Middleware for Recorder {
  fn process_request(&self, request: &mut Request) -> TezResult<()> {
    self.journal.lock().unwrap().push(format!("{} request {}", self.name, request.path()));
    Ok(())
  }

  fn process_response(&self, _request: &Request, _response: &mut Response) -> TezResult<()> {
    self.journal.lock().unwrap().push(format!("{} response", self.name));
    Ok(())
  }
}

struct PoweredBy;

impl Middleware for PoweredBy {
  fn process_response(&self, _request: &Request, response: &mut Response) -> TezResult<()> {
    response.add_header("X-Powered-By", "tez");
    Ok(())
  }
}

struct Rewrite;

impl Middleware for Rewrite {
  fn process_request(&self, request: &mut Request) -> TezResult<()> {
    if request.path() == "/old-home" {
      request.set_path("/home");
    }
    Ok(())
  }
}

struct Uppercase;

impl Middleware for Uppercase {
  fn process_response(&self, _request: &Request, response: &mut Response) -> TezResult<()> {
    if let Some(tez::ResponseBody::Text(text)) = response.body() {
      let upper = text.to_uppercase();
      response.set_text(upper);
    }
    Ok(())
  }
}

struct Gatekeeper;

impl Middleware for Gatekeeper {
  fn process_request(&self, request: &mut Request) -> TezResult<()> {
    match request.header("Authorization") {
      Some(_) => Ok(()),
      None => Err(TezError::msg("no credentials")),
    }
  }
}

fn home(_: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  resp.set_text("Hello from home page");
  Ok(())
}

fn failing(_: &Request, _: &mut Response, _: &PathParams) -> TezResult<()> {
  Err(TezError::msg("some exception"))
}

fn on_exception(_: &Request, resp: &mut Response, _: TezError) -> TezResult<()> {
  resp.set_status(StatusCode::InternalServerError).set_text("something bad happened");
  Ok(())
}

#[test]
fn last_added_runs_first_on_the_way_in() {
  let journal = Journal::default();
  let app = ApplicationBuilder::builder(|builder| {
    builder
      .add_route("/home", home)?
      .add_middleware(Recorder { name: "a", journal: journal.clone() })
      .add_middleware(Recorder { name: "b", journal: journal.clone() })
      .ok()
  })
  .unwrap();

  assert_eq!(app.test_client().get("/home").unwrap().text(), "Hello from home page");
  assert_eq!(
    journal.lock().unwrap().as_slice(),
    ["b request /home", "a request /home", "a response", "b response"]
  );
}

#[test]
fn middleware_wraps_not_found_and_handled_errors() {
  let journal = Journal::default();
  let app = ApplicationBuilder::builder(|builder| {
    builder
      .add_route("/exception", failing)?
      .add_exception_handler(on_exception)
      .add_middleware(Recorder { name: "a", journal: journal.clone() })
      .ok()
  })
  .unwrap();
  let client = app.test_client();

  assert_eq!(client.get("/nope").unwrap().status(), 404);
  assert_eq!(client.get("/exception").unwrap().status(), 500);
  assert_eq!(
    journal.lock().unwrap().as_slice(),
    ["a request /nope", "a response", "a request /exception", "a response"]
  );
}

#[test]
fn middleware_can_modify_request_and_response() {
  let app = ApplicationBuilder::builder(|builder| {
    builder.add_route("/home", home)?.add_middleware(PoweredBy).add_middleware(Rewrite).ok()
  })
  .unwrap();

  let resp = app.test_client().get("/old-home").unwrap();
  assert_eq!(resp.status(), 200);
  assert_eq!(resp.text(), "Hello from home page");
  assert_eq!(resp.header("x-powered-by"), Some("tez"));
}

#[test]
fn rendering_happens_after_middleware() {
  let app = ApplicationBuilder::builder(|builder| {
    builder.add_route("/home", home)?.add_middleware(Uppercase).ok()
  })
  .unwrap();

  let resp = app.test_client().get("/home").unwrap();
  assert_eq!(resp.text(), "HELLO FROM HOME PAGE");
  assert_eq!(resp.content_type(), Some("text/plain"));
}

#[test]
fn middleware_errors_are_not_caught() {
  let app = ApplicationBuilder::builder(|builder| {
    builder
      .add_route("/home", home)?
      .add_exception_handler(on_exception)
      .add_middleware(Gatekeeper)
      .ok()
  })
  .unwrap();
  let client = app.test_client();

  let err = client.get("/home").unwrap_err();
  assert_eq!(err.to_string(), "no credentials");

  let resp = client.request_with("GET", "/home", [("Authorization", "Bearer x")], "").unwrap();
  assert_eq!(resp.text(), "Hello from home page");
}

struct HideJson;

impl Middleware for HideJson {
  fn process_response(&self, _request: &Request, response: &mut Response) -> TezResult<()> {
    if matches!(response.body(), Some(tez::ResponseBody::Json(_))) {
      response.clear_body().set_text("hidden");
    }
    Ok(())
  }
}

fn json_home(_: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  resp.set_json(serde_json::json!({"secret": 1}))?;
  Ok(())
}

#[test]
fn middleware_can_replace_json_body() {
  let app = ApplicationBuilder::builder(|builder| {
    builder.add_route("/home", json_home)?.add_middleware(HideJson).ok()
  })
  .unwrap();

  let resp = app.test_client().get("/home").unwrap();
  assert_eq!(resp.text(), "hidden");
  assert_eq!(resp.content_type(), Some("text/plain"));
}
