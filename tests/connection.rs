use crate::mock_stream::MockStream;
use log::LevelFilter;
use tez::{
  ApplicationBuilder, PathParams, Request, RequestParsingError, Response, TezError, TezResult,
};


fn greeting(_: &Request, resp: &mut Response, params: &PathParams) -> TezResult<()> {
  resp.set_text(format!("Hello from {}", params.get("name").unwrap_or_default()));
  Ok(())
}

fn echo(req: &Request, resp: &mut Response, _: &PathParams) -> TezResult<()> {
  resp.set_text(req.body_text()?);
  Ok(())
}

fn failing(_: &Request, _: &mut Response, _: &PathParams) -> TezResult<()> {
  Err(TezError::msg("some exception"))
}

fn app() -> tez::Application {
  ApplicationBuilder::builder(|builder| {
    builder
      .without_static_files()
      .add_route("/hello/{name}", greeting)?
      .add_route_with_methods("/echo", ["POST"], echo)?
      .add_route("/exception", failing)?
      .with_max_body_size(16)
      .ok()
  })
  .unwrap()
}

#[test]
pub fn get_over_the_wire() {
  trivial_log::init_stdout(LevelFilter::Trace).unwrap();
  let stream = MockStream::with_str("GET /hello/davron HTTP/1.1\r\nHost: localhost\r\n\r\n");
  app().handle_connection(&mut stream.clone()).unwrap();

  assert_eq!(
    stream.copy_written_data_to_string(),
    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\nContent-Length: 17\r\n\r\nHello from davron"
  );
  trivial_log::free();
}

#[test]
pub fn post_body_over_the_wire() {
  let stream = MockStream::with_str("POST /echo HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello");
  app().handle_connection(&mut stream.clone()).unwrap();

  assert_eq!(
    stream.copy_written_data_to_string(),
    "HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\nContent-Length: 5\r\n\r\nhello"
  );
}

#[test]
pub fn head_request_has_no_body() {
  let stream = MockStream::with_str("HEAD /hello/davron HTTP/1.1\r\n\r\n");
  let app = ApplicationBuilder::builder(|builder| {
    builder.add_route_with_methods("/hello/{name}", ["GET", "HEAD"], greeting)
  })
  .unwrap();
  app.handle_connection(&mut stream.clone()).unwrap();

  assert_eq!(
    stream.copy_written_data_to_string(),
    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\nContent-Length: 17\r\n\r\n"
  );
}

#[test]
pub fn not_found_over_the_wire() {
  let stream = MockStream::with_str("GET /nope HTTP/1.1\r\n\r\n");
  app().handle_connection(&mut stream.clone()).unwrap();

  assert_eq!(
    stream.copy_written_data_to_string(),
    "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nConnection: close\r\nContent-Length: 9\r\n\r\nNot Found"
  );
}

#[test]
pub fn method_not_allowed_over_the_wire() {
  let stream = MockStream::with_str("GET /echo HTTP/1.1\r\n\r\n");
  app().handle_connection(&mut stream.clone()).unwrap();

  assert_eq!(
    stream.copy_written_data_to_string(),
    "HTTP/1.1 405 Method Not Allowed\r\nAllow: POST\r\nContent-Type: text/plain\r\nConnection: close\r\nContent-Length: 18\r\n\r\nMethod Not Allowed"
  );
}

#[test]
pub fn invalid_path_encoding() {
  let stream = MockStream::with_str("GET /%BF HTTP/1.1\r\n\r\n");
  let err = app().handle_connection(&mut stream.clone()).unwrap_err();
  match err {
    TezError::RequestParsing(RequestParsingError::InvalidPathUrlEncoding(dta)) => {
      assert_eq!(dta.as_str(), "/%BF");
    }
    e => panic!("Unexpected error {e}"),
  }

  assert!(stream.copy_written_data_to_string().starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
pub fn body_too_large() {
  let stream = MockStream::with_str("POST /echo HTTP/1.1\r\nContent-Length: 17\r\n\r\n");
  let err = app().handle_connection(&mut stream.clone()).unwrap_err();
  assert!(matches!(err, TezError::RequestParsing(RequestParsingError::BodyTooLarge(17))));
  assert!(stream.copy_written_data_to_string().starts_with("HTTP/1.1 413 Content Too Large\r\n"));
}

#[test]
pub fn handler_error_becomes_500() {
  let stream = MockStream::with_str("GET /exception HTTP/1.1\r\n\r\n");
  let err = app().handle_connection(&mut stream.clone()).unwrap_err();
  assert_eq!(err.to_string(), "some exception");
  assert!(stream
    .copy_written_data_to_string()
    .starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
}

#[test]
pub fn closed_connection_is_not_an_error() {
  let stream = MockStream::with_str("");
  app().handle_connection(&mut stream.clone()).unwrap();
  assert!(stream.copy_written_data().is_empty());
}

#[test]
pub fn encoded_slash_binds_one_placeholder() {
  let stream = MockStream::with_str("GET /hello/a%2Fb HTTP/1.1\r\n\r\n");
  app().handle_connection(&mut stream.clone()).unwrap();

  assert_eq!(
    stream.copy_written_data_to_string(),
    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\nContent-Length: 14\r\n\r\nHello from a/b"
  );
}
