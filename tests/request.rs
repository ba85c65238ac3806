use serde::Deserialize;
use tez::{HeaderName, HttpMethod, HttpVersion, Request};

#[derive(Deserialize, Debug, PartialEq)]
struct Login {
  user: String,
  remember: bool,
}

#[test]
fn test_request_target() {
  let request = Request::new("get", "/testpath?foo=bar&name=Davron%20B");
  assert_eq!(request.method(), &HttpMethod::Get);
  assert_eq!(request.path(), "/testpath");
  assert_eq!(request.query(), "foo=bar&name=Davron%20B");
  assert_eq!(request.query_param("foo").as_deref(), Some("bar"));
  assert_eq!(request.query_param("name").as_deref(), Some("Davron B"));
  assert_eq!(request.version(), HttpVersion::Http11);
  assert!(request.headers().is_empty());
  assert!(request.body().is_empty());
}

#[test]
fn test_request_headers() {
  let request = Request::new(HttpMethod::Post, "/")
    .with_header(HeaderName::ContentType, "application/json")
    .with_header("X-Request-Id", "1")
    .with_header("x-request-id", "2");

  assert_eq!(request.header("content-type"), Some("application/json"));
  assert_eq!(request.header(HeaderName::ContentType), Some("application/json"));
  assert_eq!(request.headers().get_all("X-REQUEST-ID"), vec!["1", "2"]);
  assert_eq!(request.headers().len(), 3);
}

#[test]
fn test_request_body() {
  let request = Request::new("POST", "/login")
    .with_body(r#"{"user":"davron","remember":true}"#)
    .with_version(HttpVersion::Http10);

  assert_eq!(request.version(), HttpVersion::Http10);
  assert_eq!(request.body_text().unwrap(), r#"{"user":"davron","remember":true}"#);
  assert_eq!(
    request.json::<Login>().unwrap(),
    Login { user: "davron".to_string(), remember: true }
  );

  let broken = Request::new("POST", "/login").with_body(vec![0xff, 0xfe]);
  assert!(broken.body_text().is_err());
  assert!(broken.json::<Login>().is_err());
}

#[test]
fn test_set_path() {
  let mut request = Request::new("GET", "/old?keep=1");
  request.set_path("/new");
  assert_eq!(request.path(), "/new");
  assert_eq!(request.query(), "keep=1");
}
