use crate::http::{HeaderName, HttpMethod, Request, Response, StatusCode};
use crate::info_log;

pub(crate) const NOT_FOUND_BODY: &str = "Not Found";
pub(crate) const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";

pub(crate) fn default_not_found_handler(request: &Request) -> Response {
  info_log!("Not found {} {}", request.method(), request.path());
  Response::with_text(StatusCode::NotFound, NOT_FOUND_BODY)
}

pub(crate) fn default_method_not_allowed_handler(
  request: &Request,
  allowed: &[HttpMethod],
) -> Response {
  info_log!("Method not allowed {} {}", request.method(), request.path());
  let allow = allowed.iter().map(HttpMethod::as_str).collect::<Vec<_>>().join(", ");

  let mut response = Response::with_text(StatusCode::MethodNotAllowed, METHOD_NOT_ALLOWED_BODY);
  response.set_header(HeaderName::Allow, allow);
  response
}
