//! HTTP/1.x transport adapter: reads one request off a byte stream and writes back the response.

use crate::app::Application;
use crate::http::{HeaderName, Headers, HttpMethod, HttpVersion, Request, Response, StatusCode};
use crate::tez_error::{RequestParsingError, TezError, TezResult};
use crate::{error_log, trace_log, warn_log};
use std::io::{BufRead, BufReader, Read, Write};

/// Serves exactly one request. The response always carries `Connection: close`.
///
/// Malformed requests are answered with a 4xx/5xx status and the parsing error is returned.
/// A stream that is closed before sending anything is not an error.
pub(crate) fn serve_connection<S: Read + Write>(
  app: &Application,
  stream: &mut S,
) -> TezResult<()> {
  let parsed = {
    let mut reader = BufReader::new(&mut *stream);
    read_request(&mut reader, app.max_head_buffer_size(), app.max_body_size())
  };

  let request = match parsed {
    Ok(request) => request,
    Err(TezError::RequestParsing(RequestParsingError::ConnectionClosed)) => {
      trace_log!("Connection closed before a request was sent");
      return Ok(());
    }
    Err(TezError::RequestParsing(err)) => {
      warn_log!("Malformed request: {}", err);
      write_status(stream, parsing_error_status(&err))?;
      return Err(err.into());
    }
    Err(err) => return Err(err),
  };

  let version = request.version();
  let head_only = request.method() == &HttpMethod::Head;
  trace_log!("Read request {} {} {}", request.method(), request.path(), version);

  let mut response = match app.handle(request) {
    Ok(response) => response,
    Err(err) => {
      error_log!("Request failed: {}", err);
      write_status(stream, StatusCode::InternalServerError)?;
      return Err(err);
    }
  };

  response.set_header(HeaderName::Connection, "close");
  match head_only {
    true => response.write_head_to(version, stream)?,
    false => response.write_to(version, stream)?,
  }

  Ok(())
}

fn parsing_error_status(err: &RequestParsingError) -> StatusCode {
  match err {
    RequestParsingError::HeadTooLarge(_) => StatusCode::RequestHeaderFieldsTooLarge,
    RequestParsingError::BodyTooLarge(_) => StatusCode::ContentTooLarge,
    RequestParsingError::HttpVersionNotSupported(_) => StatusCode::VersionNotSupported,
    RequestParsingError::TransferEncodingNotSupported(_) => StatusCode::NotImplemented,
    _ => StatusCode::BadRequest,
  }
}

fn write_status(stream: &mut impl Write, status: StatusCode) -> TezResult<()> {
  let mut rendered = Response::with_text(status, status.status_line()).render();
  rendered.set_header(HeaderName::Connection, "close");
  rendered.write_to(HttpVersion::Http11, stream)?;
  Ok(())
}

/// Parses request line, headers and a Content-Length delimited body.
///
/// `max_head` bounds the request line and all header lines together, CRLFs included.
pub(crate) fn read_request(
  reader: &mut impl BufRead,
  max_head: usize,
  max_body: u64,
) -> TezResult<Request> {
  let mut remaining = max_head;

  let Some(status_line) = read_line(reader, &mut remaining, max_head)? else {
    return Err(RequestParsingError::ConnectionClosed.into());
  };

  let mut parts = status_line.split(' ');
  let (Some(method), Some(target), Some(version), None) =
    (parts.next(), parts.next(), parts.next(), parts.next())
  else {
    return Err(RequestParsingError::InvalidStatusLine(status_line).into());
  };

  if method.is_empty() || target.is_empty() {
    return Err(RequestParsingError::InvalidStatusLine(status_line).into());
  }

  let version = HttpVersion::try_from_net_str(version)
    .ok_or_else(|| RequestParsingError::HttpVersionNotSupported(version.to_string()))?;

  let (raw_path, query) = target.split_once('?').unwrap_or((target, ""));

  let mut headers = Headers::new();
  loop {
    let Some(line) = read_line(reader, &mut remaining, max_head)? else {
      return Err(RequestParsingError::ConnectionClosed.into());
    };

    if line.is_empty() {
      break;
    }

    let Some((name, value)) = line.split_once(':') else {
      return Err(RequestParsingError::InvalidHeaderLine(line).into());
    };

    let name = name.trim();
    if name.is_empty() {
      return Err(RequestParsingError::InvalidHeaderLine(line).into());
    }

    headers.add(name, value.trim());
  }

  if let Some(encoding) = headers.get(HeaderName::TransferEncoding) {
    return Err(RequestParsingError::TransferEncodingNotSupported(encoding.to_string()).into());
  }

  let mut body = Vec::new();
  if let Some(length) = headers.get(HeaderName::ContentLength) {
    let length: u64 = length
      .parse()
      .map_err(|_| RequestParsingError::InvalidContentLength(length.to_string()))?;

    if length > max_body {
      return Err(RequestParsingError::BodyTooLarge(length).into());
    }

    reader.by_ref().take(length).read_to_end(&mut body)?;
    if body.len() as u64 != length {
      return Err(RequestParsingError::ConnectionClosed.into());
    }
  }

  let method = HttpMethod::from(method);
  Request::from_parts(method, raw_path, query.to_string(), version, headers, body)
}

/// Reads one line without its line terminator. `None` if the stream ended before any byte.
fn read_line(
  reader: &mut impl BufRead,
  remaining: &mut usize,
  max_head: usize,
) -> TezResult<Option<String>> {
  let mut buffer = Vec::new();
  let read = reader.by_ref().take(*remaining as u64).read_until(b'\n', &mut buffer)?;
  if read == 0 {
    if *remaining == 0 {
      return Err(RequestParsingError::HeadTooLarge(max_head).into());
    }
    return Ok(None);
  }

  *remaining -= read;
  if buffer.last() != Some(&b'\n') {
    return match *remaining {
      0 => Err(RequestParsingError::HeadTooLarge(max_head).into()),
      _ => Err(RequestParsingError::ConnectionClosed.into()),
    };
  }

  buffer.pop();
  if buffer.last() == Some(&b'\r') {
    buffer.pop();
  }

  String::from_utf8(buffer).map(Some).map_err(|_| RequestParsingError::NotUtf8.into())
}
