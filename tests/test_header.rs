use tez::{HeaderName, Headers};

#[test]
fn test_well_known_header_types() {
  for n in HeaderName::well_known() {
    assert!(!n.is_custom());
    let hdr = HeaderName::from(n.to_str());
    assert!(!hdr.is_custom(), "{}", n);
    assert_eq!(n, &hdr);
    assert_eq!(n, &HeaderName::from(n.to_str().to_uppercase().as_str()));
  }
}

#[test]
fn test_custom_header() {
  let hdr = HeaderName::from("X-Custom");
  assert!(hdr.is_custom());
  assert_eq!(hdr.to_str(), "x-custom");
  let hdr2 = HeaderName::from(hdr.to_str());
  assert!(hdr2.is_custom());
  assert_eq!(&hdr2, &hdr);
}

#[test]
fn test_headers_set_replaces_all() {
  let mut headers = Headers::new();
  headers.add("Set-Cookie", "a=1");
  headers.add(HeaderName::SetCookie, "b=2");
  assert_eq!(headers.get_all("set-cookie"), vec!["a=1", "b=2"]);

  headers.set(HeaderName::SetCookie, "c=3");
  assert_eq!(headers.get_all(HeaderName::SetCookie), vec!["c=3"]);
  assert_eq!(headers.len(), 1);

  headers.remove("SET-COOKIE");
  assert!(headers.is_empty());
}
