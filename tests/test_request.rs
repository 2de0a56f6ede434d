use rawhttp::http::request::{HeaderMap, Request, RequestLine};

fn request(headers: HeaderMap) -> Request {
    Request {
        line: RequestLine {
            method: "POST".to_string(),
            path: "/api".to_string(),
            version: "HTTP/1.1".to_string(),
        },
        headers,
        body: vec![],
    }
}

#[test]
fn test_request_header_retrieval() {
    let headers: HeaderMap = [("Host", "example.com"), ("Content-Type", "application/json")]
        .into_iter()
        .collect();
    let req = request(headers);

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_line_accessors() {
    let req = request(HeaderMap::new());

    assert_eq!(req.method(), "POST");
    assert_eq!(req.path(), "/api");
}

#[test]
fn test_request_content_length_parsing() {
    let req = request([("Content-Length", "42")].into_iter().collect());
    assert_eq!(req.content_length(), Some(42));
}

#[test]
fn test_request_content_length_missing() {
    assert_eq!(request(HeaderMap::new()).content_length(), None);
}

#[test]
fn test_request_content_length_invalid() {
    let req = request([("Content-Length", "not-a-number")].into_iter().collect());
    assert_eq!(req.content_length(), None);
}

#[test]
fn test_header_map_keys_are_normalised() {
    let headers: HeaderMap = [("  X-Trace  ", "  on ")].into_iter().collect();

    let (name, value) = headers.iter().next().unwrap();
    assert_eq!(name, "x-trace");
    assert_eq!(value, "on");
}
