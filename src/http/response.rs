use std::collections::BTreeMap;

use crate::http::error::ResponseError;
use crate::http::writer::serialize_headers;

const HTTP_VERSION: &str = "HTTP/1.1";
const CONTENT_LENGTH: &str = "Content-Length";

/// Status used when a handler never calls [`ResponseBuilder::set_status`].
pub const DEFAULT_STATUS: u16 = 200;

/// Returns the standard reason phrase for a status code.
///
/// # Example
///
/// ```
/// # use rawhttp::http::response::reason_phrase;
/// assert_eq!(reason_phrase(200), "OK");
/// assert_eq!(reason_phrase(505), "HTTP Version Not Supported");
/// ```
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        413 => "Content Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        418 => "I'm a teapot",
        422 => "Unprocessable Content",
        426 => "Upgrade Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        _ => "Unknown",
    }
}

/// Accumulates a response for a single handler invocation.
///
/// `Content-Length` is owned by the builder: it is rewritten on every
/// [`set_body`](Self::set_body) and cannot be set through
/// [`add_header`](Self::add_header).
///
/// # Example
///
/// ```
/// # use rawhttp::http::response::ResponseBuilder;
/// let mut res = ResponseBuilder::new();
/// res.set_status(201).unwrap();
/// res.add_header("Content-Type", "text/plain").unwrap();
/// res.set_body("created");
/// assert_eq!(res.header("Content-Length"), Some("7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBuilder {
    status: Option<u16>,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    /// Creates an empty response: status unset, empty body, `Content-Length: 0`.
    pub fn new() -> Self {
        let mut builder = Self {
            status: None,
            headers: BTreeMap::new(),
            body: Vec::new(),
        };
        builder.set_body(Vec::new());
        builder
    }

    /// Creates a response with the given status and body already set.
    pub fn with_status(code: u16, body: impl Into<Vec<u8>>) -> Result<Self, ResponseError> {
        let mut builder = Self::new();
        builder.set_status(code)?;
        builder.set_body(body);
        Ok(builder)
    }

    /// Stores the status code. Codes outside 100-599 are rejected.
    pub fn set_status(&mut self, code: u16) -> Result<(), ResponseError> {
        if !(100..=599).contains(&code) {
            return Err(ResponseError::InvalidStatusCode { code });
        }
        self.status = Some(code);
        Ok(())
    }

    /// Replaces the body and recomputes `Content-Length`.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
        self.headers
            .retain(|k, _| !k.eq_ignore_ascii_case(CONTENT_LENGTH));
        self.headers
            .insert(CONTENT_LENGTH.to_string(), self.body.len().to_string());
    }

    /// Adds or replaces a header. `Content-Length` in any casing is refused.
    pub fn add_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ResponseError> {
        let name = name.into();
        if name.trim().eq_ignore_ascii_case(CONTENT_LENGTH) {
            return Err(ResponseError::ReservedHeader { name });
        }
        self.headers.insert(name, value.into());
        Ok(())
    }

    /// The explicitly set status, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Looks up a header by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Renders the response into wire bytes.
    ///
    /// An unset status is sent as 200. Headers are written sorted by name.
    pub fn serialize(&self) -> Vec<u8> {
        let code = self.status.unwrap_or(DEFAULT_STATUS);
        let mut buf = Vec::with_capacity(64 + self.body.len());

        buf.extend_from_slice(
            format!("{} {} {}\r\n", HTTP_VERSION, code, reason_phrase(code)).as_bytes(),
        );
        buf.extend_from_slice(&serialize_headers(
            self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        ));
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&self.body);

        buf
    }
}
