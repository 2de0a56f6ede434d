use std::collections::HashMap;

/// The first line of a request, split into its three tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The request method (e.g. "GET"), matched case-sensitively by the router
    pub method: String,
    /// The request target as sent by the client (e.g. "/index.html")
    pub path: String,
    /// Protocol version token (e.g. "HTTP/1.1")
    pub version: String,
}

/// Request headers keyed by lower-cased, trimmed name.
///
/// Built once from the raw header block and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    inner: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, normalising the name. Later values replace earlier ones.
    pub(crate) fn insert(&mut self, name: &str, value: &str) {
        self.inner
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    /// Looks up a header value; the name is matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.trim().to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (k, v) in iter {
            map.insert(k.as_ref(), v.as_ref());
        }
        map
    }
}

/// A fully read request, handed to the matching handler.
///
/// The body length always equals the declared `content-length`, or zero when
/// the header is absent.
#[derive(Debug, Clone)]
pub struct Request {
    pub line: RequestLine,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Request {
    pub fn method(&self) -> &str {
        &self.line.method
    }

    pub fn path(&self) -> &str {
        &self.line.path
    }

    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// The declared body length, if the header is present and valid.
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length").and_then(|v| v.parse().ok())
    }
}
