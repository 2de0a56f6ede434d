use crate::http::error::HttpError;
use crate::http::request::{HeaderMap, RequestLine};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const CRLF: &[u8] = b"\r\n";

/// Splits a status line into method, path and version.
///
/// The trailing `\r\n` (or bare `\n`) is stripped before splitting on single
/// spaces. Tokens past the third are ignored.
pub fn parse_request_line(line: &str) -> Result<RequestLine, HttpError> {
    let trimmed = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);

    let mut parts = trimmed.split(' ');
    let malformed = || HttpError::MalformedRequestLine {
        line: trimmed.to_string(),
    };

    let method = parts.next().filter(|m| !m.is_empty()).ok_or_else(malformed)?;
    let path = parts.next().filter(|p| !p.is_empty()).ok_or_else(malformed)?;
    let version = parts.next().ok_or_else(malformed)?;

    Ok(RequestLine {
        method: method.to_string(),
        path: path.to_string(),
        version: version.to_string(),
    })
}

/// Parses a raw header block into a [`HeaderMap`].
///
/// Lines that do not split into exactly one name and one value around a
/// colon are skipped rather than rejected.
pub fn parse_headers(block: &[u8]) -> HeaderMap {
    let text = String::from_utf8_lossy(block);
    let mut headers = HeaderMap::new();

    for line in text.split("\r\n") {
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(':').collect();
        if let [name, value] = parts.as_slice() {
            headers.insert(name, value);
        }
    }

    headers
}

/// Returns the bytes following the first `\r\n\r\n`, or `None` if the
/// terminator has not been seen yet.
pub fn get_header_termination(buf: &[u8]) -> Option<&[u8]> {
    find_header_end(buf).map(|i| &buf[i + HEADER_TERMINATOR.len()..])
}

/// Splits the bytes that follow a status line into the header block and the
/// over-read start of the body.
///
/// A buffer that starts with `\r\n` has no headers at all: the status line's
/// own CRLF is the first half of the terminator.
pub fn split_header_block(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    if buf.starts_with(CRLF) {
        return Some((&[], &buf[CRLF.len()..]));
    }

    find_header_end(buf).map(|i| (&buf[..i], &buf[i + HEADER_TERMINATOR.len()..]))
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}
