//! Incremental readers for the three framing boundaries of a request:
//! the end of the status line, the end of the header block, and the end of
//! a `content-length` framed body.

use bytes::BytesMut;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::http::error::HttpError;
use crate::http::parser::split_header_block;
use crate::http::request::HeaderMap;

/// Size of each read while searching for the header terminator.
pub const HEADER_CHUNK_SIZE: usize = 512;

/// The raw header block plus any body bytes read past its terminator.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    pub headers: Vec<u8>,
    pub overread: Vec<u8>,
}

/// Reads up to and including the first `\n`.
///
/// Nothing past the line feed is consumed from `reader`, so the header
/// reader picks up exactly where the status line ended.
pub async fn read_status_line<R>(reader: &mut R) -> Result<String, HttpError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let n = reader
        .read_until(b'\n', &mut line)
        .await
        .map_err(HttpError::read)?;

    if n == 0 {
        return Err(HttpError::ClosedBeforeRequest);
    }
    if line.last() != Some(&b'\n') {
        return Err(HttpError::closed());
    }

    String::from_utf8(line).map_err(|e| HttpError::MalformedRequestLine {
        line: String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Accumulates fixed-size chunks until the header block is terminated.
pub async fn read_header_block<R>(reader: &mut R) -> Result<HeaderBlock, HttpError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(HEADER_CHUNK_SIZE);
    let mut chunk = [0u8; HEADER_CHUNK_SIZE];

    loop {
        if let Some((headers, overread)) = split_header_block(&buf) {
            trace!(
                header_bytes = headers.len(),
                overread = overread.len(),
                "header block terminated"
            );
            return Ok(HeaderBlock {
                headers: headers.to_vec(),
                overread: overread.to_vec(),
            });
        }

        let n = reader.read(&mut chunk).await.map_err(HttpError::read)?;
        if n == 0 {
            return Err(HttpError::closed());
        }

        buf.extend_from_slice(&chunk[..n]);
    }
}

/// Reads the body declared by `content-length`.
///
/// Over-read bytes come first, followed by whatever is still owed on the
/// wire. Without a `content-length` header the body is empty.
pub async fn read_body<R>(
    reader: &mut R,
    headers: &HeaderMap,
    mut overread: Vec<u8>,
) -> Result<Vec<u8>, HttpError>
where
    R: AsyncRead + Unpin,
{
    let Some(raw) = headers.get("content-length") else {
        return Ok(Vec::new());
    };

    let expected: usize = raw.parse().map_err(|_| HttpError::ClientProtocol {
        value: raw.to_string(),
    })?;

    if overread.len() >= expected {
        if overread.len() > expected {
            debug!(
                expected,
                discarded = overread.len() - expected,
                "discarding bytes past declared body"
            );
        }
        overread.truncate(expected);
        return Ok(overread);
    }

    // Grows only by bytes that actually arrive.
    let remaining = u64::try_from(expected - overread.len()).unwrap_or(u64::MAX);
    (&mut *reader)
        .take(remaining)
        .read_to_end(&mut overread)
        .await
        .map_err(HttpError::read)?;

    if overread.len() < expected {
        return Err(HttpError::closed());
    }

    Ok(overread)
}
