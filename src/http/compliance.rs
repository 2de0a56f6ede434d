use tokio::io::AsyncWrite;
use tracing::debug;

use crate::http::error::HttpError;
use crate::http::writer::ResponseWriter;

/// The only protocol version this server speaks.
pub const SUPPORTED_VERSION: &str = "HTTP/1.1";

const VERSION_NOT_SUPPORTED: &[u8] =
    b"HTTP/1.1 505 HTTP Version Not Supported\r\nContent-Length: 0\r\n\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compliance {
    Accepted,
    /// A 505 has been written; the caller must close without reading further.
    Rejected,
}

/// Rejects every version token other than exactly `HTTP/1.1`.
///
/// On rejection the terminal 505 response is written before returning.
pub async fn check_compliance<W>(stream: &mut W, version: &str) -> Result<Compliance, HttpError>
where
    W: AsyncWrite + Unpin,
{
    if version == SUPPORTED_VERSION {
        return Ok(Compliance::Accepted);
    }

    debug!(version, "rejecting unsupported protocol version");
    ResponseWriter::from_bytes(VERSION_NOT_SUPPORTED.to_vec())
        .write_to_stream(stream)
        .await?;

    Ok(Compliance::Rejected)
}
