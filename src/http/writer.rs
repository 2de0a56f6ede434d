use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::error::HttpError;
use crate::http::response::ResponseBuilder;

/// Writes each header as `Name: Value\r\n`, in iteration order.
///
/// The blank line that ends the block is not included.
pub fn serialize_headers<'a, I>(headers: I) -> Vec<u8>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut buf = Vec::new();
    for (k, v) in headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
    buf
}

/// Holds a serialized response and tracks how much of it reached the peer.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &ResponseBuilder) -> Self {
        Self::from_bytes(response.serialize())
    }

    pub fn from_bytes(buffer: Vec<u8>) -> Self {
        Self { buffer, written: 0 }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> Result<(), HttpError>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await
                .map_err(HttpError::write)?;

            if n == 0 {
                return Err(HttpError::write(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "connection closed while writing",
                )));
            }

            self.written += n;
        }

        stream.flush().await.map_err(HttpError::write)
    }
}
