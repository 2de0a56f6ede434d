use std::io;
use thiserror::Error;

/// Errors that end processing of a single connection.
///
/// None of these ever reach the accept loop; the driver answers the client
/// where it still can and closes the connection.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("read failed: {source}")]
    TransportRead { source: io::Error },

    #[error("connection closed before a request was sent")]
    ClosedBeforeRequest,

    #[error("write failed: {source}")]
    TransportWrite { source: io::Error },

    #[error("malformed request line: {line:?}")]
    MalformedRequestLine { line: String },

    #[error("unsupported protocol version: {version:?}")]
    UnsupportedProtocolVersion { version: String },

    #[error("invalid content-length header: {value:?}")]
    ClientProtocol { value: String },

    #[error("handler panicked")]
    HandlerPanicked,
}

impl HttpError {
    pub fn read(source: io::Error) -> Self {
        HttpError::TransportRead { source }
    }

    pub fn write(source: io::Error) -> Self {
        HttpError::TransportWrite { source }
    }

    /// Whether the failure was caused by what the client sent.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HttpError::MalformedRequestLine { .. }
                | HttpError::UnsupportedProtocolVersion { .. }
                | HttpError::ClientProtocol { .. }
        )
    }

    pub(crate) fn closed() -> Self {
        HttpError::TransportRead {
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed by peer"),
        }
    }
}

/// Errors returned to handler code by the response builder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("cannot set {name:?} header manually, it is derived from the body")]
    ReservedHeader { name: String },

    #[error("status code {code} is outside 100-599")]
    InvalidStatusCode { code: u16 },
}
