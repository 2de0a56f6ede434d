use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::http::compliance::{Compliance, check_compliance};
use crate::http::error::HttpError;
use crate::http::parser::{parse_headers, parse_request_line};
use crate::http::reader::{read_body, read_header_block, read_status_line};
use crate::http::request::{HeaderMap, Request, RequestLine};
use crate::http::response::{DEFAULT_STATUS, ResponseBuilder};
use crate::http::router::{Handler, Router};
use crate::http::writer::ResponseWriter;

/// Drives one request/response exchange over an accepted connection.
///
/// The connection is consumed by [`run`](Self::run) and shut down exactly
/// once, whichever state the exchange ends in.
pub struct Connection<S> {
    stream: BufReader<S>,
    router: Arc<Router>,
    state: ConnectionState,
}

pub enum ConnectionState {
    ReadingStatusLine,
    CheckingCompliance(RequestLine),
    Rejected(String),
    ReadingHeaders(RequestLine),
    ReadingBody {
        line: RequestLine,
        headers: HeaderMap,
        overread: Vec<u8>,
    },
    Routing(Request),
    Invoking(Handler, Request),
    WritingResponse(ResponseWriter, u16),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream: BufReader::new(stream),
            router,
            state: ConnectionState::ReadingStatusLine,
        }
    }

    /// Runs the state machine to completion and closes the connection.
    ///
    /// Returns the status code that was written to the peer.
    pub async fn run(mut self) -> Result<u16, HttpError> {
        let result = self.drive().await;

        if let Err(e) = &result {
            self.respond_to_failure(e).await;
        }

        // Best effort: the peer may already be gone.
        let _ = self.stream.shutdown().await;
        self.state = ConnectionState::Closed;

        result
    }

    async fn drive(&mut self) -> Result<u16, HttpError> {
        let mut written = None;

        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::ReadingStatusLine => {
                    let line = read_status_line(&mut self.stream).await?;
                    ConnectionState::CheckingCompliance(parse_request_line(&line)?)
                }

                ConnectionState::CheckingCompliance(line) => {
                    match check_compliance(&mut self.stream, &line.version).await? {
                        Compliance::Accepted => ConnectionState::ReadingHeaders(line),
                        Compliance::Rejected => ConnectionState::Rejected(line.version),
                    }
                }

                ConnectionState::Rejected(version) => {
                    return Err(HttpError::UnsupportedProtocolVersion { version });
                }

                ConnectionState::ReadingHeaders(line) => {
                    let block = read_header_block(&mut self.stream).await?;
                    ConnectionState::ReadingBody {
                        line,
                        headers: parse_headers(&block.headers),
                        overread: block.overread,
                    }
                }

                ConnectionState::ReadingBody {
                    line,
                    headers,
                    overread,
                } => {
                    let body = read_body(&mut self.stream, &headers, overread).await?;
                    debug!(body_len = body.len(), "request body read");
                    ConnectionState::Routing(Request {
                        line,
                        headers,
                        body,
                    })
                }

                ConnectionState::Routing(req) => {
                    let handler = match self.router.resolve(req.method(), req.path()) {
                        Some(handler) => handler,
                        None => {
                            debug!(method = req.method(), path = req.path(), "no route matched");
                            not_found_handler()
                        }
                    };
                    ConnectionState::Invoking(handler, req)
                }

                ConnectionState::Invoking(handler, req) => {
                    let res = invoke(handler, req).await?;
                    let status = res.status().unwrap_or(DEFAULT_STATUS);
                    ConnectionState::WritingResponse(ResponseWriter::new(&res), status)
                }

                ConnectionState::WritingResponse(mut writer, status) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    written = Some(status);
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    return Ok(written.unwrap_or(DEFAULT_STATUS));
                }
            };
        }
    }

    /// Answers the client when the failure still leaves it able to listen.
    async fn respond_to_failure(&mut self, err: &HttpError) {
        let status = match err {
            HttpError::MalformedRequestLine { .. } | HttpError::ClientProtocol { .. } => 400,
            HttpError::HandlerPanicked => 500,
            _ => return,
        };

        let Ok(res) = ResponseBuilder::with_status(status, err.to_string()) else {
            return;
        };
        if let Err(e) = ResponseWriter::new(&res)
            .write_to_stream(&mut self.stream)
            .await
        {
            warn!(error = %e, status, "failed to send error response");
        }
    }
}

/// Runs a handler on the blocking pool so a slow handler never stalls the
/// runtime's worker threads.
async fn invoke(handler: Handler, req: Request) -> Result<ResponseBuilder, HttpError> {
    tokio::task::spawn_blocking(move || {
        let mut res = ResponseBuilder::new();
        handler(&req, &mut res);
        res
    })
    .await
    .map_err(|_| HttpError::HandlerPanicked)
}

/// The handler used when no route matches.
fn not_found_handler() -> Handler {
    Arc::new(|req: &Request, res: &mut ResponseBuilder| {
        // 404 is always in range
        let _ = res.set_status(404);
        res.set_body(format!("No route matching {}:{}", req.method(), req.path()));
    })
}
