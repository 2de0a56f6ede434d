//! HTTP/1.1 protocol implementation.
//!
//! This module reads one request per connection straight off a byte stream,
//! routes it to a registered handler and writes the response back.
//!
//! # Architecture
//!
//! - **`reader`**: finds the status line, header block and body boundaries
//! - **`parser`**: splits the status line and header block into typed values
//! - **`compliance`**: rejects anything that is not `HTTP/1.1` with a 505
//! - **`request`**: the request handed to handlers
//! - **`router`**: exact `(method, path)` handler table
//! - **`response`**: response builder with a managed `Content-Length`
//! - **`writer`**: serializes and writes responses to the client
//! - **`connection`**: the per-connection state machine tying it together
//!
//! # Connection State Machine
//!
//! ```text
//!   ReadingStatusLine
//!          │
//!          ▼
//!   CheckingCompliance ──── not HTTP/1.1 ───► Rejected (505)
//!          │                                     │
//!          ▼                                     │
//!   ReadingHeaders                               │
//!          │                                     │
//!          ▼                                     │
//!   ReadingBody                                  │
//!          │                                     │
//!          ▼                                     │
//!   Routing ── no match → 404 handler            │
//!          │                                     │
//!          ▼                                     │
//!   Invoking                                     │
//!          │                                     │
//!          ▼                                     │
//!   WritingResponse                              │
//!          │                                     │
//!          ▼                                     ▼
//!        Closed ◄────────── any failure ─────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rawhttp::http::connection::Connection;
//! use rawhttp::http::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut router = Router::new();
//!     router.register("GET", "/", |_req, res| res.set_body("hi"));
//!     let router = Arc::new(router);
//!
//!     let listener = TcpListener::bind("127.0.0.1:8000").await?;
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, router).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod compliance;
pub mod connection;
pub mod error;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod router;
pub mod writer;

pub use error::{HttpError, ResponseError};
pub use request::{HeaderMap, Request, RequestLine};
pub use response::ResponseBuilder;
pub use router::{Handler, RouteKey, Router};
