//! rawhttp - a from-scratch HTTP/1.1 server
//!
//! Core library: request framing, routing and response serialization over a
//! raw byte stream, plus the listener that feeds it connections.

pub mod config;
pub mod http;
pub mod server;
