//! HTTP connection handling module
//! 
//! This module provides functionality for managing HTTP connections and processing
//! HTTP requests and responses. It implements the core connection handling logic
//! for the HTTP server.
//! 
//! # Components
//! 
//! - [`HttpConnection`]: Main connection handler that:
//!   - Manages the lifecycle of HTTP connections
//!   - Processes incoming requests
//!   - Handles response streaming
//!   - Supports keep-alive connections
//!   - Implements expect-continue handling
//! 
//! # Features
//! 
//! - Asynchronous I/O handling
//! - Streaming request and response processing
//! - Keep-alive connection support
//! - Error handling and recovery
//! - Expect-continue mechanism
//! - Efficient memory usage through buffering

mod http_connection;

pub use http_connection::HttpConnection;

use std::time::Duration;

/// Per-connection limits enforced by [`HttpConnection::process`][crate::connection::HttpConnection::process].
///
/// These are resolved values, not something this crate knows how to load from a file
/// or environment — that's left to the caller.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionConfig {
    /// How long to wait for the next request before closing an otherwise-idle connection.
    pub keep_alive_timeout: Duration,
    /// How long a single request (from header received to response fully written) may take.
    pub request_timeout: Duration,
    /// Maximum number of requests served on one connection before it is closed. `None` means unbounded.
    pub max_requests_per_connection: Option<u32>,
    /// Header-section cap (`§6 max_header_size_bytes`): buffer size before the blank
    /// line terminating the header block. Exceeding it closes the connection with 431.
    pub max_header_size_bytes: usize,
    /// Cap on the number of headers a single request may carry.
    pub max_headers: usize,
    /// Body cap (`§6 max_body_size_bytes`): `Content-Length` or accumulated chunk
    /// length. Exceeding it closes the connection with 413.
    pub max_body_size_bytes: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout: Duration::from_secs(75),
            request_timeout: Duration::from_secs(30),
            max_requests_per_connection: None,
            max_header_size_bytes: crate::codec::header::DEFAULT_MAX_HEADER_BYTES,
            max_headers: crate::codec::header::DEFAULT_MAX_HEADER_NUM,
            max_body_size_bytes: u64::MAX,
        }
    }
}
