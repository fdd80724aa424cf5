//! Resolved server configuration.
//!
//! This module holds the already-resolved configuration values a [`crate::server::Server`]
//! and its connections need at runtime. Loading these values from a file, environment,
//! or CLI flags is out of scope here — `ServerConfig` only holds the result of that
//! resolution, built with plain defaults and builder methods in the same idiom as
//! [`crate::server::ServerBuilder`].

use std::time::Duration;

use micro_http::connection::ConnectionConfig;

/// Resolved, immutable configuration snapshot shared by a server and its connections.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    port: u16,
    host: String,
    keep_alive_timeout_ms: u64,
    max_requests_per_connection: Option<u32>,
    request_timeout_ms: u64,
    max_header_size_bytes: usize,
    max_body_size_bytes: u64,
    /// How long [`crate::server::Server::shutdown`] waits for in-flight connections
    /// to finish their current response before destroying the remaining sockets.
    shutdown_timeout_ms: u64,
    /// Opaque marker: TLS termination is an external collaborator, not implemented here.
    tls: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            keep_alive_timeout_ms: 5_000,
            max_requests_per_connection: Some(100),
            request_timeout_ms: 30_000,
            max_header_size_bytes: 8 * 1024,
            max_body_size_bytes: 1024 * 1024,
            shutdown_timeout_ms: 30_000,
            tls: false,
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn keep_alive_timeout_ms(&self) -> u64 {
        self.keep_alive_timeout_ms
    }

    pub fn max_requests_per_connection(&self) -> Option<u32> {
        self.max_requests_per_connection
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms
    }

    pub fn max_header_size_bytes(&self) -> usize {
        self.max_header_size_bytes
    }

    pub fn max_body_size_bytes(&self) -> u64 {
        self.max_body_size_bytes
    }

    pub fn shutdown_timeout_ms(&self) -> u64 {
        self.shutdown_timeout_ms
    }

    pub fn tls(&self) -> bool {
        self.tls
    }

    /// Projects this snapshot down to the subset [`micro_http::connection::HttpConnection`]
    /// enforces per connection.
    pub fn to_connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            keep_alive_timeout: Duration::from_millis(self.keep_alive_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_requests_per_connection: self.max_requests_per_connection,
            max_header_size_bytes: self.max_header_size_bytes,
            // matches the crate-wide header-count floor (§5: "at least 64"); only
            // the byte size is a tunable §6 key.
            max_headers: 64,
            max_body_size_bytes: self.max_body_size_bytes,
        }
    }
}

/// Builder for [`ServerConfig`]. Unset fields fall back to [`ServerConfig::default`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    inner: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.inner.port = port;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.inner.host = host.into();
        self
    }

    pub fn keep_alive_timeout_ms(mut self, ms: u64) -> Self {
        self.inner.keep_alive_timeout_ms = ms;
        self
    }

    pub fn max_requests_per_connection(mut self, max: u32) -> Self {
        self.inner.max_requests_per_connection = Some(max);
        self
    }

    pub fn request_timeout_ms(mut self, ms: u64) -> Self {
        self.inner.request_timeout_ms = ms;
        self
    }

    pub fn max_header_size_bytes(mut self, bytes: usize) -> Self {
        self.inner.max_header_size_bytes = bytes;
        self
    }

    pub fn max_body_size_bytes(mut self, bytes: u64) -> Self {
        self.inner.max_body_size_bytes = bytes;
        self
    }

    pub fn shutdown_timeout_ms(mut self, ms: u64) -> Self {
        self.inner.shutdown_timeout_ms = ms;
        self
    }

    pub fn build(self) -> ServerConfig {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ServerConfig::default();
        assert_eq!(config.port(), 3000);
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.max_requests_per_connection(), Some(100));
        assert!(!config.tls());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = ServerConfig::builder().port(4000).host("127.0.0.1").max_requests_per_connection(100).request_timeout_ms(5_000).build();

        assert_eq!(config.port(), 4000);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.max_requests_per_connection(), Some(100));
        assert_eq!(config.request_timeout_ms(), 5_000);
        assert_eq!(config.keep_alive_timeout_ms(), 5_000);
    }
}
