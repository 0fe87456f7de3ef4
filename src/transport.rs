//! Startup entry points the server dispatches to.
//!
//! [`Transport`] is injected into [`crate::FastMcp`], so tests can observe
//! exactly which entry point was called and with what arguments.

use crate::{HealthOptions, McpServer, Result, SslOptions};
use std::{future::Future, net::SocketAddr};

pub mod net;

pub use net::{DefaultTransport, RunningServer};

/// Arguments for a plaintext streamable HTTP listener
#[derive(Debug, Clone)]
pub struct HttpServerArgs {
    pub host: Option<String>,
    pub port: u16,
    pub endpoint: String,
    pub stateless: bool,
    pub health: HealthOptions,
    pub server: McpServer,
}

/// Arguments for an encrypted streamable HTTP listener
#[derive(Debug, Clone)]
pub struct HttpsServerArgs {
    pub http: HttpServerArgs,
    pub ssl: SslOptions,
}

/// Arguments for serving MCP over the process's stdin and stdout
#[derive(Debug, Clone)]
pub struct StdioServerArgs {
    pub server: McpServer,
}

/// Brings up one kind of listener per call.
///
/// Each method resolves once the listener is accepting, or with the error
/// that prevented it. Implementations must not retry or fall back to another
/// entry point; the caller sees the failure as returned.
pub trait Transport: Send + Sync + 'static {
    type Handle: ServerHandle;

    /// Serves the MCP endpoint over plaintext HTTP. An absent `host` is left
    /// for the implementation to default.
    fn start_http_server(
        &self,
        args: HttpServerArgs,
    ) -> impl Future<Output = Result<Self::Handle>> + Send;

    /// Serves the MCP endpoint over TLS.
    ///
    /// `args.ssl` is the caller's configuration untouched, passphrase
    /// included. Certificate and key validation happen here, not during
    /// dispatch.
    fn start_https_server(
        &self,
        args: HttpsServerArgs,
    ) -> impl Future<Output = Result<Self::Handle>> + Send;

    /// Serves MCP on stdio
    fn start_stdio(
        &self,
        args: StdioServerArgs,
    ) -> impl Future<Output = Result<Self::Handle>> + Send;
}

/// An active listener. Dropping it without calling [`ServerHandle::close`]
/// leaves the listener running.
pub trait ServerHandle: Send + 'static {
    /// Stops accepting connections and waits for the listener to wind down.
    fn close(self) -> impl Future<Output = Result<()>> + Send;

    fn local_addr(&self) -> Option<SocketAddr> {
        None
    }
}
