use crate::{
    HttpStreamOptions, McpServer, Result, StartConfig,
    transport::{HttpServerArgs, HttpsServerArgs, StdioServerArgs, Transport},
};
use tracing::debug;

/// Starts `server` on the single entry point of `transport` that `config`
/// selects.
///
/// For `httpStream`, the presence of `ssl` alone picks HTTPS over HTTP. The
/// caller's fields are forwarded as given, and an error from the entry point
/// is returned untouched.
pub async fn dispatch<T: Transport>(
    transport: &T,
    server: &McpServer,
    config: StartConfig,
) -> Result<T::Handle> {
    let http_stream = match config {
        StartConfig::Stdio => {
            debug!("dispatching to stdio transport");
            let args = StdioServerArgs {
                server: server.clone(),
            };
            return transport.start_stdio(args).await;
        }
        StartConfig::HttpStream { http_stream } => http_stream,
    };

    let HttpStreamOptions {
        host,
        port,
        endpoint,
        stateless,
        ssl,
    } = http_stream;
    let http = HttpServerArgs {
        host,
        port,
        endpoint,
        stateless,
        health: server.options().health.clone(),
        server: server.clone(),
    };

    match ssl {
        Some(ssl) => {
            debug!(port, "dispatching to HTTPS transport");
            transport
                .start_https_server(HttpsServerArgs { http, ssl })
                .await
        }
        None => {
            debug!(port, "dispatching to HTTP transport");
            transport.start_http_server(http).await
        }
    }
}
