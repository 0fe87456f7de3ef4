use super::{HttpServerArgs, HttpsServerArgs, ServerHandle, StdioServerArgs, Transport};
use crate::{Error, McpServer, Result, SslOptions};
use axum::{Router, routing::get};
use axum_server::tls_rustls::RustlsConfig;
use pkcs8::{EncryptedPrivateKeyInfo, LineEnding, SecretDocument};
use rmcp::{
    RoleServer, ServiceExt,
    service::RunningService,
    transport::{
        StreamableHttpServerConfig, StreamableHttpService, stdio,
        streamable_http_server::session::local::LocalSessionManager,
    },
};
use std::{io, net::SocketAddr, time::Duration};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DEFAULT_HOST: &str = "localhost";
const ENCRYPTED_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// Binds real sockets: axum for plaintext HTTP, axum-server with rustls for
/// HTTPS, and rmcp's stdio transport.
#[derive(Debug, Clone)]
pub struct DefaultTransport {
    shutdown_grace: Duration,
}

impl Default for DefaultTransport {
    fn default() -> Self {
        Self {
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

impl DefaultTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// How long `close` waits for in-flight connections before aborting
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }
}

impl Transport for DefaultTransport {
    type Handle = RunningServer;

    async fn start_http_server(&self, args: HttpServerArgs) -> Result<RunningServer> {
        let router = router(&args)?;
        let listener = bind(&args).await?;
        let local_addr = listener.local_addr()?;

        let token = CancellationToken::new();
        let signal = token.clone();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { signal.cancelled().await })
                .await
        });

        info!("streamable HTTP server listening on http://{local_addr}{}", args.endpoint);
        Ok(RunningServer::listener(
            local_addr,
            Shutdown::Token(token),
            task,
            self.shutdown_grace,
        ))
    }

    async fn start_https_server(&self, args: HttpsServerArgs) -> Result<RunningServer> {
        let HttpsServerArgs { http, ssl } = args;
        let tls = load_tls(&ssl).await?;
        let router = router(&http)?;
        let listener = bind(&http).await?.into_std()?;
        let local_addr = listener.local_addr()?;

        let handle = axum_server::Handle::new();
        let server = axum_server::from_tcp_rustls(listener, tls).handle(handle.clone());
        let task = tokio::spawn(async move { server.serve(router.into_make_service()).await });

        info!("streamable HTTPS server listening on https://{local_addr}{}", http.endpoint);
        Ok(RunningServer::listener(
            local_addr,
            Shutdown::Tls(handle),
            task,
            self.shutdown_grace,
        ))
    }

    async fn start_stdio(&self, args: StdioServerArgs) -> Result<RunningServer> {
        let service = args
            .server
            .serve(stdio())
            .await
            .map_err(|err| Error::Service(err.to_string()))?;

        info!("serving MCP over stdio");
        Ok(RunningServer {
            inner: Inner::Stdio(service),
        })
    }
}

fn router(args: &HttpServerArgs) -> Result<Router> {
    validate_path("endpoint", &args.endpoint)?;

    let server = args.server.clone();
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            stateful_mode: !args.stateless,
            ..Default::default()
        },
    );
    let mut router = Router::new().route_service(&args.endpoint, service);

    let health = &args.health;
    if health.enabled {
        validate_path("health path", &health.path)?;
        if health.path == args.endpoint {
            return Err(Error::InvalidEndpoint(format!(
                "health path {:?} collides with the MCP endpoint",
                health.path
            )));
        }
        let message = health.message.clone();
        router = router.route(&health.path, get(move || async move { message }));
    }

    Ok(router)
}

/// Routes are fixed paths. axum panics on captures and wildcards, so they
/// are refused here instead.
fn validate_path(kind: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(Error::InvalidEndpoint(format!(
            "{kind} {path:?} must start with '/'"
        )));
    }
    for segment in path.split('/') {
        if segment.starts_with(':') || segment.starts_with('*') {
            return Err(Error::InvalidEndpoint(format!(
                "{kind} {path:?} must not contain wildcard segment {segment:?}"
            )));
        }
        if segment.contains(['{', '}']) {
            return Err(Error::InvalidEndpoint(format!(
                "{kind} {path:?} must not contain path captures"
            )));
        }
    }
    Ok(())
}

async fn bind(args: &HttpServerArgs) -> Result<TcpListener> {
    let host = args.host.as_deref().unwrap_or(DEFAULT_HOST);
    debug!(host, port = args.port, "binding listener");
    TcpListener::bind((host, args.port))
        .await
        .map_err(|source| Error::Bind {
            addr: format!("{host}:{}", args.port),
            source,
        })
}

async fn load_tls(ssl: &SslOptions) -> Result<RustlsConfig> {
    let key = private_key_pem(ssl)?;
    RustlsConfig::from_pem(ssl.cert.clone().into_bytes(), key)
        .await
        .map_err(|err| Error::Tls(err.to_string()))
}

/// Returns an unencrypted PEM key, decrypting PKCS#8 `ENCRYPTED PRIVATE KEY`
/// material with the passphrase.
fn private_key_pem(ssl: &SslOptions) -> Result<Vec<u8>> {
    if ssl.key.contains("Proc-Type: 4,ENCRYPTED") {
        return Err(Error::Tls(
            "legacy OpenSSL encrypted keys are not supported, convert the key to PKCS#8".into(),
        ));
    }
    if !ssl.key.contains(ENCRYPTED_KEY_LABEL) {
        if ssl.passphrase.is_some() {
            warn!("ignoring passphrase, the private key is not encrypted");
        }
        return Ok(ssl.key.clone().into_bytes());
    }

    let passphrase = ssl
        .passphrase
        .as_deref()
        .ok_or_else(|| Error::Tls("encrypted private key requires a passphrase".into()))?;
    let (label, document) = SecretDocument::from_pem(&ssl.key).map_err(tls_error)?;
    if label != ENCRYPTED_KEY_LABEL {
        return Err(Error::Tls(format!("unexpected PEM label {label:?}")));
    }

    let info = EncryptedPrivateKeyInfo::try_from(document.as_bytes()).map_err(tls_error)?;
    let decrypted = info.decrypt(passphrase).map_err(tls_error)?;
    let pem = decrypted
        .to_pem("PRIVATE KEY", LineEnding::LF)
        .map_err(tls_error)?;
    debug!("decrypted PKCS#8 private key");
    Ok(pem.as_bytes().to_vec())
}

fn tls_error(err: impl std::fmt::Display) -> Error {
    Error::Tls(err.to_string())
}

enum Shutdown {
    Token(CancellationToken),
    Tls(axum_server::Handle),
}

enum Inner {
    Listener {
        local_addr: SocketAddr,
        shutdown: Shutdown,
        task: JoinHandle<io::Result<()>>,
        grace: Duration,
    },
    Stdio(RunningService<RoleServer, McpServer>),
}

/// Handle returned by [`DefaultTransport`]
pub struct RunningServer {
    inner: Inner,
}

impl RunningServer {
    fn listener(
        local_addr: SocketAddr,
        shutdown: Shutdown,
        task: JoinHandle<io::Result<()>>,
        grace: Duration,
    ) -> Self {
        Self {
            inner: Inner::Listener {
                local_addr,
                shutdown,
                task,
                grace,
            },
        }
    }
}

impl ServerHandle for RunningServer {
    async fn close(self) -> Result<()> {
        match self.inner {
            Inner::Listener {
                local_addr,
                shutdown,
                mut task,
                grace,
            } => {
                match shutdown {
                    Shutdown::Token(token) => token.cancel(),
                    Shutdown::Tls(handle) => handle.graceful_shutdown(Some(grace)),
                }

                // axum-server enforces the grace period itself; allow it to finish first.
                match tokio::time::timeout(grace + Duration::from_secs(1), &mut task).await {
                    Ok(joined) => joined??,
                    Err(_) => {
                        warn!(%local_addr, "connections still open after {grace:?}, aborting");
                        task.abort();
                    }
                }

                info!(%local_addr, "server stopped");
                Ok(())
            }
            Inner::Stdio(service) => {
                let reason = service.cancel().await?;
                debug!(?reason, "stdio service stopped");
                Ok(())
            }
        }
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        match &self.inner {
            Inner::Listener { local_addr, .. } => Some(*local_addr),
            Inner::Stdio(_) => None,
        }
    }
}
