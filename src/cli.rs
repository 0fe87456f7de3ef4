//! Command line surface of the `fast-mcp` binary.

use crate::{
    DEFAULT_ENDPOINT, HealthOptions, HttpStreamOptions, ServerOptions, SslOptions, StartConfig,
};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    Stdio,
    HttpStream,
}

#[derive(Debug, Parser)]
#[command(name = "fast-mcp", version, about = "Serve an MCP server over stdio or streamable HTTP")]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = TransportKind::HttpStream, env = "FAST_MCP_TRANSPORT")]
    pub transport: TransportKind,

    /// Address to bind, defaults to localhost
    #[arg(long, env = "FAST_MCP_HOST")]
    pub host: Option<String>,

    #[arg(long, default_value_t = 8080, env = "FAST_MCP_PORT")]
    pub port: u16,

    #[arg(long, default_value = DEFAULT_ENDPOINT, env = "FAST_MCP_ENDPOINT")]
    pub endpoint: String,

    #[arg(long, env = "FAST_MCP_STATELESS")]
    pub stateless: bool,

    /// PEM certificate chain, enables HTTPS
    #[arg(long, requires = "ssl_key", env = "FAST_MCP_SSL_CERT")]
    pub ssl_cert: Option<PathBuf>,

    /// PEM private key
    #[arg(long, requires = "ssl_cert", env = "FAST_MCP_SSL_KEY")]
    pub ssl_key: Option<PathBuf>,

    #[arg(long, requires = "ssl_key", env = "FAST_MCP_SSL_PASSPHRASE")]
    pub ssl_passphrase: Option<String>,

    #[arg(long, default_value = "fast-mcp", env = "FAST_MCP_NAME")]
    pub name: String,

    #[arg(long, default_value = env!("CARGO_PKG_VERSION"), env = "FAST_MCP_SERVER_VERSION")]
    pub server_version: String,

    #[arg(long, env = "FAST_MCP_INSTRUCTIONS")]
    pub instructions: Option<String>,

    /// Disable the health check route
    #[arg(long)]
    pub no_health: bool,
}

impl Cli {
    pub fn server_options(&self) -> ServerOptions {
        let mut options = ServerOptions::new(&self.name, &self.server_version);
        if let Some(instructions) = &self.instructions {
            options = options.with_instructions(instructions);
        }
        if self.no_health {
            options = options.with_health(HealthOptions::disabled());
        }
        options
    }

    /// Builds the start configuration, reading certificate files from disk.
    pub fn start_config(&self) -> anyhow::Result<StartConfig> {
        if self.transport == TransportKind::Stdio {
            return Ok(StartConfig::Stdio);
        }

        let mut options = HttpStreamOptions::new(self.port)
            .with_endpoint(&self.endpoint)
            .with_stateless(self.stateless);
        if let Some(host) = &self.host {
            options = options.with_host(host);
        }
        if let (Some(cert), Some(key)) = (&self.ssl_cert, &self.ssl_key) {
            let mut ssl = SslOptions::new(read_pem(cert)?, read_pem(key)?);
            if let Some(passphrase) = &self.ssl_passphrase {
                ssl = ssl.with_passphrase(passphrase);
            }
            options = options.with_ssl(ssl);
        }

        Ok(options.into())
    }
}

fn read_pem(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
