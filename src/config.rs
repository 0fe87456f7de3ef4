use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "/mcp";
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Identity and HTTP extras for a server instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    pub name: String,
    pub version: String,

    /// Returned to clients during initialization
    pub instructions: Option<String>,

    pub health: HealthOptions,
}

impl ServerOptions {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            instructions: None,
            health: HealthOptions::default(),
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_health(mut self, health: HealthOptions) -> Self {
        self.health = health;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthOptions {
    pub enabled: bool,
    pub path: String,
    pub message: String,
}

impl Default for HealthOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_HEALTH_PATH.to_string(),
            message: "ok".to_string(),
        }
    }
}

impl HealthOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// How [`crate::FastMcp::start`] should expose the server.
///
/// The serialized shape is `{"transportType": "httpStream", "httpStream": {..}}`
/// or `{"transportType": "stdio"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transportType", rename_all = "camelCase")]
pub enum StartConfig {
    Stdio,
    HttpStream {
        #[serde(rename = "httpStream")]
        http_stream: HttpStreamOptions,
    },
}

impl StartConfig {
    pub fn http_stream(options: HttpStreamOptions) -> Self {
        StartConfig::HttpStream {
            http_stream: options,
        }
    }
}

impl From<HttpStreamOptions> for StartConfig {
    fn from(options: HttpStreamOptions) -> Self {
        Self::http_stream(options)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpStreamOptions {
    /// Bind address; the transport picks its own default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    pub port: u16,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub stateless: bool,

    /// Serve over TLS when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<SslOptions>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl HttpStreamOptions {
    pub fn new(port: u16) -> Self {
        Self {
            host: None,
            port,
            endpoint: default_endpoint(),
            stateless: false,
            ssl: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_stateless(mut self, stateless: bool) -> Self {
        self.stateless = stateless;
        self
    }

    pub fn with_ssl(mut self, ssl: SslOptions) -> Self {
        self.ssl = Some(ssl);
        self
    }
}

/// PEM encoded certificate chain and private key
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslOptions {
    pub cert: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

impl SslOptions {
    pub fn new(cert: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
            passphrase: None,
        }
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }
}

// Keep key material out of logs.
impl std::fmt::Debug for SslOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SslOptions")
            .field("cert", &format_args!("<{} bytes>", self.cert.len()))
            .field("key", &"<redacted>")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
