use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid TLS material: {0}")]
    Tls(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("MCP service failed to start: {0}")]
    Service(String),

    #[error("Server is already started")]
    AlreadyStarted,

    #[error("Server has been stopped")]
    Stopped,

    #[error("Server did not shut down cleanly: {0}")]
    Shutdown(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error came from bringing a listener up, as opposed to
    /// lifecycle misuse of the owning server.
    pub fn is_startup_failure(&self) -> bool {
        matches!(
            self,
            Error::Bind { .. } | Error::Tls(_) | Error::InvalidEndpoint(_) | Error::Service(_)
        )
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Shutdown(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
