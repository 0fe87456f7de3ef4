use crate::{
    Error, McpServer, Result, ServerOptions, StartConfig,
    dispatch::dispatch,
    transport::{DefaultTransport, ServerHandle, Transport},
};
use std::net::SocketAddr;
use tokio::sync::Mutex;
use tracing::info;

enum State<H> {
    Idle,
    Running(H),
    Stopped,
}

/// An MCP server that can be started once on a chosen transport and stopped.
pub struct FastMcp<T: Transport = DefaultTransport> {
    server: McpServer,
    transport: T,
    state: Mutex<State<T::Handle>>,
}

impl FastMcp {
    pub fn new(options: ServerOptions) -> Self {
        Self::with_transport(options, DefaultTransport::default())
    }
}

impl<T: Transport> FastMcp<T> {
    pub fn with_transport(options: ServerOptions, transport: T) -> Self {
        Self {
            server: McpServer::new(options),
            transport,
            state: Mutex::new(State::Idle),
        }
    }

    pub fn options(&self) -> &ServerOptions {
        self.server.options()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Starts the server. A failed start leaves the server startable again.
    pub async fn start(&self, config: StartConfig) -> Result<()> {
        let mut state = self.state.lock().await;
        match *state {
            State::Running(_) => return Err(Error::AlreadyStarted),
            State::Stopped => return Err(Error::Stopped),
            State::Idle => {}
        }

        let handle = dispatch(&self.transport, &self.server, config).await?;
        info!(
            name = %self.options().name,
            version = %self.options().version,
            addr = ?handle.local_addr(),
            "server started"
        );
        *state = State::Running(handle);
        Ok(())
    }

    /// Shuts the active listener down. Does nothing if the server is not
    /// running.
    pub async fn stop(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        match std::mem::replace(&mut *state, State::Stopped) {
            State::Running(handle) => handle.close().await,
            State::Idle => {
                *state = State::Idle;
                Ok(())
            }
            State::Stopped => Ok(()),
        }
    }

    pub async fn is_running(&self) -> bool {
        matches!(*self.state.lock().await, State::Running(_))
    }

    pub async fn local_addr(&self) -> Option<SocketAddr> {
        match &*self.state.lock().await {
            State::Running(handle) => handle.local_addr(),
            _ => None,
        }
    }
}
