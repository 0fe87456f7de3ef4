use crate::ServerOptions;
use rmcp::{
    handler::server::ServerHandler,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
};
use std::sync::Arc;

/// MCP protocol handler shared by every session of a server
#[derive(Debug, Clone)]
pub struct McpServer {
    options: Arc<ServerOptions>,
}

impl McpServer {
    pub fn new(options: ServerOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().build(),
            server_info: Implementation {
                name: self.options.name.clone(),
                version: self.options.version.clone(),
            },
            instructions: self.options.instructions.clone(),
        }
    }
}
