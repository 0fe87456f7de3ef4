pub mod cli;
mod config;
mod dispatch;
mod error;
mod handler;
mod server;
#[cfg(test)]
mod tests;
pub mod transport;

pub use config::*;
pub use dispatch::dispatch;
pub use error::{Error, Result};
pub use handler::McpServer;
pub use server::FastMcp;
