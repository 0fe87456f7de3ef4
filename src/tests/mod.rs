//! Tests for the server wrapper and its transports.
//!
//! Routing and lifecycle tests run against [`RecordingTransport`] and never
//! touch the network. `http` binds real loopback listeners, plain and TLS,
//! using the certificate and keys under `fixtures/`.

mod dispatch;
mod errors;

use crate::{
    Error, FastMcp, Result, ServerOptions,
    transport::{HttpServerArgs, HttpsServerArgs, ServerHandle, StdioServerArgs, Transport},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Arguments received by each entry point, in call order
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub http: Vec<HttpServerArgs>,
    pub https: Vec<HttpsServerArgs>,
    pub stdio: Vec<StdioServerArgs>,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.http.len() + self.https.len() + self.stdio.len()
    }
}

/// Stand-in transport that records every call instead of binding sockets
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Calls>,
    fail_next: Mutex<Option<fn() -> Error>>,
    closed: Arc<AtomicUsize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next start call fails with the error built by `make_error`
    pub fn failing_once(make_error: fn() -> Error) -> Self {
        let transport = Self::default();
        *transport.fail_next.lock().unwrap() = Some(make_error);
        transport
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    fn record(&self, record: impl FnOnce(&mut Calls)) -> Result<RecordedHandle> {
        record(&mut self.calls.lock().unwrap());
        if let Some(make_error) = self.fail_next.lock().unwrap().take() {
            return Err(make_error());
        }
        Ok(RecordedHandle {
            closed: self.closed.clone(),
        })
    }
}

impl Transport for RecordingTransport {
    type Handle = RecordedHandle;

    async fn start_http_server(&self, args: HttpServerArgs) -> Result<RecordedHandle> {
        self.record(|calls| calls.http.push(args))
    }

    async fn start_https_server(&self, args: HttpsServerArgs) -> Result<RecordedHandle> {
        self.record(|calls| calls.https.push(args))
    }

    async fn start_stdio(&self, args: StdioServerArgs) -> Result<RecordedHandle> {
        self.record(|calls| calls.stdio.push(args))
    }
}

pub struct RecordedHandle {
    closed: Arc<AtomicUsize>,
}

impl ServerHandle for RecordedHandle {
    async fn close(self) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn test_options() -> ServerOptions {
    ServerOptions::new("Test", "1.0.0")
}

/// Server wired to a fresh [`RecordingTransport`]
pub fn recording_server() -> FastMcp<RecordingTransport> {
    FastMcp::with_transport(test_options(), RecordingTransport::new())
}
