use crate::Error;
use std::io;

#[test]
fn test_error_messages() {
    insta::assert_snapshot!(Error::AlreadyStarted.to_string(), @"Server is already started");
    insta::assert_snapshot!(Error::Stopped.to_string(), @"Server has been stopped");
    insta::assert_snapshot!(
        Error::InvalidEndpoint("endpoint \"mcp\" must start with '/'".into()).to_string(),
        @r#"Invalid endpoint: endpoint "mcp" must start with '/'"#
    );
    insta::assert_snapshot!(
        Error::Bind {
            addr: "0.0.0.0:80".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        }
        .to_string(),
        @"Failed to bind 0.0.0.0:80: permission denied"
    );
}

#[test]
fn test_startup_failure_classification() {
    assert!(Error::Tls("bad".into()).is_startup_failure());
    assert!(Error::Service("closed".into()).is_startup_failure());
    assert!(!Error::AlreadyStarted.is_startup_failure());
    assert!(!Error::Shutdown("panicked".into()).is_startup_failure());
}
