use super::{RecordingTransport, recording_server, test_options};
use crate::{HttpStreamOptions, McpServer, SslOptions, StartConfig, dispatch};

#[tokio::test]
async fn test_passes_custom_host_to_http_server() {
    let server = recording_server();

    server
        .start(HttpStreamOptions::new(8080).with_host("0.0.0.0").into())
        .await
        .unwrap();

    let calls = server.transport().calls();
    assert_eq!(calls.http.len(), 1);
    assert_eq!(calls.http[0].host.as_deref(), Some("0.0.0.0"));
    assert_eq!(calls.http[0].port, 8080);
    assert!(calls.https.is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_passes_ssl_configuration_to_https_server() {
    let server = recording_server();
    let ssl = SslOptions::new("test-cert", "test-key");

    server
        .start(HttpStreamOptions::new(8443).with_ssl(ssl.clone()).into())
        .await
        .unwrap();

    let calls = server.transport().calls();
    assert_eq!(calls.https.len(), 1);
    assert_eq!(calls.https[0].ssl, ssl);
    assert_eq!(calls.https[0].http.port, 8443);
    assert!(calls.http.is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_passes_ssl_passphrase_to_https_server() {
    let server = recording_server();
    let ssl = SslOptions::new("test-cert", "test-key").with_passphrase("test-passphrase");

    server
        .start(HttpStreamOptions::new(8443).with_ssl(ssl.clone()).into())
        .await
        .unwrap();

    let calls = server.transport().calls();
    assert_eq!(calls.https.len(), 1);
    assert_eq!(calls.https[0].ssl, ssl);
    assert_eq!(
        calls.https[0].ssl.passphrase.as_deref(),
        Some("test-passphrase")
    );
    assert!(calls.http.is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_https_keeps_host_and_http_fields() {
    let server = recording_server();

    server
        .start(
            HttpStreamOptions::new(9443)
                .with_host("127.0.0.1")
                .with_endpoint("/rpc")
                .with_stateless(true)
                .with_ssl(SslOptions::new("c", "k"))
                .into(),
        )
        .await
        .unwrap();

    let calls = server.transport().calls();
    let http = &calls.https[0].http;
    assert_eq!(http.host.as_deref(), Some("127.0.0.1"));
    assert_eq!(http.port, 9443);
    assert_eq!(http.endpoint, "/rpc");
    assert!(http.stateless);
}

#[tokio::test]
async fn test_absent_host_is_not_defaulted() {
    let server = recording_server();

    server
        .start(HttpStreamOptions::new(3000).into())
        .await
        .unwrap();

    let calls = server.transport().calls();
    assert_eq!(calls.http.len(), 1);
    assert!(calls.http[0].host.is_none());
    assert_eq!(calls.http[0].endpoint, "/mcp");
    assert!(!calls.http[0].stateless);
}

#[tokio::test]
async fn test_health_options_come_from_server_options() {
    let server = recording_server();

    server
        .start(HttpStreamOptions::new(3000).into())
        .await
        .unwrap();

    let calls = server.transport().calls();
    assert_eq!(calls.http[0].health, test_options().health);
    assert_eq!(calls.http[0].server.options().name, "Test");
}

#[tokio::test]
async fn test_stdio_uses_neither_http_entry_point() {
    let server = recording_server();

    server.start(StartConfig::Stdio).await.unwrap();

    let calls = server.transport().calls();
    assert_eq!(calls.stdio.len(), 1);
    assert!(calls.http.is_empty());
    assert!(calls.https.is_empty());
}

#[tokio::test]
async fn test_exactly_one_entry_point_per_dispatch() {
    let configs = [
        StartConfig::from(HttpStreamOptions::new(1).with_host("0.0.0.0")),
        StartConfig::from(HttpStreamOptions::new(2).with_ssl(SslOptions::new("a", "b"))),
        StartConfig::from(
            HttpStreamOptions::new(3)
                .with_host("::")
                .with_ssl(SslOptions::new("a", "b").with_passphrase("p")),
        ),
        StartConfig::Stdio,
    ];
    let mcp = McpServer::new(test_options());

    for config in configs {
        let transport = RecordingTransport::new();
        let wants_https = matches!(
            &config,
            StartConfig::HttpStream { http_stream } if http_stream.ssl.is_some()
        );

        dispatch(&transport, &mcp, config).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.total(), 1);
        assert_eq!(calls.https.len(), usize::from(wants_https));
    }
}
