//! Shared helpers for integration tests.

#![allow(dead_code)] // Not every test file uses every helper

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use httptest::Server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio_rustls::rustls::{crypto::ring, ServerConfig};
use tokio_rustls::TlsAcceptor;
use site_liveness::initialization::init_crypto_provider;
use site_liveness::probe::{HostResolver, Protocol, ReqwestStrategy};
use site_liveness::{normalize, Classifier, LivenessChecker, ProbeConfig, Prober, Target};

/// Probe config for a local plain-HTTP mock server: HTTP only, no DNS check, short timeout.
pub fn local_config() -> ProbeConfig {
    ProbeConfig {
        timeout: Duration::from_secs(2),
        connect_timeout: Duration::from_secs(1),
        protocols: vec![Protocol::Http],
        dns_fallback: false,
        ..ProbeConfig::default()
    }
}

/// A mock server bound to IPv4 loopback (`127.0.0.1:<port>`).
///
/// `Server::run()` prefers `[::1]`, which is not a valid [`Target`] hostname.
pub fn local_server() -> Server {
    httptest::ServerBuilder::new()
        .bind_addr(([127, 0, 0, 1], 0).into())
        .run()
        .expect("mock server should bind to 127.0.0.1")
}

/// The target naming a mock server (`127.0.0.1:<port>`).
pub fn server_target(server: &Server) -> Target {
    normalize(&server.addr().to_string()).expect("mock server address should normalize")
}

/// A prober using the real reqwest strategy.
pub fn reqwest_prober(config: ProbeConfig, resolver: Option<Arc<dyn HostResolver>>) -> Prober {
    init_crypto_provider();
    let strategy = ReqwestStrategy::new(&config).expect("client should build");
    Prober::with_parts(config, vec![Arc::new(strategy)], resolver)
}

/// A checker using the real reqwest strategy and built-in signatures.
pub fn reqwest_checker(config: ProbeConfig) -> LivenessChecker {
    LivenessChecker::from_parts(reqwest_prober(config, None), Classifier::default())
}

/// Resolver answering every name with one fixed address, or failing.
pub struct StaticResolver(pub Option<IpAddr>);

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve(&self, _host: &str) -> anyhow::Result<Vec<IpAddr>> {
        match self.0 {
            Some(address) => Ok(vec![address]),
            None => anyhow::bail!("no record found"),
        }
    }
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let port = listener
        .local_addr()
        .expect("listener should have an address")
        .port();
    drop(listener);
    port
}

/// Body served by [`spawn_self_signed_server`].
pub const SELF_SIGNED_BODY: &str = "<title>self-signed</title>";

/// HTTPS listener on `127.0.0.1` presenting a freshly generated self-signed
/// certificate. Every request gets a `200` with [`SELF_SIGNED_BODY`].
pub async fn spawn_self_signed_server() -> SocketAddr {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_string(), "localhost".to_string()])
            .expect("certificate should generate");
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));
    let config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .expect("default protocol versions should be supported")
        .with_no_client_auth()
        .with_single_cert(vec![cert.der().clone()], key)
        .expect("certificate should be accepted");
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("listener should have an address");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                // Clients that reject the certificate abort the handshake here
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                    match tls.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    SELF_SIGNED_BODY.len(),
                    SELF_SIGNED_BODY
                );
                let _ = tls.write_all(response.as_bytes()).await;
                let _ = tls.shutdown().await;
            });
        }
    });

    addr
}
