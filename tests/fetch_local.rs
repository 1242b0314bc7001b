mod common;

use cert_warden::config::ScanSettings;
use cert_warden::models::ScanRequest;
use cert_warden::scanner::{fetch, Scanner};
use cert_warden::utils::ScanErrorKind;
use common::{closed_port, self_signed, serve_tls};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_fetch_self_signed_localhost() {
    let leaf = self_signed("localhost", &[]);
    let port = serve_tls(&leaf).await;

    let fact = fetch("127.0.0.1", port, Duration::from_secs(5)).await.unwrap();

    assert_eq!(fact.subject_cn, "localhost");
    assert_eq!(fact.san, vec!["localhost"]);
    assert_eq!(fact.issuer, "localhost");
    assert!(fact.is_self_signed);
    assert!(!fact.is_trusted);
}

#[tokio::test]
async fn test_scan_normalizes_url_input() {
    let leaf = self_signed("warden.test", &["warden.test"]);
    let port = serve_tls(&leaf).await;

    let scanner = Scanner::new(ScanSettings::default());
    let fact = scanner
        .scan(&ScanRequest::new(" https://127.0.0.1/some/path ", port))
        .await
        .unwrap();

    assert_eq!(fact.subject_cn, "warden.test");
    assert_eq!(fact.san, vec!["warden.test"]);
}

#[tokio::test]
async fn test_closed_port_is_connect_error() {
    let err = fetch("127.0.0.1", closed_port(), Duration::from_secs(2))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ScanErrorKind::ConnectError);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            // Read the ClientHello and never answer
            while let Ok(n) = stream.read(&mut buf).await {
                if n == 0 {
                    break;
                }
            }
        }
    });

    let err = fetch("127.0.0.1", port, Duration::from_millis(500))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ScanErrorKind::ConnectError);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_plain_tcp_server_is_connect_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });

    let err = fetch("127.0.0.1", port, Duration::from_secs(2))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ScanErrorKind::ConnectError);
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_example_com() {
    let scanner = Scanner::new(ScanSettings::default());
    let fact = scanner
        .scan(&ScanRequest::new("https://example.com/", 443))
        .await
        .unwrap();

    assert!(!fact.is_self_signed);
    assert!(fact.is_trusted);
    assert!(fact.san.iter().any(|name| name == "example.com"));
    assert!(matches!(
        fact.key_alg,
        cert_warden::models::KeyAlgorithm::Rsa | cert_warden::models::KeyAlgorithm::Ecdsa
    ));
    assert_eq!(fact.fingerprint.len(), 64);
}
