//! TLS leaf certificate fetcher
//!
//! Connects to a host, completes a TLS handshake in observe-only mode and
//! returns the DER bytes of the leaf certificate the server presented.
//! Trust is never evaluated here: expired, self-signed and mismatched
//! certificates must all be observable.

use crate::utils::ScanError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, Error as RustlsError, SignatureScheme};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

/// Certificate verifier for observe-only handshakes.
///
/// Accepts any server certificate and any handshake signature. Only
/// [`CertificateFetcher`] installs it; nothing else in the crate should ever
/// build a `ClientConfig` around it.
#[derive(Debug)]
pub struct ObserveOnlyVerifier;

impl ServerCertVerifier for ObserveOnlyVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA1,
            SignatureScheme::ECDSA_SHA1_Legacy,
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

/// Build the client configuration used for observe-only handshakes.
///
/// The crypto provider is passed explicitly so the scan never depends on a
/// process-wide default.
fn observe_only_config() -> Result<ClientConfig, RustlsError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    Ok(ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(ObserveOnlyVerifier))
        .with_no_client_auth())
}

/// Retrieves the leaf certificate presented by a TLS server
pub struct CertificateFetcher {
    timeout: Duration,
}

impl CertificateFetcher {
    /// Create a new fetcher; `timeout` bounds connect and handshake together
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Connect to `hostname:port` and return the DER-encoded leaf certificate.
    ///
    /// The socket and TLS session are dropped before this returns, on every path.
    pub async fn fetch_leaf(&self, hostname: &str, port: u16) -> Result<Vec<u8>, ScanError> {
        tokio::time::timeout(self.timeout, self.handshake(hostname, port))
            .await
            .map_err(|_| {
                ScanError::connect(
                    hostname,
                    port,
                    format!("timed out after {:?}", self.timeout),
                )
            })?
    }

    async fn handshake(&self, hostname: &str, port: u16) -> Result<Vec<u8>, ScanError> {
        let server_name = ServerName::try_from(hostname.to_string())
            .map_err(|e| ScanError::connect(hostname, port, format!("invalid server name: {}", e)))?;

        let config = observe_only_config()
            .map_err(|e| ScanError::connect(hostname, port, format!("TLS configuration: {}", e)))?;
        let connector = TlsConnector::from(Arc::new(config));

        let stream = TcpStream::connect((hostname, port))
            .await
            .map_err(|e| ScanError::connect(hostname, port, e.to_string()))?;

        let tls_stream = connector
            .connect(server_name, stream)
            .await
            .map_err(|e| ScanError::connect(hostname, port, format!("TLS handshake failed: {}", e)))?;

        let (_, connection) = tls_stream.get_ref();
        tracing::debug!(
            "Handshake with {}:{} negotiated {:?}",
            hostname,
            port,
            connection.protocol_version()
        );

        connection
            .peer_certificates()
            .and_then(|chain| chain.first())
            .map(|leaf| leaf.as_ref().to_vec())
            .ok_or_else(|| ScanError::EmptyCertificate {
                host: hostname.to_string(),
                port,
            })
    }
}
