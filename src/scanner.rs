//! Scan orchestration
//!
//! Ties hostname normalization, the TLS fetcher and the certificate decoder
//! into a single async operation that any frontend (CLI, HTTP API) can drive.

use crate::checks::{normalize, CertificateDecoder, CertificateFetcher};
use crate::config::ScanSettings;
use crate::models::{CertificateFact, ScanOutcome, ScanRequest};
use crate::utils::ScanError;
use std::time::Duration;

/// Fetch and decode the leaf certificate of `hostname:port`.
///
/// `hostname` is used as given; see [`Scanner::scan`] for raw user input.
pub async fn fetch(
    hostname: &str,
    port: u16,
    timeout: Duration,
) -> Result<CertificateFact, ScanError> {
    Scanner::new(ScanSettings::default())
        .with_timeout(timeout)
        .fetch(hostname, port)
        .await
}

/// Runs certificate scans with fixed settings
pub struct Scanner {
    fetcher: CertificateFetcher,
    decoder: CertificateDecoder,
}

impl Scanner {
    pub fn new(settings: ScanSettings) -> Self {
        Self {
            fetcher: CertificateFetcher::new(settings.timeout()),
            decoder: CertificateDecoder::new(settings.issuer_short_cn_threshold),
        }
    }

    /// Override the connect and handshake budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetcher = CertificateFetcher::new(timeout);
        self
    }

    /// Fetch and decode without touching the hostname
    pub async fn fetch(&self, hostname: &str, port: u16) -> Result<CertificateFact, ScanError> {
        let der = self.fetcher.fetch_leaf(hostname, port).await?;
        self.decoder.decode(&der, hostname)
    }

    /// Normalize the requested host, then fetch and decode its certificate
    pub async fn scan(&self, request: &ScanRequest) -> Result<CertificateFact, ScanError> {
        if request.host.trim().is_empty() {
            return Err(ScanError::InvalidInput {
                message: "Host parameter is missing".to_string(),
            });
        }

        let hostname = normalize(&request.host);
        if hostname.is_empty() {
            return Err(ScanError::InvalidInput {
                message: format!("No hostname found in '{}'", request.host.trim()),
            });
        }

        tracing::info!("Scanning certificate for {}:{}", hostname, request.port);
        let result = self.fetch(&hostname, request.port).await;

        match &result {
            Ok(fact) => tracing::info!(
                "Certificate for {}:{} issued by {} expires {}",
                hostname,
                request.port,
                fact.issuer,
                fact.not_after
            ),
            Err(e) => tracing::warn!("Scan of {}:{} failed: {}", hostname, request.port, e),
        }

        result
    }

    /// Scan and wrap the result for reporting
    pub async fn scan_outcome(&self, request: &ScanRequest) -> ScanOutcome {
        let result = self.scan(request).await;
        let host = normalize(&request.host);
        ScanOutcome::from_result(&host, request.port, &result)
    }
}
