//! Scan request and outcome types

use crate::models::CertificateFact;
use crate::utils::{ScanError, ScanErrorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 443;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// A request to inspect the certificate of `host:port`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Raw user input; may carry a scheme, path or port
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ScanRequest {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// Error half of a [`ScanOutcome`]
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub kind: ScanErrorKind,
    pub message: String,
}

impl From<&ScanError> for ScanFailure {
    fn from(err: &ScanError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result of one scan as reported to clients
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub host: String,
    pub port: u16,
    pub success: bool,
    #[serde(with = "crate::models::certificate::iso8601")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateFact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ScanFailure>,
}

impl ScanOutcome {
    pub fn from_result(host: &str, port: u16, result: &Result<CertificateFact, ScanError>) -> Self {
        let (certificate, error) = match result {
            Ok(fact) => (Some(fact.clone()), None),
            Err(e) => (None, Some(ScanFailure::from(e))),
        };
        Self {
            host: host.to_string(),
            port,
            success: certificate.is_some(),
            timestamp: Utc::now(),
            certificate,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_port_defaults_to_443() {
        let req: ScanRequest = serde_json::from_str(r#"{"host": "example.com"}"#).unwrap();
        assert_eq!(req, ScanRequest::new("example.com", 443));
    }

    #[test]
    fn test_failed_outcome_is_tagged() {
        let result = Err(ScanError::EmptyCertificate {
            host: "example.com".to_string(),
            port: 443,
        });
        let outcome = ScanOutcome::from_result("example.com", 443, &result);
        assert!(!outcome.success);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"]["kind"], "empty_certificate");
        assert!(json.get("certificate").is_none());
    }
}
