//! Certificate fact types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public key algorithm of a certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "ECDSA")]
    Ecdsa,
    Ed25519,
    Unknown,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => write!(f, "RSA"),
            KeyAlgorithm::Ecdsa => write!(f, "ECDSA"),
            KeyAlgorithm::Ed25519 => write!(f, "Ed25519"),
            KeyAlgorithm::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Normalized summary of a leaf certificate as observed on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateFact {
    /// SHA-256 over the raw DER bytes, lowercase hex
    pub fingerprint: String,
    /// Subject common name (the connected hostname when the subject has none)
    pub subject_cn: String,
    /// DNS Subject Alternative Names, never empty
    pub san: Vec<String>,
    /// Display name of the issuer
    pub issuer: String,
    /// Not valid before
    #[serde(with = "iso8601")]
    pub not_before: DateTime<Utc>,
    /// Not valid after
    #[serde(with = "iso8601")]
    pub not_after: DateTime<Utc>,
    /// Public key algorithm
    pub key_alg: KeyAlgorithm,
    /// Public key size in bits
    pub key_size: u32,
    /// Serial number (lowercase hex)
    pub serial: String,
    /// Whether issuer and subject names are identical
    pub is_self_signed: bool,
    /// `!is_self_signed`; no chain validation is implied
    pub is_trusted: bool,
}

impl CertificateFact {
    /// Whole days until expiry (negative if expired)
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        self.not_after.signed_duration_since(now).num_days()
    }

    /// Check if the certificate is expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.not_after
    }

    /// Check if the certificate is not yet valid
    pub fn is_not_yet_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.not_before
    }
}

/// ISO-8601 timestamps with an explicit `+00:00` offset
pub(crate) mod iso8601 {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
