//! Leaf certificate decoding
//!
//! Turns the DER bytes of a leaf certificate into a [`CertificateFact`]
//! using x509-parser.

use crate::models::{CertificateFact, KeyAlgorithm};
use crate::utils::ScanError;
use chrono::{DateTime, TimeZone, Utc};
use der_parser::asn1_rs::{Any, Tag};
use der_parser::oid;
use der_parser::oid::Oid;
use sha2::{Digest, Sha256};
use x509_parser::prelude::*;
use x509_parser::public_key::{PublicKey, RSAPublicKey};

/// Issuer CNs shorter than this get the issuer organization prefixed
pub const DEFAULT_ISSUER_SHORT_CN_THRESHOLD: usize = 5;

/// Key size reported when the algorithm carries no meaningful bit length
const FALLBACK_KEY_SIZE: u32 = 2048;

const OID_RSA_ENCRYPTION: Oid<'static> = oid!(1.2.840.113549.1.1.1);
const OID_RSASSA_PSS: Oid<'static> = oid!(1.2.840.113549.1.1.10);
const OID_EC_PUBLIC_KEY: Oid<'static> = oid!(1.2.840.10045.2.1);
const OID_ED25519: Oid<'static> = oid!(1.3.101.112);

const OID_CURVE_P256: Oid<'static> = oid!(1.2.840.10045.3.1.7);
const OID_CURVE_P384: Oid<'static> = oid!(1.3.132.0.34);
const OID_CURVE_P521: Oid<'static> = oid!(1.3.132.0.35);
const OID_CURVE_SECP256K1: Oid<'static> = oid!(1.3.132.0.10);

/// Decoder for leaf certificates
#[derive(Debug, Clone)]
pub struct CertificateDecoder {
    issuer_short_cn_threshold: usize,
}

impl CertificateDecoder {
    /// Create a decoder with the given issuer short-CN threshold
    pub fn new(issuer_short_cn_threshold: usize) -> Self {
        Self {
            issuer_short_cn_threshold,
        }
    }

    /// Decode a DER-encoded leaf certificate observed while connected to `hostname`.
    ///
    /// `hostname` stands in for the subject CN and SAN list when the
    /// certificate carries neither.
    pub fn decode(&self, der: &[u8], hostname: &str) -> Result<CertificateFact, ScanError> {
        let (_, cert) = X509Certificate::from_der(der)
            .map_err(|e| ScanError::decode(format!("Failed to parse certificate: {}", e)))?;

        let subject_cn = first_attribute(cert.subject().iter_common_name())
            .unwrap_or_else(|| hostname.to_string());
        let issuer = self.issuer_display_name(cert.issuer());
        let san = extract_san(&cert, &subject_cn, hostname)?;

        let not_before = asn1_time_to_datetime(cert.validity().not_before)?;
        let not_after = asn1_time_to_datetime(cert.validity().not_after)?;

        let (key_alg, key_size) = classify_public_key(cert.public_key());

        // Raw DER comparison; no signature check
        let is_self_signed = cert.subject().as_raw() == cert.issuer().as_raw();

        Ok(CertificateFact {
            fingerprint: hex::encode(Sha256::digest(der)),
            subject_cn,
            san,
            issuer,
            not_before,
            not_after,
            key_alg,
            key_size,
            serial: format!("{:x}", cert.serial),
            is_self_signed,
            is_trusted: !is_self_signed,
        })
    }

    fn issuer_display_name(&self, issuer: &X509Name<'_>) -> String {
        let cn = first_attribute(issuer.iter_common_name()).filter(|s| !s.is_empty());
        let org = first_attribute(issuer.iter_organization()).filter(|s| !s.is_empty());

        match (cn, org) {
            (Some(cn), Some(org)) if cn.chars().count() < self.issuer_short_cn_threshold => {
                format!("{} {}", org, cn)
            }
            (Some(cn), _) => cn,
            (None, Some(org)) => org,
            (None, None) => "Unknown Issuer".to_string(),
        }
    }
}

impl Default for CertificateDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUER_SHORT_CN_THRESHOLD)
    }
}

/// First attribute value as text
fn first_attribute<'a, 'b: 'a, I>(mut attrs: I) -> Option<String>
where
    I: Iterator<Item = &'a AttributeTypeAndValue<'b>>,
{
    attrs.next().map(|attr| match attr.as_str() {
        Ok(s) => s.to_string(),
        Err(_) => attribute_text(attr.attr_value()),
    })
}

/// Decode the string types `as_str` does not cover.
///
/// T61String is read as UTF-8 when valid and as latin-1 otherwise, which is
/// what OpenSSL writes for non-ASCII names. Anything else is converted lossily.
fn attribute_text(value: &Any<'_>) -> String {
    let data = value.as_bytes();
    match value.tag() {
        Tag::T61String | Tag::VideotexString => match std::str::from_utf8(data) {
            Ok(s) => s.to_string(),
            Err(_) => data.iter().map(|&b| char::from(b)).collect(),
        },
        Tag::BmpString => char::decode_utf16(
            data.chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]])),
        )
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect(),
        Tag::UniversalString => data
            .chunks_exact(4)
            .map(|quad| {
                char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]))
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect(),
        _ => String::from_utf8_lossy(data).into_owned(),
    }
}

fn extract_san(
    cert: &X509Certificate<'_>,
    subject_cn: &str,
    hostname: &str,
) -> Result<Vec<String>, ScanError> {
    let san_ext = cert
        .subject_alternative_name()
        .map_err(|e| ScanError::decode(format!("Invalid subjectAltName extension: {}", e)))?;

    let names: Vec<String> = san_ext
        .map(|ext| {
            ext.value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some(dns.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if !names.is_empty() {
        return Ok(names);
    }

    let fallback = if subject_cn.is_empty() {
        hostname
    } else {
        subject_cn
    };
    Ok(vec![fallback.to_string()])
}

/// Map the subject public key to an algorithm and bit size
fn classify_public_key(spki: &SubjectPublicKeyInfo<'_>) -> (KeyAlgorithm, u32) {
    let algorithm = &spki.algorithm.algorithm;

    if *algorithm == OID_RSA_ENCRYPTION || *algorithm == OID_RSASSA_PSS {
        // x509-parser only parses rsaEncryption keys; RSASSA-PSS carries the
        // same RSAPublicKey structure in the bit string
        let bits = match spki.parsed() {
            Ok(PublicKey::RSA(rsa)) => modulus_bits(rsa.modulus),
            _ => RSAPublicKey::from_der(&spki.subject_public_key.data)
                .map(|(_, rsa)| modulus_bits(rsa.modulus))
                .unwrap_or(0),
        };
        let bits = if bits == 0 { FALLBACK_KEY_SIZE } else { bits };
        (KeyAlgorithm::Rsa, bits)
    } else if *algorithm == OID_EC_PUBLIC_KEY {
        let curve = spki
            .algorithm
            .parameters
            .as_ref()
            .and_then(|params| params.as_oid().ok());
        let bits = match curve {
            Some(c) if c == OID_CURVE_P256 || c == OID_CURVE_SECP256K1 => 256,
            Some(c) if c == OID_CURVE_P384 => 384,
            Some(c) if c == OID_CURVE_P521 => 521,
            _ => ec_point_bits(&spki.subject_public_key.data),
        };
        (KeyAlgorithm::Ecdsa, bits)
    } else if *algorithm == OID_ED25519 {
        (KeyAlgorithm::Ed25519, FALLBACK_KEY_SIZE)
    } else {
        tracing::debug!("Unrecognized public key algorithm {}", algorithm);
        (KeyAlgorithm::Unknown, FALLBACK_KEY_SIZE)
    }
}

/// Bit length of a big-endian unsigned integer
fn modulus_bits(modulus: &[u8]) -> u32 {
    let significant = match modulus.iter().position(|&b| b != 0) {
        Some(idx) => &modulus[idx..],
        None => return 0,
    };
    (significant.len() as u32) * 8 - significant[0].leading_zeros()
}

/// Field size of an EC point in SEC1 encoding
fn ec_point_bits(point: &[u8]) -> u32 {
    match point.first() {
        Some(0x04) => ((point.len() - 1) / 2 * 8) as u32,
        Some(0x02) | Some(0x03) => ((point.len() - 1) * 8) as u32,
        _ => FALLBACK_KEY_SIZE,
    }
}

/// Convert ASN.1 time to chrono DateTime
fn asn1_time_to_datetime(time: ASN1Time) -> Result<DateTime<Utc>, ScanError> {
    Utc.timestamp_opt(time.timestamp(), 0)
        .single()
        .ok_or_else(|| ScanError::decode("Invalid timestamp in certificate"))
}
