mod common;

use cert_warden::checks::CertificateDecoder;
use cert_warden::models::KeyAlgorithm;
use cert_warden::utils::ScanErrorKind;
use common::{certificate_authority, self_signed, signed_by};
use rcgen::{
    BmpString, CertificateParams, DistinguishedName, DnType, DnValue, KeyPair, SerialNumber,
};
use sha2::{Digest, Sha256};

#[test]
fn test_self_signed_localhost_without_san() {
    let leaf = self_signed("localhost", &[]);
    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "127.0.0.1")
        .unwrap();

    assert_eq!(fact.subject_cn, "localhost");
    assert_eq!(fact.san, vec!["localhost"]);
    assert_eq!(fact.issuer, fact.subject_cn);
    assert!(fact.is_self_signed);
    assert!(!fact.is_trusted);
}

#[test]
fn test_ca_issued_with_short_issuer_cn_and_org() {
    let ca = certificate_authority(Some("R3"), Some("Let's Encrypt"));
    let leaf = signed_by(&ca, "www.example.test", &["www.example.test", "example.test"]);

    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "www.example.test")
        .unwrap();

    assert_eq!(fact.issuer, "Let's Encrypt R3");
    assert_eq!(fact.san, vec!["www.example.test", "example.test"]);
    assert!(!fact.is_self_signed);
    assert!(fact.is_trusted);
}

#[test]
fn test_short_issuer_cn_without_org() {
    let ca = certificate_authority(Some("E1"), None);
    let leaf = signed_by(&ca, "example.test", &[]);

    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "example.test")
        .unwrap();
    assert_eq!(fact.issuer, "E1");
}

#[test]
fn test_long_issuer_cn_is_kept_as_is() {
    let ca = certificate_authority(Some("Example Issuing CA"), Some("Example Corp"));
    let leaf = signed_by(&ca, "example.test", &[]);

    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "example.test")
        .unwrap();
    assert_eq!(fact.issuer, "Example Issuing CA");
}

#[test]
fn test_issuer_org_only() {
    let ca = certificate_authority(None, Some("Example Corp"));
    let leaf = signed_by(&ca, "example.test", &[]);

    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "example.test")
        .unwrap();
    assert_eq!(fact.issuer, "Example Corp");
}

#[test]
fn test_threshold_is_configurable() {
    let ca = certificate_authority(Some("Short CA"), Some("Example Corp"));
    let leaf = signed_by(&ca, "example.test", &[]);

    let fact = CertificateDecoder::new(10)
        .decode(&leaf.der(), "example.test")
        .unwrap();
    assert_eq!(fact.issuer, "Example Corp Short CA");
}

#[test]
fn test_empty_issuer_cn_counts_as_absent() {
    let ca = certificate_authority(Some(""), Some("Example Corp"));
    let leaf = signed_by(&ca, "example.test", &[]);
    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "example.test")
        .unwrap();
    assert_eq!(fact.issuer, "Example Corp");

    let ca = certificate_authority(Some(""), None);
    let leaf = signed_by(&ca, "example.test", &[]);
    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "example.test")
        .unwrap();
    assert_eq!(fact.issuer, "Unknown Issuer");
}

#[test]
fn test_san_with_only_ip_entries_falls_back_to_subject_cn() {
    let leaf = self_signed("ip.example.test", &["127.0.0.1", "::1"]);
    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "127.0.0.1")
        .unwrap();
    assert_eq!(fact.san, vec!["ip.example.test"]);
}

#[test]
fn test_rsa_2048_key() {
    let der = include_bytes!("fixtures/rsa_2048.der");
    let fact = CertificateDecoder::default()
        .decode(der, "rsa.example.test")
        .unwrap();

    assert_eq!(fact.subject_cn, "rsa.example.test");
    assert_eq!(fact.san, vec!["rsa.example.test"]);
    assert_eq!(fact.key_alg, KeyAlgorithm::Rsa);
    assert_eq!(fact.key_size, 2048);
    assert!(fact.is_self_signed);
}

#[test]
fn test_rsassa_pss_key_reports_modulus_bits() {
    let der = include_bytes!("fixtures/rsa_pss_3072.der");
    let fact = CertificateDecoder::default()
        .decode(der, "pss.example.test")
        .unwrap();

    assert_eq!(fact.key_alg, KeyAlgorithm::Rsa);
    assert_eq!(fact.key_size, 3072);
}

#[test]
fn test_latin1_teletex_names() {
    let der = include_bytes!("fixtures/t61_latin1.der");
    let fact = CertificateDecoder::default()
        .decode(der, "wächter.example.test")
        .unwrap();

    assert_eq!(fact.subject_cn, "Wächter CA");
    assert_eq!(fact.issuer, "Wächter CA");
}

#[test]
fn test_bmp_string_names() {
    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(
        DnType::OrganizationName,
        DnValue::BmpString(BmpString::try_from("Zertifikat-Wächter").unwrap()),
    );
    params.distinguished_name.push(
        DnType::CommonName,
        DnValue::BmpString(BmpString::try_from("Wä").unwrap()),
    );
    let cert = params.self_signed(&key).unwrap();

    let fact = CertificateDecoder::default()
        .decode(cert.der(), "example.test")
        .unwrap();
    assert_eq!(fact.subject_cn, "Wä");
    assert_eq!(fact.issuer, "Zertifikat-Wächter Wä");
}

#[test]
fn test_ed25519_key() {
    let key = KeyPair::generate_for(&rcgen::PKCS_ED25519).unwrap();
    let mut params = CertificateParams::new(vec!["ed.example.test".to_string()]).unwrap();
    params.distinguished_name = common::distinguished_name(Some("ed.example.test"), None);
    let cert = params.self_signed(&key).unwrap();

    let fact = CertificateDecoder::default()
        .decode(cert.der(), "ed.example.test")
        .unwrap();
    assert_eq!(fact.key_alg, KeyAlgorithm::Ed25519);
    assert_eq!(fact.key_size, 2048);
}

#[test]
fn test_ecdsa_p384_key() {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.distinguished_name = common::distinguished_name(Some("p384.example.test"), None);
    let cert = params.self_signed(&key).unwrap();

    let fact = CertificateDecoder::default()
        .decode(cert.der(), "p384.example.test")
        .unwrap();
    assert_eq!(fact.key_alg, KeyAlgorithm::Ecdsa);
    assert_eq!(fact.key_size, 384);
}

#[test]
fn test_serial_is_lowercase_hex_without_padding() {
    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.serial_number = Some(SerialNumber::from_slice(&[0x01, 0xAB]));
    let cert = params.self_signed(&key).unwrap();

    let fact = CertificateDecoder::default()
        .decode(cert.der(), "serial.example.test")
        .unwrap();
    assert_eq!(fact.serial, "1ab");
}

#[test]
fn test_fingerprint_is_deterministic() {
    let leaf = self_signed("example.test", &["example.test"]);
    let der = leaf.der();
    let decoder = CertificateDecoder::default();

    let first = decoder.decode(&der, "example.test").unwrap();
    let second = decoder.decode(&der, "other.test").unwrap();

    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.fingerprint, hex::encode(Sha256::digest(&der)));
    assert_eq!(first.fingerprint.len(), 64);
    assert!(first
        .fingerprint
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn test_validity_window_is_utc() {
    let leaf = self_signed("example.test", &[]);
    let fact = CertificateDecoder::default()
        .decode(&leaf.der(), "example.test")
        .unwrap();
    assert!(fact.not_before < fact.not_after);
}

#[test]
fn test_garbage_is_decode_error() {
    let err = CertificateDecoder::default()
        .decode(&[0x30, 0x03, 0x02, 0x01], "example.test")
        .unwrap_err();
    assert_eq!(err.kind(), ScanErrorKind::DecodeError);
}
