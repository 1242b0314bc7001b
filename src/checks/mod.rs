//! Certificate inspection for cert-warden
//!
//! Hostname normalization, the observe-only TLS fetcher and the leaf
//! certificate decoder.

pub mod certificate;
pub mod hostname;
pub mod ssl;

pub use certificate::{CertificateDecoder, DEFAULT_ISSUER_SHORT_CN_THRESHOLD};
pub use hostname::normalize;
pub use ssl::{CertificateFetcher, ObserveOnlyVerifier};
