//! Data models for cert-warden
//!
//! This module contains all the data structures passed between the scan
//! pipeline, the collaborators and the HTTP/CLI surfaces.

pub mod alert;
pub mod certificate;
pub mod context;
pub mod scan;

pub use alert::{AlertLevel, AlertRecord};
pub use certificate::{CertificateFact, KeyAlgorithm};
pub use context::{Permission, RequestContext, TenantId};
pub use scan::{ScanFailure, ScanOutcome, ScanRequest, DEFAULT_PORT};
