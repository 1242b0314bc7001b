//! cert-warden library
//!
//! Observes the TLS certificate a server presents and turns it into a
//! normalized [`CertificateFact`](models::CertificateFact):
//! - Hostname normalization from raw user input
//! - Observe-only TLS handshake and leaf certificate decoding
//! - Expiry alert evaluation and tenant-scoped storage
//! - SMTP notifications and an HTTP API
//!
//! # Usage
//!
//! ```rust,ignore
//! use cert_warden::config::ScanSettings;
//! use cert_warden::models::ScanRequest;
//! use cert_warden::scanner::Scanner;
//!
//! #[tokio::main]
//! async fn main() {
//!     let scanner = Scanner::new(ScanSettings::default());
//!     let fact = scanner.scan(&ScanRequest::new("https://example.com/", 443)).await;
//!     // Process fact...
//! }
//! ```

pub mod api;
pub mod auth;
pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod notify;
pub mod output;
pub mod scanner;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use models::{CertificateFact, ScanOutcome, ScanRequest};
pub use scanner::{fetch, Scanner};
pub use utils::{Result, ScanError, ToolkitError};
