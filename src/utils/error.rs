//! Custom error types for cert-warden
//!
//! This module defines domain-specific error types using `thiserror` for
//! the scan pipeline and the collaborators around it.

use serde::Serialize;
use thiserror::Error;

/// Top-level error type for the cert-warden application
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single certificate scan.
///
/// No variant carries a partially decoded certificate: a scan either yields a
/// complete fact or one of these.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Connection to {host}:{port} failed: {message}")]
    Connect {
        host: String,
        port: u16,
        message: String,
    },

    #[error("No certificate presented by {host}:{port}")]
    EmptyCertificate { host: String, port: u16 },

    #[error("Failed to decode certificate: {message}")]
    Decode { message: String },
}

/// Stable classification of a [`ScanError`], used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanErrorKind {
    InvalidInput,
    ConnectError,
    EmptyCertificate,
    DecodeError,
}

impl ScanError {
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            ScanError::InvalidInput { .. } => ScanErrorKind::InvalidInput,
            ScanError::Connect { .. } => ScanErrorKind::ConnectError,
            ScanError::EmptyCertificate { .. } => ScanErrorKind::EmptyCertificate,
            ScanError::Decode { .. } => ScanErrorKind::DecodeError,
        }
    }

    pub(crate) fn connect(host: &str, port: u16, message: impl Into<String>) -> Self {
        ScanError::Connect {
            host: host.to_string(),
            port,
            message: message.into(),
        }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        ScanError::Decode {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanErrorKind::InvalidInput => write!(f, "invalid_input"),
            ScanErrorKind::ConnectError => write!(f, "connect_error"),
            ScanErrorKind::EmptyCertificate => write!(f, "empty_certificate"),
            ScanErrorKind::DecodeError => write!(f, "decode_error"),
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// E-mail composition and delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid e-mail address {address}: {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Failed to build e-mail: {message}")]
    BuildFailed { message: String },

    #[error("Template rendering failed: {message}")]
    TemplateError { message: String },

    #[error("SMTP transport error for {server}: {message}")]
    Transport { server: String, message: String },

    #[error("SMTP is not configured: missing {key}")]
    NotConfigured { key: String },
}

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found: {what}")]
    NotFound { what: String },
}

/// Credential check errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("API key or bearer token required")]
    MissingCredential,

    #[error("API key invalid or inactive")]
    InvalidKey,

    #[error("API key expired")]
    Expired,
}

/// Result type alias using ToolkitError
pub type Result<T> = std::result::Result<T, ToolkitError>;
