//! Utility modules for cert-warden
//!
//! This module contains the error types shared by every component.

pub mod error;

pub use error::{
    AuthError, ConfigError, NotifyError, Result, ScanError, ScanErrorKind, StoreError,
    ToolkitError,
};
