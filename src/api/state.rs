//! Shared application state

use crate::auth::{ApiKeyRegistry, CredentialCheck};
use crate::config::Settings;
use crate::notify::{Notifier, SmtpNotifier};
use crate::scanner::Scanner;
use crate::store::{CertificateStore, MemoryStore};
use crate::utils::ToolkitError;
use std::sync::Arc;

/// Everything a handler needs, shared behind an `Arc`
pub struct AppState {
    pub settings: Settings,
    pub scanner: Scanner,
    pub store: Arc<dyn CertificateStore>,
    pub credentials: Arc<dyn CredentialCheck>,
    /// Used when a request carries no SMTP configuration of its own
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        store: Arc<dyn CertificateStore>,
        credentials: Arc<dyn CredentialCheck>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            scanner: Scanner::new(settings.scan.clone()),
            settings,
            store,
            credentials,
            notifier,
        }
    }

    /// Default wiring: in-memory store, configured API keys, SMTP from settings
    pub fn from_settings(settings: Settings) -> Result<Self, ToolkitError> {
        let credentials = Arc::new(ApiKeyRegistry::from_settings(&settings.api)?);
        let notifier = Arc::new(SmtpNotifier::new(settings.smtp.clone()));
        Ok(Self::new(
            settings,
            Arc::new(MemoryStore::new()),
            credentials,
            notifier,
        ))
    }
}
