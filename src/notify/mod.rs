//! E-mail notifications
//!
//! A [`Notifier`] delivers an [`EmailMessage`]; [`SmtpNotifier`] is the SMTP
//! implementation used by the API and the CLI.

pub mod email;
pub mod template;

pub use email::SmtpNotifier;
pub use template::render_html;

use crate::utils::NotifyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default subject of a test e-mail
pub const TEST_EMAIL_SUBJECT: &str = "🛡️ Test von Zertifikat-Wächter";

/// Default body of a test e-mail
pub const TEST_EMAIL_BODY: &str = "Test-E-Mail";

/// A composed e-mail, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    /// Sent as the `text/html` alternative when present
    pub html_body: Option<String>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text_body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text_body: text_body.into(),
            html_body: None,
        }
    }

    pub fn with_html(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }
}

/// Delivers e-mail messages
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;

    /// Human-readable description of where messages go, e.g. `host:port`
    fn destination(&self) -> String;
}
