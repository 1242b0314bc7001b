//! SMTP delivery using lettre

use crate::config::SmtpSettings;
use crate::notify::{EmailMessage, Notifier};
use crate::utils::NotifyError;
use async_trait::async_trait;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Port on which SMTP runs over implicit TLS
const SMTPS_PORT: u16 = 465;

/// Sends e-mail through an SMTP relay
pub struct SmtpNotifier {
    settings: SmtpSettings,
}

impl SmtpNotifier {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    /// Build the MIME message
    pub(crate) fn build_message(&self, message: &EmailMessage) -> Result<Message, NotifyError> {
        let from = self
            .settings
            .from
            .as_deref()
            .or(self.settings.user.as_deref())
            .ok_or_else(|| NotifyError::NotConfigured {
                key: "SMTP_FROM".to_string(),
            })?;

        let builder = Message::builder()
            .from(parse_mailbox(from)?)
            .to(parse_mailbox(&message.to)?)
            .subject(message.subject.clone());

        let built = match &message.html_body {
            Some(html) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(message.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html.clone()),
                    ),
            ),
            None => builder
                .header(header::ContentType::TEXT_PLAIN)
                .body(message.text_body.clone()),
        };

        built.map_err(|e| NotifyError::BuildFailed {
            message: e.to_string(),
        })
    }

    /// Build the SMTP transport; no connection is made until a send
    pub(crate) fn transport(&self) -> Result<SmtpTransport, NotifyError> {
        let host = self.settings.host.as_str();
        let builder = if self.settings.port == SMTPS_PORT {
            SmtpTransport::relay(host)
        } else if self.settings.secure {
            SmtpTransport::starttls_relay(host)
        } else {
            Ok(SmtpTransport::builder_dangerous(host))
        }
        .map_err(|e| NotifyError::Transport {
            server: self.destination(),
            message: e.to_string(),
        })?;

        let mut builder = builder
            .port(self.settings.port)
            .timeout(Some(self.settings.timeout()));

        if let (Some(user), Some(password)) = (&self.settings.user, &self.settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(builder.build())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress {
            address: address.to_string(),
            message: e.to_string(),
        })
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let email = self.build_message(message)?;
        let transport = self.transport()?;
        let server = self.destination();

        tracing::debug!("Sending e-mail to {} via {}", message.to, server);

        // lettre's SmtpTransport blocks
        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|e| NotifyError::Transport {
                server: server.clone(),
                message: e.to_string(),
            })?
            .map_err(|e| NotifyError::Transport {
                server: server.clone(),
                message: e.to_string(),
            })?;

        tracing::info!("E-mail sent to {} via {}", message.to, server);
        Ok(())
    }

    fn destination(&self) -> String {
        format!("{}:{}", self.settings.host, self.settings.port)
    }
}
