//! Subcommand implementations

use crate::api::{self, AppState};
use crate::cli::args::{ScanArgs, SendTestEmailArgs, ServeArgs};
use crate::config::Settings;
use crate::models::{alert, ScanOutcome, ScanRequest, TenantId};
use crate::notify::{
    render_html, EmailMessage, Notifier, SmtpNotifier, TEST_EMAIL_BODY, TEST_EMAIL_SUBJECT,
};
use crate::output;
use crate::scanner::Scanner;
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Tenant that owns alerts evaluated from the command line
const CLI_TENANT: &str = "cli";

#[derive(Serialize)]
struct ScanReport<'a> {
    #[serde(flatten)]
    outcome: &'a ScanOutcome,
    alerts: Vec<alert::AlertRecord>,
}

/// `cert-warden scan`; returns whether the scan succeeded
pub async fn run_scan(settings: &Settings, args: &ScanArgs, verbose: bool) -> Result<bool> {
    let mut scanner = Scanner::new(settings.scan.clone());
    if let Some(secs) = args.timeout {
        scanner = scanner.with_timeout(Duration::from_secs(secs));
    }

    let request = ScanRequest::new(
        args.host.clone(),
        args.port.unwrap_or(settings.scan.default_port),
    );
    let outcome = scanner.scan_outcome(&request).await;

    let alerts = outcome
        .certificate
        .as_ref()
        .map(|fact| {
            alert::evaluate(
                &TenantId::from(CLI_TENANT),
                fact,
                &settings.alerts,
                outcome.timestamp,
            )
        })
        .unwrap_or_default();

    if args.json {
        output::print_json(&ScanReport {
            outcome: &outcome,
            alerts,
        })?;
    } else {
        output::print_outcome(&outcome, verbose);
        if outcome.success {
            println!();
            output::print_alerts(&alerts);
        }
    }

    Ok(outcome.success)
}

/// `cert-warden serve`
pub async fn run_serve(mut settings: Settings, args: &ServeArgs) -> Result<()> {
    if let Some(bind) = &args.bind {
        settings.api.bind = bind.clone();
    }
    let bind = settings.api.bind.clone();

    let state = Arc::new(AppState::from_settings(settings)?);
    output::print_info(&format!("Serving on http://{}", bind));
    api::serve(state, &bind).await?;
    Ok(())
}

/// `cert-warden send-test-email`
pub async fn run_send_test_email(settings: &Settings, args: &SendTestEmailArgs) -> Result<()> {
    let notifier = SmtpNotifier::new(settings.smtp.clone());

    let subject = args
        .subject
        .clone()
        .unwrap_or_else(|| TEST_EMAIL_SUBJECT.to_string());
    let body = args.body.clone().unwrap_or_else(|| TEST_EMAIL_BODY.to_string());
    let html = render_html(&subject, &body, Some(&notifier.destination()))?;

    let message = EmailMessage::new(args.to.clone(), subject, body).with_html(html);
    notifier.send(&message).await?;

    output::print_success(&format!(
        "E-mail sent to {} via {}",
        args.to,
        notifier.destination()
    ));
    Ok(())
}
