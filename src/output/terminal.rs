//! Terminal output utilities using console styling

use crate::models::{AlertLevel, AlertRecord, CertificateFact, ScanOutcome};
use crate::output::tables::{format_table, status_cell, warning_cell};
use chrono::{DateTime, Utc};
use comfy_table::Cell;
use console::style;

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(format!("━━━ {} ━━━", title)).cyan().bold());
    println!();
}

/// Print a scan outcome: the certificate summary on success, the failure otherwise
pub fn print_outcome(outcome: &ScanOutcome, verbose: bool) {
    match (&outcome.certificate, &outcome.error) {
        (Some(fact), _) => {
            print_header(&format!("Certificate for {}:{}", outcome.host, outcome.port));
            print_certificate(fact, outcome.timestamp, verbose);
        }
        (None, Some(failure)) => print_error(&format!(
            "{}:{} [{}] {}",
            outcome.host, outcome.port, failure.kind, failure.message
        )),
        (None, None) => print_error(&format!("{}:{} scan failed", outcome.host, outcome.port)),
    }
}

/// Print the certificate summary table and SAN list
pub fn print_certificate(fact: &CertificateFact, now: DateTime<Utc>, verbose: bool) {
    let mut rows = vec![
        ("Subject".to_string(), Cell::new(&fact.subject_cn)),
        ("Issuer".to_string(), Cell::new(&fact.issuer)),
        (
            "Valid From".to_string(),
            Cell::new(fact.not_before.format("%Y-%m-%d %H:%M:%S UTC")),
        ),
        (
            "Valid Until".to_string(),
            Cell::new(fact.not_after.format("%Y-%m-%d %H:%M:%S UTC")),
        ),
        ("Days Until Expiry".to_string(), expiry_cell(fact, now)),
        (
            "Key".to_string(),
            Cell::new(format!("{} {} bits", fact.key_alg, fact.key_size)),
        ),
        (
            "Self-Signed".to_string(),
            if fact.is_self_signed {
                warning_cell("Yes")
            } else {
                status_cell("No", true)
            },
        ),
    ];

    if verbose {
        rows.push(("Serial Number".to_string(), Cell::new(&fact.serial)));
        rows.push(("SHA256 Fingerprint".to_string(), Cell::new(&fact.fingerprint)));
    }

    println!("{}", format_table(&["Field", "Value"], &rows));

    println!();
    println!("{}", style("Subject Alternative Names:").bold());
    for san in &fact.san {
        println!("  {} {}", style("•").cyan(), san);
    }
}

/// Print alerts, one line each
pub fn print_alerts(alerts: &[AlertRecord]) {
    if alerts.is_empty() {
        print_success("No alerts");
        return;
    }
    for alert in alerts {
        match alert.level {
            AlertLevel::Critical => print_error(&alert.message),
            AlertLevel::Warning => print_warning(&alert.message),
            AlertLevel::Info => print_info(&alert.message),
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

fn expiry_cell(fact: &CertificateFact, now: DateTime<Utc>) -> Cell {
    let days = fact.days_until_expiry(now);
    if fact.is_expired(now) {
        status_cell(format!("Expired {} days ago", days.abs()), false)
    } else if days <= 30 {
        warning_cell(format!("{} days", days))
    } else {
        status_cell(format!("{} days", days), true)
    }
}
