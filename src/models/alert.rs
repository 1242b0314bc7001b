//! Alert records derived from certificate facts

use crate::config::settings::AlertSettings;
use crate::models::{CertificateFact, TenantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Info => write!(f, "info"),
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Critical => write!(f, "critical"),
        }
    }
}

/// A stored alert about one certificate of one tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub fingerprint: String,
    pub subject_cn: String,
    pub level: AlertLevel,
    pub message: String,
    #[serde(with = "crate::models::certificate::iso8601")]
    pub created_at: DateTime<Utc>,
}

impl AlertRecord {
    fn new(
        tenant_id: &TenantId,
        fact: &CertificateFact,
        level: AlertLevel,
        message: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: tenant_id.clone(),
            fingerprint: fact.fingerprint.clone(),
            subject_cn: fact.subject_cn.clone(),
            level,
            message,
            created_at: now,
        }
    }
}

/// Evaluate a freshly scanned certificate against the expiry thresholds.
///
/// Returns an empty list for a healthy certificate.
pub fn evaluate(
    tenant_id: &TenantId,
    fact: &CertificateFact,
    thresholds: &AlertSettings,
    now: DateTime<Utc>,
) -> Vec<AlertRecord> {
    let mut alerts = Vec::new();
    let days_left = fact.days_until_expiry(now);

    if fact.is_expired(now) {
        alerts.push(AlertRecord::new(
            tenant_id,
            fact,
            AlertLevel::Critical,
            format!("Certificate for {} has expired", fact.subject_cn),
            now,
        ));
    } else if days_left < thresholds.critical_days {
        alerts.push(AlertRecord::new(
            tenant_id,
            fact,
            AlertLevel::Critical,
            format!("Certificate for {} expires in {} days", fact.subject_cn, days_left),
            now,
        ));
    } else if days_left <= thresholds.warning_days {
        alerts.push(AlertRecord::new(
            tenant_id,
            fact,
            AlertLevel::Warning,
            format!("Certificate for {} expires in {} days", fact.subject_cn, days_left),
            now,
        ));
    }

    if fact.is_not_yet_valid(now) {
        alerts.push(AlertRecord::new(
            tenant_id,
            fact,
            AlertLevel::Warning,
            format!("Certificate for {} is not yet valid", fact.subject_cn),
            now,
        ));
    }

    if fact.is_self_signed {
        alerts.push(AlertRecord::new(
            tenant_id,
            fact,
            AlertLevel::Warning,
            format!("Certificate for {} is self-signed", fact.subject_cn),
            now,
        ));
    }

    alerts
}
