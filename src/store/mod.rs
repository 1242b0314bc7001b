//! Tenant-scoped persistence of certificate facts and alerts

use crate::models::{AlertRecord, CertificateFact, TenantId};
use crate::utils::StoreError;
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage for scanned certificates and their alerts.
///
/// Every read is scoped to one tenant; records of other tenants are never
/// visible.
pub trait CertificateStore: Send + Sync {
    /// Insert or replace the certificate with the same fingerprint
    fn save_certificate(&self, tenant: &TenantId, fact: &CertificateFact) -> Result<(), StoreError>;

    /// All certificates of `tenant`, ordered by fingerprint
    fn list_certificates(&self, tenant: &TenantId) -> Result<Vec<CertificateFact>, StoreError>;

    fn get_certificate(
        &self,
        tenant: &TenantId,
        fingerprint: &str,
    ) -> Result<CertificateFact, StoreError>;

    fn save_alert(&self, alert: &AlertRecord) -> Result<(), StoreError>;

    /// All alerts of `tenant`, newest first
    fn list_alerts(&self, tenant: &TenantId) -> Result<Vec<AlertRecord>, StoreError>;
}

#[derive(Default)]
struct Tables {
    certificates: HashMap<(TenantId, String), CertificateFact>,
    alerts: Vec<AlertRecord>,
}

/// In-process store
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CertificateStore for MemoryStore {
    fn save_certificate(&self, tenant: &TenantId, fact: &CertificateFact) -> Result<(), StoreError> {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables
            .certificates
            .insert((tenant.clone(), fact.fingerprint.clone()), fact.clone());
        Ok(())
    }

    fn list_certificates(&self, tenant: &TenantId) -> Result<Vec<CertificateFact>, StoreError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let mut facts: Vec<CertificateFact> = tables
            .certificates
            .iter()
            .filter(|((owner, _), _)| owner == tenant)
            .map(|(_, fact)| fact.clone())
            .collect();
        facts.sort_by(|a, b| a.fingerprint.cmp(&b.fingerprint));
        Ok(facts)
    }

    fn get_certificate(
        &self,
        tenant: &TenantId,
        fingerprint: &str,
    ) -> Result<CertificateFact, StoreError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables
            .certificates
            .get(&(tenant.clone(), fingerprint.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                what: format!("certificate {}", fingerprint),
            })
    }

    fn save_alert(&self, alert: &AlertRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.alerts.push(alert.clone());
        Ok(())
    }

    fn list_alerts(&self, tenant: &TenantId) -> Result<Vec<AlertRecord>, StoreError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let mut alerts: Vec<AlertRecord> = tables
            .alerts
            .iter()
            .filter(|alert| &alert.tenant_id == tenant)
            .cloned()
            .collect();
        // Later inserts first on equal timestamps
        alerts.reverse();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertLevel, KeyAlgorithm};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn fact(fingerprint: &str, cn: &str) -> CertificateFact {
        let not_before = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        CertificateFact {
            fingerprint: fingerprint.to_string(),
            subject_cn: cn.to_string(),
            san: vec![cn.to_string()],
            issuer: "Test CA".to_string(),
            not_before,
            not_after: not_before + Duration::days(90),
            key_alg: KeyAlgorithm::Ecdsa,
            key_size: 256,
            serial: "1".to_string(),
            is_self_signed: false,
            is_trusted: true,
        }
    }

    fn alert(tenant: &TenantId, message: &str, minutes: i64) -> AlertRecord {
        AlertRecord {
            id: Uuid::new_v4(),
            tenant_id: tenant.clone(),
            fingerprint: "aa".to_string(),
            subject_cn: "a.test".to_string(),
            level: AlertLevel::Warning,
            message: message.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_tenants_are_isolated() {
        let store = MemoryStore::new();
        let acme = TenantId::from("acme");
        let globex = TenantId::from("globex");

        store.save_certificate(&acme, &fact("aa", "a.test")).unwrap();
        store.save_certificate(&globex, &fact("bb", "b.test")).unwrap();

        let listed = store.list_certificates(&acme).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].fingerprint, "aa");

        assert!(matches!(
            store.get_certificate(&acme, "bb"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.get_certificate(&globex, "bb").is_ok());
    }

    #[test]
    fn test_save_certificate_replaces_same_fingerprint() {
        let store = MemoryStore::new();
        let tenant = TenantId::from("acme");

        store.save_certificate(&tenant, &fact("aa", "old.test")).unwrap();
        store.save_certificate(&tenant, &fact("aa", "new.test")).unwrap();

        let listed = store.list_certificates(&tenant).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].subject_cn, "new.test");
    }

    #[test]
    fn test_alerts_newest_first() {
        let store = MemoryStore::new();
        let tenant = TenantId::from("acme");
        let other = TenantId::from("globex");

        store.save_alert(&alert(&tenant, "first", 0)).unwrap();
        store.save_alert(&alert(&tenant, "second", 5)).unwrap();
        store.save_alert(&alert(&other, "hidden", 10)).unwrap();

        let messages: Vec<String> = store
            .list_alerts(&tenant)
            .unwrap()
            .into_iter()
            .map(|a| a.message)
            .collect();
        assert_eq!(messages, vec!["second", "first"]);
    }
}
