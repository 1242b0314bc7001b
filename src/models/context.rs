//! Per-request caller context

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Tenant identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TenantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TenantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an authenticated caller may do
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ReadCertificates,
    ReadAlerts,
    Scan,
}

impl Permission {
    pub fn all() -> BTreeSet<Permission> {
        [
            Permission::ReadCertificates,
            Permission::ReadAlerts,
            Permission::Scan,
        ]
        .into_iter()
        .collect()
    }
}

/// Identity of an authenticated caller, threaded explicitly into handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub tenant_id: TenantId,
    pub key_id: String,
    pub permissions: BTreeSet<Permission>,
}

impl RequestContext {
    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}
