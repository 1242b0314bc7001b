//! API key authentication
//!
//! Keys are never stored in plain form: the registry keeps the hex-encoded
//! HMAC-SHA256 of each key under a server-side secret and compares digests.

use crate::config::ApiSettings;
use crate::models::{Permission, RequestContext, TenantId};
use crate::utils::AuthError;
use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying a raw API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Resolves a raw credential into the caller's context
pub trait CredentialCheck: Send + Sync {
    fn authenticate(&self, raw_key: &str, now: DateTime<Utc>) -> Result<RequestContext, AuthError>;
}

/// Take the raw credential from `X-API-Key` or `Authorization: Bearer`
pub fn extract_credential(headers: &HeaderMap) -> Option<String> {
    let from_api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty());

    let from_bearer = || {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| {
                let (scheme, token) = value.trim().split_once(' ')?;
                scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
            })
            .filter(|token| !token.is_empty())
    };

    from_api_key.or_else(from_bearer).map(str::to_string)
}

/// Usage statistics of one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub last_used_at: Option<DateTime<Utc>>,
    pub usage_count: u64,
}

#[derive(Debug, Clone)]
struct ApiKeyRecord {
    id: String,
    tenant_id: TenantId,
    permissions: BTreeSet<Permission>,
    active: bool,
    expires_at: Option<DateTime<Utc>>,
    usage: KeyUsage,
}

/// In-memory registry of hashed API keys
pub struct ApiKeyRegistry {
    secret: Vec<u8>,
    /// Keyed by digest
    keys: RwLock<HashMap<String, ApiKeyRecord>>,
}

impl ApiKeyRegistry {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Build a registry holding every key listed in the API settings
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, AuthError> {
        if settings.api_key_secret.is_empty() && !settings.keys.is_empty() {
            tracing::warn!("API keys are configured without an api_key_secret");
        }

        let registry = Self::new(settings.api_key_secret.as_bytes());
        for key in &settings.keys {
            registry.register(
                &key.id,
                TenantId::from(key.tenant_id.as_str()),
                &key.key,
                key.permissions.clone(),
                key.expires_at,
            )?;
            if !key.active {
                registry.deactivate(&key.id);
            }
        }
        Ok(registry)
    }

    /// Hex-encoded HMAC-SHA256 of `raw_key` under the registry secret
    pub fn hash_key(&self, raw_key: &str) -> Result<String, AuthError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret).map_err(|_| AuthError::InvalidKey)?;
        mac.update(raw_key.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Add or replace a key
    pub fn register(
        &self,
        id: &str,
        tenant_id: TenantId,
        raw_key: &str,
        permissions: BTreeSet<Permission>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), AuthError> {
        let digest = self.hash_key(raw_key)?;
        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        keys.retain(|_, record| record.id != id);
        keys.insert(
            digest,
            ApiKeyRecord {
                id: id.to_string(),
                tenant_id,
                permissions,
                active: true,
                expires_at,
                usage: KeyUsage {
                    last_used_at: None,
                    usage_count: 0,
                },
            },
        );
        Ok(())
    }

    /// Mark a key inactive; returns whether the key exists
    pub fn deactivate(&self, id: &str) -> bool {
        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        keys.values_mut()
            .find(|record| record.id == id)
            .map(|record| record.active = false)
            .is_some()
    }

    pub fn usage(&self, id: &str) -> Option<KeyUsage> {
        let keys = self.keys.read().unwrap_or_else(|e| e.into_inner());
        keys.values()
            .find(|record| record.id == id)
            .map(|record| record.usage.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().unwrap_or_else(|e| e.into_inner()).is_empty()
    }
}

impl CredentialCheck for ApiKeyRegistry {
    fn authenticate(&self, raw_key: &str, now: DateTime<Utc>) -> Result<RequestContext, AuthError> {
        let raw_key = raw_key.trim();
        if raw_key.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let digest = self.hash_key(raw_key)?;
        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        let record = keys.get_mut(&digest).ok_or(AuthError::InvalidKey)?;

        if !record.active {
            return Err(AuthError::InvalidKey);
        }
        if record.expires_at.is_some_and(|expires_at| expires_at <= now) {
            return Err(AuthError::Expired);
        }

        record.usage.last_used_at = Some(now);
        record.usage.usage_count += 1;

        tracing::debug!("Authenticated key {} for tenant {}", record.id, record.tenant_id);

        Ok(RequestContext {
            tenant_id: record.tenant_id.clone(),
            key_id: record.id.clone(),
            permissions: record.permissions.clone(),
        })
    }
}
