//! Application settings configuration
//!
//! Defines scan, SMTP, API and alert settings, loaded from TOML and
//! overridable from the environment.

use crate::checks::DEFAULT_ISSUER_SHORT_CN_THRESHOLD;
use crate::models::Permission;
use crate::utils::ConfigError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

/// Certificate scan settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Budget for TCP connect plus TLS handshake
    pub timeout_secs: u64,
    pub default_port: u16,
    /// Issuer CNs shorter than this get the issuer organization prefixed
    pub issuer_short_cn_threshold: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            default_port: 443,
            issuer_short_cn_threshold: DEFAULT_ISSUER_SHORT_CN_THRESHOLD,
        }
    }
}

impl ScanSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// SMTP delivery settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
    /// Use STARTTLS on non-465 ports
    pub secure: bool,
    pub timeout_secs: u64,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            user: None,
            password: None,
            from: None,
            secure: true,
            timeout_secs: 10,
        }
    }
}

impl SmtpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// An API key provisioned from configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySettings {
    pub id: String,
    pub tenant_id: String,
    /// Plain key; hashed on load and never kept
    pub key: String,
    #[serde(default = "Permission::all")]
    pub permissions: BTreeSet<Permission>,
    #[serde(default)]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// HTTP API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub bind: String,
    /// HMAC secret used to hash API keys
    pub api_key_secret: String,
    pub keys: Vec<ApiKeySettings>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            api_key_secret: String::new(),
            keys: Vec::new(),
        }
    }
}

/// Expiry alert thresholds in days
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    pub warning_days: i64,
    pub critical_days: i64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            warning_days: 30,
            critical_days: 7,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub smtp: SmtpSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub alerts: AlertSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Some(port) = lookup("SMTP_PORT") {
            self.smtp.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SMTP_PORT".to_string(),
                message: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(user) = lookup("SMTP_USER") {
            self.smtp.user = Some(user);
        }
        if let Some(password) = lookup("SMTP_PASSWORD") {
            self.smtp.password = Some(password);
        }
        if let Some(from) = lookup("SMTP_FROM") {
            self.smtp.from = Some(from);
        }
        if let Some(secure) = lookup("SMTP_SECURE") {
            self.smtp.secure = parse_bool("SMTP_SECURE", &secure)?;
        }
        if let Some(secret) = lookup("CERT_WARDEN_API_KEY_SECRET") {
            self.api.api_key_secret = secret;
        }
        if let Some(bind) = lookup("CERT_WARDEN_BIND") {
            self.api.bind = bind;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{}' is not a boolean", value),
        }),
    }
}
