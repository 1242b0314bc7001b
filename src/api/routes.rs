//! Route handlers

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::config::SmtpSettings;
use crate::models::alert;
use crate::models::{Permission, RequestContext, ScanRequest};
use crate::notify::{
    render_html, EmailMessage, Notifier, SmtpNotifier, TEST_EMAIL_BODY, TEST_EMAIL_SUBJECT,
};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const SERVICE_NAME: &str = "certificate-scanner";

fn require(ctx: &RequestContext, permission: Permission) -> Result<(), ApiError> {
    if ctx.allows(permission) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "key {} lacks {:?}",
            ctx.key_id, permission
        )))
    }
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /health",
            "POST /scan-certificate",
            "POST /send-email",
            "GET /api/v1/certificates",
            "GET /api/v1/certificates/:fingerprint",
            "POST /api/v1/scans",
            "GET /api/v1/alerts",
        ],
    }))
}

/// `POST /scan-certificate`
pub async fn scan_certificate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<Value>, ApiError> {
    let fact = state.scanner.scan(&request).await?;
    Ok(Json(json!({
        "success": true,
        "certificate": fact,
    })))
}

/// SMTP parameters supplied with a send request
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfigBody {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub secure: Option<bool>,
}

impl SmtpConfigBody {
    fn into_settings(self, defaults: &SmtpSettings) -> SmtpSettings {
        SmtpSettings {
            host: self.host,
            port: self.port.unwrap_or(defaults.port),
            user: self.user,
            password: self.password,
            from: self.from,
            secure: self.secure.unwrap_or(defaults.secure),
            timeout_secs: defaults.timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub smtp_config: Option<SmtpConfigBody>,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// `POST /send-email`
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.to.trim().is_empty() {
        return Err(ApiError::BadRequest("Recipient parameter is missing".to_string()));
    }

    let notifier: Arc<dyn Notifier> = match request.smtp_config {
        Some(config) => Arc::new(SmtpNotifier::new(
            config.into_settings(&state.settings.smtp),
        )),
        None => state.notifier.clone(),
    };

    let subject = request
        .subject
        .unwrap_or_else(|| TEST_EMAIL_SUBJECT.to_string());
    let body = request.body.unwrap_or_else(|| TEST_EMAIL_BODY.to_string());
    let html = render_html(&subject, &body, Some(&notifier.destination()))?;

    let message = EmailMessage::new(request.to.trim(), subject, body).with_html(html);
    notifier.send(&message).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("E-mail sent to {}", message.to),
    })))
}

/// `GET /api/v1/certificates`
pub async fn list_certificates(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Value>, ApiError> {
    require(&ctx, Permission::ReadCertificates)?;
    let certificates = state.store.list_certificates(&ctx.tenant_id)?;
    Ok(Json(json!({
        "success": true,
        "total": certificates.len(),
        "certificates": certificates,
    })))
}

/// `GET /api/v1/certificates/:fingerprint`
pub async fn get_certificate(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(fingerprint): Path<String>,
) -> Result<Json<Value>, ApiError> {
    require(&ctx, Permission::ReadCertificates)?;
    let certificate = state
        .store
        .get_certificate(&ctx.tenant_id, &fingerprint.to_ascii_lowercase())?;
    Ok(Json(json!({
        "success": true,
        "certificate": certificate,
    })))
}

/// `POST /api/v1/scans`: scan, persist the fact and any alerts for the tenant
pub async fn create_scan(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<Value>, ApiError> {
    require(&ctx, Permission::Scan)?;

    let fact = state.scanner.scan(&request).await?;
    state.store.save_certificate(&ctx.tenant_id, &fact)?;

    let alerts = alert::evaluate(
        &ctx.tenant_id,
        &fact,
        &state.settings.alerts,
        chrono::Utc::now(),
    );
    for record in &alerts {
        state.store.save_alert(record)?;
    }

    tracing::info!(
        "Tenant {} stored {} with {} alert(s)",
        ctx.tenant_id,
        fact.fingerprint,
        alerts.len()
    );

    Ok(Json(json!({
        "success": true,
        "certificate": fact,
        "alerts": alerts,
    })))
}

/// `GET /api/v1/alerts`
pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Value>, ApiError> {
    require(&ctx, Permission::ReadAlerts)?;
    let alerts = state.store.list_alerts(&ctx.tenant_id)?;
    Ok(Json(json!({
        "success": true,
        "total": alerts.len(),
        "alerts": alerts,
    })))
}
