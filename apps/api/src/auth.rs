use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode};
use audittrail_application::RecordAuditTrailEventInput;
use audittrail_core::{AppError, UserIdentity};
use serde_json::json;
use tower_sessions::Session;
use tracing::info;

use crate::dto::{BootstrapRequest, UserIdentityResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub const SESSION_USER_KEY: &str = "user_identity";

/// Signs a subject in with the shared bootstrap token.
///
/// Both outcomes are written to the audit trail of the bootstrap tenant.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    let subject = payload.subject.trim().to_owned();
    if subject.is_empty() {
        return Err(AppError::Validation("subject must not be empty".to_owned()).into());
    }

    let tenant_id = state.bootstrap_tenant_id;
    let client_ip_address = client_ip_address(&headers);

    if payload.token != state.bootstrap_token {
        state
            .audit_trail_manager
            .record_event(
                tenant_id,
                login_event("log_in_failed", subject.as_str(), client_ip_address),
            )
            .await?;
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let display_name = payload
        .display_name
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| subject.clone());
    let identity = UserIdentity::new(subject.clone(), display_name, tenant_id);

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;
    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    state
        .audit_trail_manager
        .record_event(
            tenant_id,
            login_event("logged_in", subject.as_str(), client_ip_address),
        )
        .await?;
    info!(subject = subject.as_str(), %tenant_id, "bootstrap sign-in");

    Ok(StatusCode::NO_CONTENT)
}

/// Ends the current session.
pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the signed-in identity.
pub async fn me_handler(Extension(user): Extension<UserIdentity>) -> Json<UserIdentityResponse> {
    Json(UserIdentityResponse::from(&user))
}

fn login_event(
    name: &str,
    subject: &str,
    client_ip_address: Option<String>,
) -> RecordAuditTrailEventInput {
    RecordAuditTrailEventInput {
        category: "user".to_owned(),
        name: name.to_owned(),
        correlation_id: Some(subject.to_owned()),
        user_id: Some(subject.to_owned()),
        user_name: Some(subject.to_owned()),
        client_ip_address,
        data: json!({ "method": "bootstrap" }),
    }
}

fn client_ip_address(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
