use axum::Json;
use axum::extract::{Extension, Path, RawQuery, State};

use audittrail_application::IndexAuditTrailInput;
use audittrail_core::UserIdentity;
use audittrail_domain::AuditTrailListingQuery;

use crate::dto::{AuditTrailDetailResponse, AuditTrailViewResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Lists one page of the audit trail.
///
/// Paging, ordering and filters all come from the raw query string. Values
/// that do not parse empty the listing instead of rejecting the request.
pub async fn audit_trail_index_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    RawQuery(raw_query): RawQuery,
) -> ApiResult<Json<AuditTrailViewResponse>> {
    let query = AuditTrailListingQuery::from_query(raw_query.as_deref());
    let view = state
        .audit_trail_admin_service
        .index(&user, IndexAuditTrailInput::from(query))
        .await?;

    Ok(Json(AuditTrailViewResponse::from(view)))
}

/// Shows one audit trail event.
pub async fn audit_trail_detail_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(audit_trail_event_id): Path<String>,
) -> ApiResult<Json<AuditTrailDetailResponse>> {
    let detail = state
        .audit_trail_admin_service
        .detail(&user, audit_trail_event_id.as_str())
        .await?;

    Ok(Json(AuditTrailDetailResponse::from(detail)))
}

#[cfg(test)]
pub(crate) mod tests;
