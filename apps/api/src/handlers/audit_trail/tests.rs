use std::sync::Arc;

use async_trait::async_trait;
use axum::Json;
use axum::body::Body;
use axum::extract::{Extension, FromRequestParts, Path, RawQuery, State};
use axum::http::{Request, StatusCode};
use serde_json::json;

use audittrail_application::{
    AuditTrailAdminService, AuditTrailManager, AuthorizationRepository, AuthorizationService,
    RecordAuditTrailEventInput, ShapeAuditTrailDisplayManager, SiteService, SiteSettings,
    build_event_catalog, default_event_providers,
};
use audittrail_core::{AppResult, TenantId, UserIdentity};
use audittrail_domain::Permission;
use audittrail_infrastructure::{InMemoryAuditTrailEventRepository, StaticSiteSettingsRepository};

use super::{audit_trail_detail_handler, audit_trail_index_handler};
use crate::state::AppState;

struct FakeAuthorizationRepository {
    permissions: Vec<Permission>,
}

#[async_trait]
impl AuthorizationRepository for FakeAuthorizationRepository {
    async fn list_permissions_for_subject(
        &self,
        _tenant_id: TenantId,
        _subject: &str,
    ) -> AppResult<Vec<Permission>> {
        Ok(self.permissions.clone())
    }
}

pub(crate) fn build_state(permissions: Vec<Permission>, tenant_id: TenantId) -> AppState {
    let catalog = Arc::new(build_event_catalog(&default_event_providers()));
    let audit_trail_manager = AuditTrailManager::new(
        Arc::new(InMemoryAuditTrailEventRepository::new()),
        catalog.clone(),
    );
    let audit_trail_admin_service = AuditTrailAdminService::new(
        AuthorizationService::new(Arc::new(FakeAuthorizationRepository { permissions })),
        SiteService::new(Arc::new(StaticSiteSettingsRepository::new(SiteSettings {
            page_size: 10,
            max_page_size: 100,
        }))),
        audit_trail_manager.clone(),
        Arc::new(ShapeAuditTrailDisplayManager::new(
            catalog,
            "/api/admin/audit-trail",
        )),
    );

    AppState {
        audit_trail_admin_service,
        audit_trail_manager,
        postgres_pool: None,
        bootstrap_token: "bootstrap".to_owned(),
        bootstrap_tenant_id: tenant_id,
    }
}

async fn record(state: &AppState, tenant_id: TenantId, name: &str) -> String {
    let recorded = state
        .audit_trail_manager
        .record_event(
            tenant_id,
            RecordAuditTrailEventInput {
                category: "content".to_owned(),
                name: name.to_owned(),
                correlation_id: Some("article-1".to_owned()),
                user_id: Some("alice".to_owned()),
                user_name: Some("alice".to_owned()),
                client_ip_address: None,
                data: json!({ "title": "Hello" }),
            },
        )
        .await;

    let Ok(Some(event)) = recorded else {
        panic!("content event should be recorded");
    };
    event.event_id
}

async fn raw_query_of(uri: &str) -> RawQuery {
    let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
        panic!("request should build");
    };
    let (mut parts, _) = request.into_parts();
    let Ok(raw_query) = RawQuery::from_request_parts(&mut parts, &()).await;
    raw_query
}

#[tokio::test]
async fn index_lists_recorded_events_for_viewers() {
    let tenant_id = TenantId::new();
    let state = build_state(vec![Permission::ViewAuditTrail], tenant_id);
    record(&state, tenant_id, "created").await;
    record(&state, tenant_id, "published").await;
    let user = UserIdentity::new("alice", "Alice", tenant_id);

    let result = audit_trail_index_handler(
        State(state),
        Extension(user),
        RawQuery(Some("category=content".to_owned())),
    )
    .await;

    let Ok(Json(view)) = result else {
        panic!("index should succeed for viewers");
    };
    assert_eq!(view.events.len(), 2);
    assert_eq!(view.order_by, "date_descending");
    assert_eq!(view.pager.total_item_count, 2);
    assert!(
        view.events
            .iter()
            .all(|summary| summary.event_descriptor.category.name == "content")
    );
}

#[tokio::test]
async fn index_without_permission_is_forbidden() {
    let tenant_id = TenantId::new();
    let state = build_state(Vec::new(), tenant_id);
    let user = UserIdentity::new("mallory", "Mallory", tenant_id);

    let result =
        audit_trail_index_handler(State(state), Extension(user), RawQuery(None)).await;

    let Err(error) = result else {
        panic!("index should be forbidden");
    };
    assert_eq!(error.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn blank_page_from_a_form_submission_is_ignored() {
    let tenant_id = TenantId::new();
    let state = build_state(vec![Permission::ViewAuditTrail], tenant_id);
    record(&state, tenant_id, "created").await;
    let user = UserIdentity::new("alice", "Alice", tenant_id);

    let raw_query = raw_query_of("/api/admin/audit-trail?page=&page_size=&category=content").await;
    let result = audit_trail_index_handler(State(state), Extension(user), raw_query).await;

    let Ok(Json(view)) = result else {
        panic!("blank paging values should not fail the request");
    };
    assert_eq!(view.events.len(), 1);
    assert_eq!(view.pager.page, 1);
    assert_eq!(view.pager.page_size, 10);
}

#[tokio::test]
async fn unknown_order_empties_the_listing_but_keeps_the_total() {
    let tenant_id = TenantId::new();
    let state = build_state(vec![Permission::ViewAuditTrail], tenant_id);
    record(&state, tenant_id, "created").await;
    record(&state, tenant_id, "updated").await;
    let user = UserIdentity::new("alice", "Alice", tenant_id);

    let raw_query = raw_query_of("/api/admin/audit-trail?order_by=sideways&page=abc").await;
    let result = audit_trail_index_handler(State(state), Extension(user), raw_query).await;

    let Ok(Json(view)) = result else {
        panic!("unknown order should not fail the request");
    };
    assert!(view.events.is_empty());
    assert_eq!(view.order_by, "date_descending");
    assert_eq!(view.pager.total_item_count, 2);
}

#[tokio::test]
async fn invalid_filters_empty_the_listing_but_keep_the_total() {
    let tenant_id = TenantId::new();
    let state = build_state(vec![Permission::ViewAuditTrail], tenant_id);
    record(&state, tenant_id, "created").await;
    let user = UserIdentity::new("alice", "Alice", tenant_id);

    let result = audit_trail_index_handler(
        State(state),
        Extension(user),
        RawQuery(Some("from=yesterday".to_owned())),
    )
    .await;

    let Ok(Json(view)) = result else {
        panic!("invalid filters should not fail the request");
    };
    assert!(view.events.is_empty());
    assert_eq!(view.pager.total_item_count, 1);
}

#[tokio::test]
async fn detail_returns_the_event_and_rejects_unknown_ids() {
    let tenant_id = TenantId::new();
    let state = build_state(vec![Permission::ViewAuditTrail], tenant_id);
    let event_id = record(&state, tenant_id, "removed").await;
    let user = UserIdentity::new("alice", "Alice", tenant_id);

    let found = audit_trail_detail_handler(
        State(state.clone()),
        Extension(user.clone()),
        Path(event_id.clone()),
    )
    .await;
    let Ok(Json(detail)) = found else {
        panic!("recorded event should be found");
    };
    assert_eq!(detail.event.event_id, event_id);
    assert_eq!(detail.descriptor.full_name, "content.removed");

    let missing =
        audit_trail_detail_handler(State(state), Extension(user), Path("missing".to_owned()))
            .await;
    let Err(error) = missing else {
        panic!("unknown event should not be found");
    };
    assert_eq!(error.status(), StatusCode::NOT_FOUND);
}
