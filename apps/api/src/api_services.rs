use std::sync::Arc;

use audittrail_application::{
    AuditTrailAdminService, AuditTrailManager, AuthorizationService,
    ShapeAuditTrailDisplayManager, SiteService, SiteSettings, build_event_catalog,
    default_event_providers,
};
use audittrail_core::AppError;
use audittrail_infrastructure::{
    PostgresAuditTrailEventRepository, PostgresAuthorizationRepository,
    StaticSiteSettingsRepository,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

const AUDIT_TRAIL_DETAIL_BASE_PATH: &str = "/api/admin/audit-trail";

pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}

pub async fn build_session_layer(
    pool: PgPool,
    cookie_secure: bool,
) -> Result<SessionManagerLayer<PostgresStore>, AppError> {
    let session_store = PostgresStore::new(pool)
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;

    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30))))
}

/// Wires the Postgres adapters into the audit trail services.
pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let catalog = Arc::new(build_event_catalog(&default_event_providers()));
    info!(
        categories = catalog.categories().len(),
        "audit trail event catalog built"
    );

    let audit_trail_manager = AuditTrailManager::new(
        Arc::new(PostgresAuditTrailEventRepository::new(pool.clone())),
        catalog.clone(),
    );
    let site_service = SiteService::new(Arc::new(StaticSiteSettingsRepository::new(
        SiteSettings {
            page_size: config.audit_trail_page_size,
            max_page_size: config.audit_trail_max_page_size,
        },
    )));
    let authorization_service =
        AuthorizationService::new(Arc::new(PostgresAuthorizationRepository::new(pool.clone())));
    let display_manager = Arc::new(ShapeAuditTrailDisplayManager::new(
        catalog,
        AUDIT_TRAIL_DETAIL_BASE_PATH,
    ));

    AppState {
        audit_trail_admin_service: AuditTrailAdminService::new(
            authorization_service,
            site_service,
            audit_trail_manager.clone(),
            display_manager,
        ),
        audit_trail_manager,
        postgres_pool: Some(pool),
        bootstrap_token: config.bootstrap_token.clone(),
        bootstrap_tenant_id: config.bootstrap_tenant_id,
    }
}
