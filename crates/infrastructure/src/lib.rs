//! Infrastructure adapters for audit trail application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_trail_event_repository;
mod postgres_audit_trail_event_repository;
mod postgres_authorization_repository;
mod static_site_settings_repository;

pub use in_memory_audit_trail_event_repository::InMemoryAuditTrailEventRepository;
pub use postgres_audit_trail_event_repository::PostgresAuditTrailEventRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use static_site_settings_repository::StaticSiteSettingsRepository;
