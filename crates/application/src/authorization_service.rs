use std::sync::Arc;

use async_trait::async_trait;
use audittrail_core::{AppError, AppResult, TenantId, UserIdentity};
use audittrail_domain::Permission;
use tracing::warn;

/// Repository port for permission lookups.
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Lists effective permissions for a subject in a tenant.
    async fn list_permissions_for_subject(
        &self,
        tenant_id: TenantId,
        subject: &str,
    ) -> AppResult<Vec<Permission>>;
}

/// Application service for tenant-scoped authorization checks.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }

    /// Ensures the caller holds `permission` in its tenant.
    pub async fn require_permission(
        &self,
        actor: &UserIdentity,
        permission: Permission,
    ) -> AppResult<()> {
        if self.has_permission(actor, permission).await? {
            return Ok(());
        }

        warn!(
            subject = actor.subject(),
            tenant_id = %actor.tenant_id(),
            permission = permission.as_str(),
            "permission denied"
        );
        Err(AppError::Forbidden(format!(
            "subject '{}' is missing permission '{}' in tenant '{}'",
            actor.subject(),
            permission.as_str(),
            actor.tenant_id()
        )))
    }

    /// Returns whether the caller currently holds `permission`.
    pub async fn has_permission(
        &self,
        actor: &UserIdentity,
        permission: Permission,
    ) -> AppResult<bool> {
        let permissions = self
            .repository
            .list_permissions_for_subject(actor.tenant_id(), actor.subject())
            .await?;

        Ok(permissions.contains(&permission))
    }
}
