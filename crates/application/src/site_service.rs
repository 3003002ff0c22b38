use std::sync::Arc;

use audittrail_core::{AppError, AppResult, TenantId};

use crate::{SiteSettings, SiteSettingsRepository};

/// Application service reading site-wide settings.
#[derive(Clone)]
pub struct SiteService {
    repository: Arc<dyn SiteSettingsRepository>,
}

impl SiteService {
    /// Creates a new site service.
    #[must_use]
    pub fn new(repository: Arc<dyn SiteSettingsRepository>) -> Self {
        Self { repository }
    }

    /// Returns validated settings for a tenant.
    pub async fn site_settings(&self, tenant_id: TenantId) -> AppResult<SiteSettings> {
        let settings = self.repository.site_settings(tenant_id).await?;
        if settings.page_size == 0 {
            return Err(AppError::Internal(format!(
                "site settings for tenant '{tenant_id}' have a zero page size"
            )));
        }

        Ok(settings)
    }
}
