use async_trait::async_trait;

use audittrail_application::{SiteSettings, SiteSettingsRepository};
use audittrail_core::{AppResult, TenantId};

/// Site settings fixed at startup and shared by every tenant.
#[derive(Debug, Clone, Copy)]
pub struct StaticSiteSettingsRepository {
    settings: SiteSettings,
}

impl StaticSiteSettingsRepository {
    /// Creates a repository serving `settings`.
    #[must_use]
    pub fn new(settings: SiteSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SiteSettingsRepository for StaticSiteSettingsRepository {
    async fn site_settings(&self, _tenant_id: TenantId) -> AppResult<SiteSettings> {
        Ok(self.settings)
    }
}
