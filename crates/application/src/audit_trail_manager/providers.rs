use audittrail_domain::AuditTrailCategoryDescriptor;

/// Source of event descriptors for one category.
pub trait AuditTrailEventProvider: Send + Sync {
    /// Describes the category and its events.
    fn describe(&self) -> AuditTrailCategoryDescriptor;
}

/// Describes content lifecycle events.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentAuditTrailEventProvider;

impl AuditTrailEventProvider for ContentAuditTrailEventProvider {
    fn describe(&self) -> AuditTrailCategoryDescriptor {
        AuditTrailCategoryDescriptor::new("content", "Content")
            .with_event("created", "Created", Some("A content item was created."))
            .with_event("updated", "Updated", Some("A content item was updated."))
            .with_event("published", "Published", Some("A content item was published."))
            .with_event(
                "unpublished",
                "Unpublished",
                Some("A content item was unpublished."),
            )
            .with_event("removed", "Removed", Some("A content item was deleted."))
            .with_event("cloned", "Cloned", Some("A content item was cloned."))
            .with_event(
                "restored",
                "Restored",
                Some("A content item was restored to a previous version."),
            )
    }
}

/// Describes user account and sign-in events.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAuditTrailEventProvider;

impl AuditTrailEventProvider for UserAuditTrailEventProvider {
    fn describe(&self) -> AuditTrailCategoryDescriptor {
        AuditTrailCategoryDescriptor::new("user", "User")
            .with_event("logged_in", "Logged in", Some("A user was successfully logged in."))
            .with_event_flags(
                "log_in_failed",
                "Login failed",
                Some("An attempt to log in failed due to incorrect credentials."),
                true,
                true,
            )
            .with_event("created", "Created", Some("A user was created."))
            .with_event("updated", "Updated", Some("A user was updated."))
            .with_event("deleted", "Deleted", Some("A user was deleted."))
            .with_event("enabled", "Enabled", Some("A user was enabled."))
            .with_event("disabled", "Disabled", Some("A user was disabled."))
            .with_event_flags(
                "password_reset",
                "Password reset",
                Some("A user successfully reset the password."),
                false,
                false,
            )
    }
}

/// Returns the providers registered by default.
#[must_use]
pub fn default_event_providers() -> Vec<Box<dyn AuditTrailEventProvider>> {
    vec![
        Box::new(ContentAuditTrailEventProvider),
        Box::new(UserAuditTrailEventProvider),
    ]
}
