use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::AuditTrailEvent;
use crate::event::full_name;

/// Category identity carried by each event descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReference {
    /// Stable category name.
    pub name: String,
    /// Human readable category name.
    pub localized_name: String,
}

/// Static metadata describing how one event type is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrailEventDescriptor {
    /// Event name inside its category.
    pub name: String,
    /// Catalog key, `{category}.{name}`.
    pub full_name: String,
    /// Human readable event name.
    pub localized_name: String,
    /// Optional longer explanation.
    pub description: Option<String>,
    /// Category the event belongs to.
    pub category: CategoryReference,
    /// Whether the event is recorded without explicit opt-in.
    pub is_enabled_by_default: bool,
    /// Whether the event is recorded regardless of settings.
    pub is_mandatory: bool,
}

impl AuditTrailEventDescriptor {
    /// Describes an event whose type is missing from the catalog.
    ///
    /// Names are taken verbatim from the event so the listing can still show
    /// something meaningful.
    #[must_use]
    pub fn default_for(event: &AuditTrailEvent) -> Self {
        Self {
            name: event.name.clone(),
            full_name: event.full_name(),
            localized_name: event.name.clone(),
            description: None,
            category: CategoryReference {
                name: event.category.clone(),
                localized_name: event.category.clone(),
            },
            is_enabled_by_default: true,
            is_mandatory: false,
        }
    }
}

/// A named group of event descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrailCategoryDescriptor {
    /// Stable category name.
    pub name: String,
    /// Human readable category name.
    pub localized_name: String,
    /// Events described in this category.
    pub events: Vec<AuditTrailEventDescriptor>,
}

impl AuditTrailCategoryDescriptor {
    /// Creates an empty category.
    #[must_use]
    pub fn new(name: impl Into<String>, localized_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            localized_name: localized_name.into(),
            events: Vec::new(),
        }
    }

    /// Adds an event that is enabled by default and optional.
    #[must_use]
    pub fn with_event(
        self,
        name: &str,
        localized_name: &str,
        description: Option<&str>,
    ) -> Self {
        self.with_event_flags(name, localized_name, description, true, false)
    }

    /// Adds an event with explicit recording flags.
    #[must_use]
    pub fn with_event_flags(
        mut self,
        name: &str,
        localized_name: &str,
        description: Option<&str>,
        is_enabled_by_default: bool,
        is_mandatory: bool,
    ) -> Self {
        let descriptor = AuditTrailEventDescriptor {
            name: name.to_owned(),
            full_name: full_name(self.name.as_str(), name),
            localized_name: localized_name.to_owned(),
            description: description.map(str::to_owned),
            category: self.reference(),
            is_enabled_by_default,
            is_mandatory,
        };
        self.events.push(descriptor);
        self
    }

    fn reference(&self) -> CategoryReference {
        CategoryReference {
            name: self.name.clone(),
            localized_name: self.localized_name.clone(),
        }
    }
}

/// All categories known to the audit trail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTrailEventCatalog {
    categories: Vec<AuditTrailCategoryDescriptor>,
    full_names: HashSet<String>,
}

impl AuditTrailEventCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category and returns the full names dropped as duplicates.
    ///
    /// The first registration of a full name wins. Registering a category
    /// name twice merges the events into the existing category.
    pub fn register(&mut self, mut category: AuditTrailCategoryDescriptor) -> Vec<String> {
        let mut dropped = Vec::new();
        category.events.retain(|event| {
            let is_new = self.full_names.insert(event.full_name.clone());
            if !is_new {
                dropped.push(event.full_name.clone());
            }
            is_new
        });

        match self
            .categories
            .iter_mut()
            .find(|existing| existing.name == category.name)
        {
            Some(existing) => {
                let reference = existing.reference();
                existing
                    .events
                    .extend(category.events.into_iter().map(|mut event| {
                        event.category = reference.clone();
                        event
                    }));
            }
            None => self.categories.push(category),
        }

        dropped
    }

    /// Returns every category with its events.
    #[must_use]
    pub fn categories(&self) -> &[AuditTrailCategoryDescriptor] {
        self.categories.as_slice()
    }

    /// Finds the descriptor registered for a full name.
    #[must_use]
    pub fn find(&self, full_name: &str) -> Option<&AuditTrailEventDescriptor> {
        self.categories
            .iter()
            .flat_map(|category| category.events.iter())
            .find(|event| event.full_name == full_name)
    }

    /// Describes an event, falling back to the default descriptor.
    #[must_use]
    pub fn describe(&self, event: &AuditTrailEvent) -> AuditTrailEventDescriptor {
        self.find(event.full_name().as_str())
            .cloned()
            .unwrap_or_else(|| AuditTrailEventDescriptor::default_for(event))
    }
}
