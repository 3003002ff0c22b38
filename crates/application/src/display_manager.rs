use std::sync::Arc;

use async_trait::async_trait;
use audittrail_core::{AppError, AppResult};
use audittrail_domain::{
    AuditTrailEvent, AuditTrailEventCatalog, AuditTrailFilters, FilterValidation,
};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Named display mode a shape is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    /// Compact rendering used in admin listings.
    SummaryAdmin,
    /// Full rendering used on the event page.
    Detail,
}

impl DisplayType {
    /// Returns the stable display type name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SummaryAdmin => "SummaryAdmin",
            Self::Detail => "Detail",
        }
    }
}

/// Renderable fragment handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    /// Shape type, e.g. `AuditTrailEvent`.
    pub shape_type: String,
    /// Display mode, when the shape depends on one.
    pub display_type: Option<String>,
    /// Template names to try, most specific last.
    pub alternates: Vec<String>,
    /// Values exposed to the template.
    pub properties: Map<String, Value>,
}

impl Shape {
    /// Creates an empty shape of `shape_type`.
    #[must_use]
    pub fn new(shape_type: impl Into<String>) -> Self {
        Self {
            shape_type: shape_type.into(),
            display_type: None,
            alternates: Vec::new(),
            properties: Map::new(),
        }
    }

    /// Sets the display type and adds its alternate.
    #[must_use]
    pub fn with_display_type(mut self, display_type: DisplayType) -> Self {
        self.alternates
            .push(format!("{}_{}", self.shape_type, display_type.as_str()));
        self.display_type = Some(display_type.as_str().to_owned());
        self
    }

    /// Adds a template alternate.
    #[must_use]
    pub fn with_alternate(mut self, alternate: impl Into<String>) -> Self {
        self.alternates.push(alternate.into());
        self
    }

    /// Sets one template property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: Value) -> Self {
        self.properties.insert(key.to_owned(), value);
        self
    }

    /// Returns a template property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Builds display shapes for audit trail events and filters.
#[async_trait]
pub trait AuditTrailDisplayManager: Send + Sync {
    /// Builds the shape rendering one event.
    async fn build_display_event(
        &self,
        event: &AuditTrailEvent,
        display_type: DisplayType,
    ) -> AppResult<Shape>;

    /// Builds the shape listing actions available for one event.
    async fn build_display_actions(
        &self,
        event: &AuditTrailEvent,
        display_type: DisplayType,
    ) -> AppResult<Shape>;

    /// Builds the shape rendering the filter form.
    async fn build_display_filters(
        &self,
        filters: &AuditTrailFilters,
        validation: &FilterValidation,
    ) -> AppResult<Shape>;
}

/// Display manager producing shapes from the event catalog.
#[derive(Clone)]
pub struct ShapeAuditTrailDisplayManager {
    catalog: Arc<AuditTrailEventCatalog>,
    detail_base_path: String,
}

impl ShapeAuditTrailDisplayManager {
    /// Creates a display manager linking detail actions under `detail_base_path`.
    #[must_use]
    pub fn new(catalog: Arc<AuditTrailEventCatalog>, detail_base_path: impl Into<String>) -> Self {
        Self {
            catalog,
            detail_base_path: detail_base_path.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl AuditTrailDisplayManager for ShapeAuditTrailDisplayManager {
    async fn build_display_event(
        &self,
        event: &AuditTrailEvent,
        display_type: DisplayType,
    ) -> AppResult<Shape> {
        let descriptor = self.catalog.describe(event);
        let shape = with_event_alternates(Shape::new("AuditTrailEvent"), event, display_type)
            .with_property("event_id", json!(event.event_id))
            .with_property("category", json!(descriptor.category.localized_name))
            .with_property("name", json!(descriptor.localized_name))
            .with_property("description", json!(descriptor.description))
            .with_property("user_name", json!(event.user_name))
            .with_property("correlation_id", json!(event.correlation_id))
            .with_property("created_at", json!(event.created_at.to_rfc3339()));

        Ok(match display_type {
            DisplayType::SummaryAdmin => shape,
            DisplayType::Detail => shape
                .with_property("user_id", json!(event.user_id))
                .with_property("client_ip_address", json!(event.client_ip_address))
                .with_property("data", event.data.clone()),
        })
    }

    async fn build_display_actions(
        &self,
        event: &AuditTrailEvent,
        display_type: DisplayType,
    ) -> AppResult<Shape> {
        let actions = json!([{
            "name": "detail",
            "label": "Details",
            "href": format!("{}/{}", self.detail_base_path, event.event_id),
        }]);

        Ok(
            with_event_alternates(Shape::new("AuditTrailEventActions"), event, display_type)
                .with_property("event_id", json!(event.event_id))
                .with_property("actions", actions),
        )
    }

    async fn build_display_filters(
        &self,
        filters: &AuditTrailFilters,
        validation: &FilterValidation,
    ) -> AppResult<Shape> {
        let mut values = Map::new();
        for (key, value) in filters.iter() {
            let entry = values
                .entry(key.to_owned())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = entry {
                items.push(json!(value));
            }
        }

        let categories: Vec<Value> = self
            .catalog
            .categories()
            .iter()
            .map(|category| {
                json!({
                    "name": category.name,
                    "localized_name": category.localized_name,
                    "events": category
                        .events
                        .iter()
                        .map(|event| {
                            json!({ "name": event.name, "localized_name": event.localized_name })
                        })
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        let errors = serde_json::to_value(validation.errors()).map_err(|error| {
            AppError::Internal(format!("failed to serialize filter errors: {error}"))
        })?;

        Ok(Shape::new("AuditTrailFilters")
            .with_property("values", Value::Object(values))
            .with_property("categories", Value::Array(categories))
            .with_property("errors", errors))
    }
}

fn with_event_alternates(
    shape: Shape,
    event: &AuditTrailEvent,
    display_type: DisplayType,
) -> Shape {
    let base = format!("{}_{}", shape.shape_type, display_type.as_str());
    let by_category = format!("{base}__{}", event.category);
    let by_event = format!("{by_category}__{}", event.name);

    shape
        .with_display_type(display_type)
        .with_alternate(by_category)
        .with_alternate(by_event)
}
