//! Audit trail domain entities and invariants.

#![forbid(unsafe_code)]

mod descriptor;
mod event;
mod filters;
mod listing;
mod order;
mod pager;
mod security;

pub use descriptor::{
    AuditTrailCategoryDescriptor, AuditTrailEventCatalog, AuditTrailEventDescriptor,
    CategoryReference,
};
pub use event::AuditTrailEvent;
pub use filters::{
    AuditTrailFilterCriteria, AuditTrailFilters, BoundFilters, FilterError, FilterValidation,
};
pub use listing::AuditTrailListingQuery;
pub use order::AuditTrailOrderBy;
pub use pager::{Pager, PagerParameters, PagerSummary};
pub use security::Permission;
