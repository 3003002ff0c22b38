pub mod audit_trail;
pub mod health;
