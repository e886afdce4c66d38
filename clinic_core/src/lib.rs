//! Core library for the clinic enquiry desk.
//!
//! Records exported from the document store are schema-less JSON objects.
//! This crate resolves dotted field paths against them, evaluates typed
//! predicates, combines predicates into filter sets and runs the enquiry
//! list pipeline (search, simple filters, advanced filters, role gate,
//! ordering and pagination). It also carries the filter presets store and
//! the purchase pricing helpers used at the front desk.

pub mod catalog;
pub mod config;
pub mod preset;
pub mod purchase;
pub mod query;
pub mod record;

pub use catalog::{FieldCatalog, FieldDescriptor};
pub use config::{ConfigError, EngineConfig, RoleGate};
pub use record::{Record, RecordError, Timestamp, load_records, resolve};
