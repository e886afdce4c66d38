//! Query engine for the enquiry list
//!
//! This module provides the filtering pipeline used by the list view:
//! - Typed predicates and their evaluation against records
//! - Predicate sets combined through AND/OR buckets
//! - The staged filter engine, ordering and pagination
//! - The filter builder draft and the immutable filter state

mod builder;
mod engine;
mod filter;
mod order;
mod predicate_set;
mod query_errors;
mod state;

pub use builder::*;
pub use engine::*;
pub use filter::*;
pub use order::*;
pub use predicate_set::*;
pub use query_errors::*;
pub use state::*;
