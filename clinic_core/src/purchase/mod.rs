//! Purchase entry helpers: line pricing and serial number capture

mod pricing;
mod serials;

pub use pricing::*;
pub use serials::*;
