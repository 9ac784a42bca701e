//! Data models
//!
//! Shared between the billing core and the presentation layer.
//! All monetary values are `f64` in currency units; arithmetic on them
//! happens in the core's money module, never on the raw fields.

pub mod bill;
pub mod cart;
pub mod product;
pub mod profile;

// Re-exports
pub use bill::*;
pub use cart::*;
pub use product::*;
pub use profile::*;
