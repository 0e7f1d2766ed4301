//! The order store: validation and merge rules for `Order` under `ResourceActor`.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;
