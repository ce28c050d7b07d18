//! Shared building blocks for the workshop service.
//!
//! Every other crate depends on these: primary key and timestamp aliases,
//! the [`error::CoreError`] taxonomy that all layers translate into, field
//! validation, and pagination clamps.

pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
