//! Core types shared across the recipebook crates
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Identity**: UserId, the opaque owner reference handed in by the caller
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, TraceId, UserId};
pub use sensitive::Sensitive;
