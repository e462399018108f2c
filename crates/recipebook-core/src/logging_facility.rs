//! Structured logging for recipebook
//!
//! - One initialisation point, `init(profile)`, called by the binary
//! - Operation macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   emitting the canonical field names from `recipebook_core_types::schema`
//! - An in-memory capture layer so tests can assert on emitted events
//!
//! ```rust
//! use recipebook_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
