//! # cript-graph-error
//!
//! Unified error handling for cript-graph.
//!
//! - **ErrorKind**: what went wrong (e.g. `InvalidInput`, `InvalidConfiguration`)
//! - **Error context**: which operation failed and on which object
//! - **Error source**: wraps an underlying error without leaking its type
//!
//! ## Usage
//!
//! ```rust
//! use cript_graph_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidConfiguration, "color is not #RRGGBB")
//!         .with_operation("dot::encode")
//!         .with_context("node_type", "Material")
//!         .with_context("color", "#27549"))
//! }
//! ```
//!
//! Graph building and encoding are deterministic, so errors are never
//! retryable: the same input fails the same way.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the cript-graph Error
pub type Result<T> = std::result::Result<T, Error>;
