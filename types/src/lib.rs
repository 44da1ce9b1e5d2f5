//! Shared value types for soql
//!
//! This crate holds the leaf vocabulary every other soql crate builds on:
//!
//! - [`ScalarKind`] - the scalar kind of a model attribute
//! - [`Value`] - an in-memory scalar value
//! - the SOQL literal grammar in the [`literal`] module
//! - payload date/datetime parsing in the [`temporal`] module
//!
//! # Features
//!
//! - `serde` - Enable serde serialization/deserialization of [`ScalarKind`]

mod compat;
mod kind;
pub mod literal;
pub mod temporal;
mod value;

pub use kind::ScalarKind;
pub use literal::{to_literal, write_literal};
pub use value::Value;

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{ScalarKind, Value};
}
