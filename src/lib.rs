//! # soql
//!
//! Declarative models for Salesforce objects, a SOQL query builder with
//! relationship joins and nested sub-selects, and loading of query responses
//! back into model instances.
//!
//! ## Quick Start
//!
//! ```rust
//! use soql::prelude::*;
//!
//! # fn main() -> soql::Result<()> {
//! let registry = Registry::builder()
//!     .model(
//!         ModelSchema::new("Account")
//!             .attribute("id", AttributeType::string("Id"))
//!             .attribute("contacts", AttributeType::many("Contacts", "User")),
//!     )
//!     .model(
//!         ModelSchema::new("User")
//!             .attribute("id", AttributeType::string("Id"))
//!             .attribute("email", AttributeType::string("Email")),
//!     )
//!     .build()?;
//!
//! let user = registry.schema("User")?;
//! let query = select(&user).r#where(user.attr("id")?.eq("123")?)?;
//! assert_eq!(
//!     query.to_soql(),
//!     "SELECT User.Id, User.Email FROM User WHERE User.Id = '123'"
//! );
//!
//! let account = registry.schema("Account")?;
//! let query = select(&account).join(&account.rel("contacts")?)?;
//! assert_eq!(
//!     query.to_soql(),
//!     "SELECT Account.Id, (SELECT User.Id, User.Email FROM Account.Contacts) FROM Account"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature   | Effect                                                        |
//! |-----------|---------------------------------------------------------------|
//! | `serde`   | `Serialize`/`Deserialize` for the query vocabulary enums      |
//! | `tracing` | `debug` events for every rendered query and loaded batch      |

#![cfg_attr(docsrs, feature(doc_cfg))]

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for soql operations
pub use soql_core::error::Result;

/// Start a query over every column of a model.
pub use soql_core::select;

/// Error types
pub mod error {
    pub use soql_core::error::SoqlError;
}

/// Scalar values, kinds and literal rendering.
pub use soql_types as types;

// =============================================================================
// Core module - shared functionality
// =============================================================================

/// Core types and traits.
///
/// # Module Structure
///
/// - **Schemas**: `AttributeType`, `ModelSchema`, `Registry`, `SchemaRef`
/// - **Paths**: `Attr` and `Rel`, resolved attribute and relationship paths
/// - **Queries**: `Query`, `Join`, `OrderBy`, `Subquery`
/// - **Rendering**: `Soql`, `SoqlChunk`, `Token`, `ToSoql`
pub mod core {
    pub use soql_core::attribute::{AttributeKind, AttributeType};
    pub use soql_core::model::{Instance, Slot};
    pub use soql_core::path::{Attr, Hop, Rel};
    pub use soql_core::query::{Direction, Join, NullsPosition, OrderBy, Query, Subquery};
    pub use soql_core::registry::{Registry, RegistryBuilder, SchemaRef};
    pub use soql_core::schema::{HasAttributes, ModelSchema, ModelSchemaBuilder};
    pub use soql_core::soql::{Soql, SoqlChunk, ToSoql, Token};

    /// Filter expressions: comparisons and the `and` / `or` / `not` combinators.
    pub use soql_core::expr;

    /// Response loading constants.
    pub use soql_core::loader;
}

pub mod prelude {
    pub use soql_core::prelude::*;
    pub use soql_types::ScalarKind;
}
