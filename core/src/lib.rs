//! Core building blocks for declaring Salesforce-style models and rendering
//! SOQL against them.
//!
//! Most users should depend on the `soql` facade crate instead.

pub mod attribute;
pub mod error;
pub mod expr;
pub mod loader;
pub mod model;
pub mod path;
pub mod query;
pub mod registry;
pub mod schema;
pub mod soql;
pub mod tracing;

// Re-export key types and traits
pub use attribute::{AttributeKind, AttributeType};
pub use error::{Result, SoqlError};
pub use expr::{CmpOp, Comparison, Expr, Operand, and, not, or};
pub use model::{Instance, Slot};
pub use path::{Attr, Hop, Rel};
pub use query::{Direction, Join, NullsPosition, OrderBy, Query, Subquery, select};
pub use registry::{Registry, RegistryBuilder, SchemaRef};
pub use schema::{HasAttributes, ModelSchema, ModelSchemaBuilder};
pub use soql::{Soql, SoqlChunk, ToSoql, Token};

pub use soql_types::{ScalarKind, Value};

pub mod prelude {
    pub use crate::attribute::AttributeType;
    pub use crate::error::{Result, SoqlError};
    pub use crate::expr::{Expr, and, not, or};
    pub use crate::model::Instance;
    pub use crate::query::{Direction, OrderBy, Query, select};
    pub use crate::registry::{Registry, SchemaRef};
    pub use crate::schema::{HasAttributes, ModelSchema};
    pub use crate::soql::ToSoql;
    pub use soql_types::Value;
}
