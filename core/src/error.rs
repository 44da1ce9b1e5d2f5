use compact_str::CompactString;
use thiserror::Error;

/// Every way building, rendering or loading a query can fail.
///
/// Variants carry the schema and attribute names involved plus the offending
/// value or payload shape, rendered for display.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoqlError {
    /// A payload or construction value could not be converted to the attribute's kind
    #[error("cannot coerce {value} into {expected} for {schema}.{attribute}")]
    TypeCoercion {
        schema: CompactString,
        attribute: CompactString,
        expected: CompactString,
        value: String,
    },

    /// Null supplied for a non-nullable attribute
    #[error("{schema}.{attribute} is not nullable")]
    Nullability {
        schema: CompactString,
        attribute: CompactString,
    },

    /// No attribute with this field name on the schema
    #[error("{schema} has no attribute {attribute}")]
    UnknownAttribute {
        schema: CompactString,
        attribute: CompactString,
    },

    /// Column reference is not usable where it was given
    #[error("invalid column {schema}.{attribute}: {reason}")]
    InvalidColumn {
        schema: CompactString,
        attribute: CompactString,
        reason: &'static str,
    },

    /// Operand does not fit the attribute kind or operator
    #[error("type mismatch on {schema}.{attribute}: {operator} does not accept {value}")]
    TypeMismatch {
        schema: CompactString,
        attribute: CompactString,
        operator: &'static str,
        value: String,
    },

    /// Negative LIMIT
    #[error("invalid limit {0}")]
    InvalidLimit(i64),

    /// Negative OFFSET
    #[error("invalid offset {0}")]
    InvalidOffset(i64),

    /// Payload shape disagrees with the query or schema
    #[error("schema mismatch for {schema}.{attribute}: {reason}")]
    SchemaMismatch {
        schema: CompactString,
        attribute: CompactString,
        reason: String,
    },

    /// Field was never loaded or assigned
    #[error("{schema}.{attribute} is unset")]
    UnsetField {
        schema: CompactString,
        attribute: CompactString,
    },

    /// Query cannot be used as a subquery operand
    #[error("query over {schema} is not a valid subquery: {reason}")]
    InvalidSubquery {
        schema: CompactString,
        reason: &'static str,
    },

    /// Malformed logical expression
    #[error("invalid expression: {0}")]
    InvalidExpression(&'static str),

    /// Join path or joined query is not usable
    #[error("invalid join {schema}.{attribute}: {reason}")]
    InvalidJoin {
        schema: CompactString,
        attribute: CompactString,
        reason: &'static str,
    },

    /// Operation not supported for this query
    #[error("invalid query over {schema}: {reason}")]
    InvalidQuery {
        schema: CompactString,
        reason: &'static str,
    },

    /// No schema registered under this name
    #[error("unknown model {0}")]
    UnknownModel(CompactString),

    #[error("model {0} registered twice")]
    DuplicateModel(CompactString),

    #[error("{schema} declares attribute {attribute} twice")]
    DuplicateAttribute {
        schema: CompactString,
        attribute: CompactString,
    },

    #[error("{schema} maps external name {external_name} twice")]
    DuplicateExternalName {
        schema: CompactString,
        external_name: CompactString,
    },

    /// Relationship points at a model missing from the registry
    #[error("{schema}.{attribute} targets unregistered model {target}")]
    UnresolvedRelationship {
        schema: CompactString,
        attribute: CompactString,
        target: CompactString,
    },
}

/// Result type for soql operations
pub type Result<T> = std::result::Result<T, SoqlError>;
