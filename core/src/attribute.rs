//! Attribute declarations and value coercion.
//!
//! An [`AttributeType`] maps one model field to its external name and decides
//! how values cross the boundary: `coerce_in` for payload JSON, `coerce` for
//! values supplied in code, `literal` for rendering into a statement and
//! `to_json` for writing a record back out.

use compact_str::CompactString;
use serde_json::Value as JsonValue;
use soql_types::temporal::{date_to_datetime, parse_date, parse_datetime};
use soql_types::{ScalarKind, Value, to_literal};

use crate::error::{Result, SoqlError};

/// What an attribute holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Scalar(ScalarKind),
    /// Reference to records of another model, resolved by model name.
    Relationship { target: CompactString, many: bool },
}

/// Declaration of a single model field.
///
/// ```
/// use soql_core::AttributeType;
///
/// let email = AttributeType::string("Email").nullable();
/// assert_eq!(email.external_name(), "Email");
/// assert!(email.is_nullable());
///
/// let contacts = AttributeType::many("Contacts", "User");
/// assert!(contacts.is_many());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeType {
    external_name: CompactString,
    nullable: bool,
    kind: AttributeKind,
}

impl AttributeType {
    // ==================== constructors ====================

    pub fn scalar(external_name: impl Into<CompactString>, kind: ScalarKind) -> Self {
        Self {
            external_name: external_name.into(),
            nullable: false,
            kind: AttributeKind::Scalar(kind),
        }
    }

    pub fn string(external_name: impl Into<CompactString>) -> Self {
        Self::scalar(external_name, ScalarKind::String)
    }

    pub fn integer(external_name: impl Into<CompactString>) -> Self {
        Self::scalar(external_name, ScalarKind::Integer)
    }

    pub fn float(external_name: impl Into<CompactString>) -> Self {
        Self::scalar(external_name, ScalarKind::Float)
    }

    pub fn boolean(external_name: impl Into<CompactString>) -> Self {
        Self::scalar(external_name, ScalarKind::Boolean)
    }

    pub fn date(external_name: impl Into<CompactString>) -> Self {
        Self::scalar(external_name, ScalarKind::Date)
    }

    pub fn datetime(external_name: impl Into<CompactString>) -> Self {
        Self::scalar(external_name, ScalarKind::DateTime)
    }

    /// Single-valued relationship to the model registered as `target`.
    pub fn relationship(
        external_name: impl Into<CompactString>,
        target: impl Into<CompactString>,
    ) -> Self {
        Self {
            external_name: external_name.into(),
            nullable: false,
            kind: AttributeKind::Relationship {
                target: target.into(),
                many: false,
            },
        }
    }

    /// One-to-many relationship to the model registered as `target`.
    pub fn many(external_name: impl Into<CompactString>, target: impl Into<CompactString>) -> Self {
        Self {
            external_name: external_name.into(),
            nullable: false,
            kind: AttributeKind::Relationship {
                target: target.into(),
                many: true,
            },
        }
    }

    /// Allow null values.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    // ==================== accessors ====================

    #[inline]
    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub const fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    /// The scalar kind, `None` for relationships.
    #[inline]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.kind {
            AttributeKind::Scalar(kind) => Some(kind),
            AttributeKind::Relationship { .. } => None,
        }
    }

    #[inline]
    pub const fn is_relationship(&self) -> bool {
        matches!(self.kind, AttributeKind::Relationship { .. })
    }

    #[inline]
    pub const fn is_many(&self) -> bool {
        matches!(self.kind, AttributeKind::Relationship { many: true, .. })
    }

    /// Model name a relationship points at.
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            AttributeKind::Relationship { target, .. } => Some(target),
            AttributeKind::Scalar(_) => None,
        }
    }

    fn expected(&self) -> &'static str {
        match self.kind {
            AttributeKind::Scalar(kind) => kind.as_str(),
            AttributeKind::Relationship { .. } => "relationship",
        }
    }

    // ==================== coercion ====================

    /// Convert a raw payload value for the field `schema.field`.
    pub fn coerce_in(&self, schema: &str, field: &str, raw: &JsonValue) -> Result<Value> {
        let value = match raw {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => match n.as_f64() {
                    Some(f) => Value::Float(f),
                    None => return Err(self.coercion_error(schema, field, raw)),
                },
            },
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                return Err(self.coercion_error(schema, field, raw));
            }
        };
        self.coerce(schema, field, value)
    }

    /// Convert an in-memory value to this attribute's kind.
    pub fn coerce(&self, schema: &str, field: &str, value: Value) -> Result<Value> {
        if value.is_null() {
            return if self.nullable {
                Ok(Value::Null)
            } else {
                Err(SoqlError::Nullability {
                    schema: schema.into(),
                    attribute: field.into(),
                })
            };
        }

        let AttributeKind::Scalar(kind) = self.kind else {
            return Err(self.coercion_error(schema, field, &value));
        };

        let coerced = match (kind, &value) {
            (ScalarKind::String, Value::String(_)) => Some(value.clone()),
            (ScalarKind::String, other) => Some(Value::String(other.to_string())),

            (ScalarKind::Integer, Value::Integer(_)) => Some(value.clone()),
            (ScalarKind::Integer, Value::Float(f)) => float_to_integer(*f).map(Value::Integer),
            (ScalarKind::Integer, Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_integer))
                    .map(Value::Integer)
            }

            (ScalarKind::Float, Value::Float(f)) => f.is_finite().then(|| value.clone()),
            (ScalarKind::Float, Value::Integer(i)) => Some(Value::Float(*i as f64)),
            (ScalarKind::Float, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float),

            (ScalarKind::Boolean, Value::Boolean(_)) => Some(value.clone()),
            (ScalarKind::Boolean, Value::String(s)) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(Value::Boolean(true))
                } else if s.eq_ignore_ascii_case("false") {
                    Some(Value::Boolean(false))
                } else {
                    None
                }
            }

            (ScalarKind::Date, Value::Date(_)) => Some(value.clone()),
            (ScalarKind::Date, Value::DateTime(dt)) => Some(Value::Date(dt.date_naive())),
            (ScalarKind::Date, Value::String(s)) => parse_date(s).map(Value::Date),

            (ScalarKind::DateTime, Value::DateTime(_)) => Some(value.clone()),
            (ScalarKind::DateTime, Value::Date(d)) => Some(Value::DateTime(date_to_datetime(*d))),
            (ScalarKind::DateTime, Value::String(s)) => parse_datetime(s).map(Value::DateTime),

            _ => None,
        };

        coerced.ok_or_else(|| self.coercion_error(schema, field, &value))
    }

    /// Render `value` as a literal for this attribute.
    ///
    /// The value must already be of a compatible kind; nothing is converted.
    pub fn literal(&self, schema: &str, field: &str, value: &Value) -> Result<String> {
        if value.is_null() {
            if self.nullable {
                return Ok(to_literal(value));
            }
            return Err(SoqlError::Nullability {
                schema: schema.into(),
                attribute: field.into(),
            });
        }

        match self.kind {
            AttributeKind::Scalar(kind) if kind.accepts(value) => Ok(to_literal(value)),
            _ => Err(SoqlError::TypeMismatch {
                schema: schema.into(),
                attribute: field.into(),
                operator: "literal",
                value: value.to_string(),
            }),
        }
    }

    /// Payload representation of a coerced value, the inverse of
    /// [`coerce_in`](Self::coerce_in).
    pub fn to_json(&self, value: &Value) -> JsonValue {
        match value {
            Value::Null => JsonValue::Null,
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Integer(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Date(_) | Value::DateTime(_) => JsonValue::String(value.to_string()),
        }
    }

    fn coercion_error(
        &self,
        schema: &str,
        field: &str,
        value: &impl core::fmt::Display,
    ) -> SoqlError {
        SoqlError::TypeCoercion {
            schema: schema.into(),
            attribute: field.into(),
            expected: self.expected().into(),
            value: value.to_string(),
        }
    }
}

/// 2^63; `i64::MAX as f64` rounds up to it.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn float_to_integer(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}
