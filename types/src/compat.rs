//! Operand compatibility between values and attribute kinds.

use crate::{ScalarKind, Value};

impl ScalarKind {
    /// Whether a non-null `value` may be compared against an attribute of
    /// this kind without conversion.
    ///
    /// Integers widen to `Float`; nothing else crosses kinds. `Null` is never
    /// accepted here, nullability is a property of the comparison operator.
    /// `NaN` and infinities have no literal form and are rejected.
    ///
    /// ```
    /// use soql_types::{ScalarKind, Value};
    ///
    /// assert!(ScalarKind::Float.accepts(&Value::from(3)));
    /// assert!(!ScalarKind::Integer.accepts(&Value::from(3.5)));
    /// assert!(!ScalarKind::Float.accepts(&Value::from(f64::NAN)));
    /// ```
    #[must_use]
    pub const fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ScalarKind::Float, Value::Float(f)) => f.is_finite(),
            _ => matches!(
                (self, value),
                (ScalarKind::String, Value::String(_))
                    | (ScalarKind::Boolean, Value::Boolean(_))
                    | (ScalarKind::Integer, Value::Integer(_))
                    | (ScalarKind::Float, Value::Integer(_))
                    | (ScalarKind::Date, Value::Date(_))
                    | (ScalarKind::DateTime, Value::DateTime(_))
            ),
        }
    }

    /// Whether a column of kind `other` can feed a comparison on this kind,
    /// as when a subquery supplies the operand list.
    #[must_use]
    pub const fn is_compatible(&self, other: ScalarKind) -> bool {
        matches!(
            (self, other),
            (ScalarKind::String, ScalarKind::String)
                | (ScalarKind::Boolean, ScalarKind::Boolean)
                | (ScalarKind::Integer, ScalarKind::Integer)
                | (ScalarKind::Float, ScalarKind::Integer | ScalarKind::Float)
                | (ScalarKind::Date, ScalarKind::Date)
                | (ScalarKind::DateTime, ScalarKind::DateTime)
        )
    }
}
