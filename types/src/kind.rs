//! Scalar attribute kinds.
//!
//! Every non-relationship attribute of a model is one of these kinds. The kind
//! decides how payload values are coerced on load and which operand values a
//! filter comparison accepts.

/// Scalar kind of a model attribute.
///
/// # Examples
///
/// ```
/// use soql_types::ScalarKind;
///
/// assert_eq!(ScalarKind::Integer.as_str(), "integer");
/// assert_eq!(ScalarKind::DateTime.to_string(), "datetime");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScalarKind {
    /// Text, including ids, picklists and email fields.
    String,
    /// `true` / `false`.
    Boolean,
    /// 64-bit signed integer.
    Integer,
    /// Double precision floating point, also used for currency and percent fields.
    Float,
    /// Calendar date without a time component.
    Date,
    /// Instant in time, normalized to UTC.
    DateTime,
}

impl ScalarKind {
    /// Get the kind name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Date => "date",
            ScalarKind::DateTime => "datetime",
        }
    }
}

impl core::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ScalarKind::String.as_str(), "string");
        assert_eq!(ScalarKind::DateTime.to_string(), "datetime");
    }
}
