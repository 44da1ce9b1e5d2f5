use super::Query;
use crate::error::{Result, SoqlError};
use crate::path::Attr;
use crate::schema::HasAttributes;
use crate::soql::{Soql, ToSoql};

/// A single-column query usable as an `IN` / `NOT IN` operand.
///
/// Renders parenthesized on its own: `(SELECT Parent.Name FROM Parent)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    column: Attr,
    query: Box<Query>,
}

impl Subquery {
    pub(crate) fn new(query: Query) -> Result<Self> {
        let error = |reason| SoqlError::InvalidSubquery {
            schema: query.root().name().into(),
            reason,
        };

        if !query.joins().is_empty() {
            return Err(error("subqueries cannot join"));
        }
        if !query.order_by_items().is_empty() {
            return Err(error("subqueries cannot be ordered"));
        }
        if query.limit_value().is_some() {
            return Err(error("subqueries cannot be limited"));
        }
        if query.offset_value().is_some() {
            return Err(error("subqueries cannot be offset"));
        }
        if query.is_count() {
            return Err(error("subqueries cannot count"));
        }

        let column = {
            let mut columns = query.selected_columns();
            let (Some((field, _)), None) = (columns.next(), columns.next()) else {
                return Err(error("subqueries select exactly one column"));
            };
            query.root().attr(field)?
        };

        Ok(Self {
            column,
            query: Box::new(query),
        })
    }

    /// The selected column.
    #[inline]
    pub fn column(&self) -> &Attr {
        &self.column
    }

    #[inline]
    pub fn query(&self) -> &Query {
        &self.query
    }
}

impl ToSoql for Subquery {
    fn to_fragment(&self) -> Soql<'_> {
        self.query.to_fragment().parens()
    }
}

impl core::fmt::Display for Subquery {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_fragment().write_to(f)
    }
}
