//! Joined sub-queries.

use compact_str::CompactString;

use super::Query;
use crate::attribute::AttributeType;
use crate::error::{Result, SoqlError};
use crate::registry::SchemaRef;
use crate::schema::HasAttributes;

/// A relationship of the parent query's schema together with the query that
/// selects the related records.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    field: CompactString,
    attribute: AttributeType,
    query: Query,
}

impl Join {
    /// Default join over `field`: every scalar column of the related schema.
    pub(crate) fn new(parent: &SchemaRef, field: &str) -> Result<Self> {
        let target = parent.related(field)?;
        let attribute = parent.attribute(field)?.clone();
        Ok(Self {
            field: field.into(),
            attribute,
            query: Query::new(&target),
        })
    }

    /// Field name on the parent schema.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The relationship attribute being joined.
    #[inline]
    pub fn attribute(&self) -> &AttributeType {
        &self.attribute
    }

    #[inline]
    pub fn external_name(&self) -> &str {
        self.attribute.external_name()
    }

    #[inline]
    pub const fn is_many(&self) -> bool {
        self.attribute.is_many()
    }

    /// The sub-query, rooted at the related schema.
    #[inline]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Swap in an explicit sub-query.
    ///
    /// Joins already made under this relationship carry over unless `query`
    /// joins the same relationship itself.
    pub(crate) fn replace(&mut self, parent: &SchemaRef, mut query: Query) -> Result<()> {
        let error = |reason| SoqlError::InvalidJoin {
            schema: parent.name().into(),
            attribute: self.field.clone(),
            reason,
        };

        if query.root() != self.query.root() {
            return Err(error("joined query must select from the related schema"));
        }
        if query.is_count() {
            return Err(error("joined query cannot be a count"));
        }
        if !self.is_many()
            && (query.filter().is_some()
                || !query.order_by_items().is_empty()
                || query.limit_value().is_some()
                || query.offset_value().is_some())
        {
            return Err(error(
                "filters, ordering, limits and offsets need a one-to-many relationship",
            ));
        }

        for join in core::mem::take(&mut self.query.joins) {
            if query.join_for(join.field()).is_none() {
                query.joins.push(join);
            }
        }
        self.query = query;
        Ok(())
    }

    pub(crate) fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }
}
