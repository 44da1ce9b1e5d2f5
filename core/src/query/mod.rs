//! SOQL SELECT statements.
//!
//! A [`Query`] is an immutable value; every builder call consumes it and
//! returns the next one, failing fast when a part does not belong to the
//! query's schema. Rendering lives in `render`, record loading in
//! [`crate::loader`].
//!
//! ```ignore
//! let soql = select(&account)
//!     .join(&account.rel("contacts")?)?
//!     .r#where(account.attr("id")?.eq("001")?)?
//!     .limit(10)?
//!     .to_soql();
//! ```

mod join;
mod order;
mod render;
mod subquery;

pub use join::Join;
pub use order::{Direction, NullsPosition, OrderBy};
pub use subquery::Subquery;

use compact_str::CompactString;

use crate::attribute::AttributeType;
use crate::error::{Result, SoqlError};
use crate::expr::Expr;
use crate::path::{Attr, Rel};
use crate::registry::SchemaRef;
use crate::schema::HasAttributes;

/// Start a query selecting every scalar column of `schema`.
pub fn select(schema: &SchemaRef) -> Query {
    Query::new(schema)
}

/// An immutable SOQL SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    root: SchemaRef,
    columns: Vec<Attr>,
    joins: Vec<Join>,
    filter: Option<Expr>,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
    count: bool,
}

impl Query {
    pub fn new(schema: &SchemaRef) -> Self {
        Self {
            root: schema.clone(),
            columns: Vec::new(),
            joins: Vec::new(),
            filter: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
            count: false,
        }
    }

    // ==================== builder methods ====================

    /// Replace the projection with direct attributes of the root schema.
    ///
    /// An empty list restores the default of every scalar column.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Attr>) -> Result<Self> {
        let columns: Vec<Attr> = columns.into_iter().collect();
        for (i, column) in columns.iter().enumerate() {
            if column.root() != &self.root {
                return Err(self.invalid_column(column, "not an attribute of the query's schema"));
            }
            if !column.is_direct() {
                return Err(self.invalid_column(column, "columns cannot traverse relationships"));
            }
            if columns[..i].iter().any(|prev| prev.field() == column.field()) {
                return Err(self.invalid_column(column, "selected more than once"));
            }
        }
        self.columns = columns;
        Ok(self)
    }

    /// Set the filter, replacing any previous one.
    ///
    /// Combine conditions with [`and`](crate::and) / `&` before calling this;
    /// successive calls do not accumulate.
    pub fn r#where(mut self, filter: Expr) -> Result<Self> {
        filter.try_for_each_attr(&mut |attr| self.check_reference(attr))?;
        self.filter = Some(filter);
        Ok(self)
    }

    /// Join every relationship along `rel`, selecting all scalar columns of
    /// each related schema. Hops already joined are reused.
    pub fn join(mut self, rel: &Rel) -> Result<Self> {
        self.check_rel(rel)?;
        let mut current = &mut self;
        for hop in rel.hops() {
            current = current.join_hop(hop.field())?.query_mut();
        }
        Ok(self)
    }

    /// Join along `rel`, using `query` for its last relationship.
    ///
    /// `query` must select from the related schema. Filters, ordering, limits
    /// and offsets are only accepted for one-to-many relationships.
    pub fn join_with(mut self, rel: &Rel, query: Query) -> Result<Self> {
        self.check_rel(rel)?;
        let (last, parents) = rel.hops().split_last().ok_or_else(|| SoqlError::InvalidJoin {
            schema: self.root.name().into(),
            attribute: CompactString::default(),
            reason: "empty relationship path",
        })?;

        let mut current = &mut self;
        for hop in parents {
            current = current.join_hop(hop.field())?.query_mut();
        }
        let parent = current.root.clone();
        current.join_hop(last.field())?.replace(&parent, query)?;
        Ok(self)
    }

    /// Append an ORDER BY item.
    pub fn order_by(mut self, order: impl Into<OrderBy>) -> Result<Self> {
        let order = order.into();
        self.check_reference(order.attr())?;
        self.order_by.push(order);
        Ok(self)
    }

    /// Cap the number of records.
    pub fn limit(mut self, limit: i64) -> Result<Self> {
        let limit = u64::try_from(limit).map_err(|_| SoqlError::InvalidLimit(limit))?;
        self.limit = Some(limit);
        Ok(self)
    }

    /// Skip the first `offset` records.
    pub fn offset(mut self, offset: i64) -> Result<Self> {
        let offset = u64::try_from(offset).map_err(|_| SoqlError::InvalidOffset(offset))?;
        self.offset = Some(offset);
        Ok(self)
    }

    /// Count matching records instead of fetching them: `SELECT COUNT()`.
    #[must_use]
    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Turn a single-column query into an `IN` operand.
    pub fn subquery(self) -> Result<Subquery> {
        Subquery::new(self)
    }

    // ==================== accessors ====================

    #[inline]
    pub fn root(&self) -> &SchemaRef {
        &self.root
    }

    /// Explicitly selected columns; empty when the default projection applies.
    #[inline]
    pub fn explicit_columns(&self) -> &[Attr] {
        &self.columns
    }

    /// Field names and attributes of the projection, in order.
    pub fn selected_columns(&self) -> impl Iterator<Item = (&str, &AttributeType)> {
        let explicit = (!self.columns.is_empty()).then(|| {
            self.columns
                .iter()
                .map(|column| (column.field(), column.attribute()))
        });
        let default = self.columns.is_empty().then(|| self.root.columns());
        explicit
            .into_iter()
            .flatten()
            .chain(default.into_iter().flatten())
    }

    #[inline]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// The join over `field`, if any.
    pub fn join_for(&self, field: &str) -> Option<&Join> {
        self.joins.iter().find(|join| join.field() == field)
    }

    #[inline]
    pub fn filter(&self) -> Option<&Expr> {
        self.filter.as_ref()
    }

    #[inline]
    pub fn order_by_items(&self) -> &[OrderBy] {
        &self.order_by
    }

    #[inline]
    pub const fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    #[inline]
    pub const fn offset_value(&self) -> Option<u64> {
        self.offset
    }

    #[inline]
    pub const fn is_count(&self) -> bool {
        self.count
    }

    // ==================== validation ====================

    fn join_hop(&mut self, field: &str) -> Result<&mut Join> {
        let position = match self.joins.iter().position(|join| join.field() == field) {
            Some(position) => position,
            None => {
                self.joins.push(Join::new(&self.root, field)?);
                self.joins.len() - 1
            }
        };
        Ok(&mut self.joins[position])
    }

    fn check_rel(&self, rel: &Rel) -> Result<()> {
        if rel.root() != &self.root {
            return Err(SoqlError::InvalidJoin {
                schema: self.root.name().into(),
                attribute: rel.last().field().into(),
                reason: "relationship does not start at the query's schema",
            });
        }
        Ok(())
    }

    fn check_reference(&self, attr: &Attr) -> Result<()> {
        if attr.root() != &self.root {
            return Err(self.invalid_column(attr, "not rooted at the query's schema"));
        }
        if attr.crosses_many() {
            return Err(self.invalid_column(attr, "cannot reference across a one-to-many relationship"));
        }
        Ok(())
    }

    fn invalid_column(&self, attr: &Attr, reason: &'static str) -> SoqlError {
        SoqlError::InvalidColumn {
            schema: self.root.name().into(),
            attribute: attr.field_path(),
            reason,
        }
    }
}
