//! Query rendering.
//!
//! ```text
//! SELECT <columns>, <single-join columns>, <many-join subselects>
//! FROM <object>
//! [WHERE <expr>] [ORDER BY <items>] [LIMIT n] [OFFSET n]
//! ```
//!
//! Columns of a single-valued join are rendered inline under the
//! relationship's dotted path (`Child.Mom.Name`). A one-to-many join becomes
//! a parenthesized subselect whose columns are prefixed with the related
//! object name and whose FROM is the dotted relationship path
//! (`(SELECT Child.Id FROM Teacher.Students)`).

use super::Query;
use crate::schema::HasAttributes;
use crate::soql::{Soql, SoqlChunk, ToSoql, Token};

/// Projection items split by where they are rendered.
#[derive(Default)]
struct Projection<'q> {
    inline: Vec<Soql<'q>>,
    subselects: Vec<Soql<'q>>,
}

impl Query {
    fn collect_projection<'q>(&'q self, prefix: &[&'q str], out: &mut Projection<'q>) {
        for (_, attr) in self.selected_columns() {
            out.inline.push(Soql::path(
                prefix
                    .iter()
                    .copied()
                    .chain(core::iter::once(attr.external_name())),
            ));
        }

        for join in &self.joins {
            let mut path = prefix.to_vec();
            path.push(join.external_name());
            if join.is_many() {
                out.subselects
                    .push(join.query().render_from(Soql::path(path)).parens());
            } else {
                join.query().collect_projection(&path, out);
            }
        }
    }

    /// Render the statement reading from `from`.
    fn render_from<'q>(&'q self, from: Soql<'q>) -> Soql<'q> {
        let mut sql = Soql::token(Token::SELECT);

        if self.count {
            sql.push_mut(SoqlChunk::raw_static("COUNT()"));
        } else {
            let mut projection = Projection::default();
            self.collect_projection(&[self.root.object_name()], &mut projection);
            let items = projection
                .inline
                .into_iter()
                .chain(projection.subselects);
            sql.append_mut(Soql::join(items, Token::COMMA));
        }

        sql.push_mut(Token::FROM);
        sql.append_mut(from);

        if let Some(filter) = &self.filter {
            sql.push_mut(Token::WHERE);
            sql.append_mut(filter.to_fragment());
        }

        if !self.order_by.is_empty() {
            sql.push_mut(Token::ORDER);
            sql.push_mut(Token::BY);
            sql.append_mut(Soql::join(
                self.order_by.iter().map(|order| order.to_fragment()),
                Token::COMMA,
            ));
        }

        if let Some(limit) = self.limit {
            sql.push_mut(Token::LIMIT);
            sql.push_mut(SoqlChunk::Number(limit));
        }

        if let Some(offset) = self.offset {
            sql.push_mut(Token::OFFSET);
            sql.push_mut(SoqlChunk::Number(offset));
        }

        sql
    }
}

impl ToSoql for Query {
    fn to_fragment(&self) -> Soql<'_> {
        self.render_from(Soql::ident(self.root.object_name()))
    }

    fn to_soql(&self) -> String {
        let text = self.to_fragment().text();
        crate::soql_trace_query!(&text, self.joins.len());
        text
    }
}

impl core::fmt::Display for Query {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_fragment().write_to(f)
    }
}
