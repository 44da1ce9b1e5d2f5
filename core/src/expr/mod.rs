//! Filter expressions.
//!
//! An [`Expr`] is an immutable tree of comparisons joined by `AND`, `OR` and
//! `NOT`. Comparisons are built from an [`Attr`] and validated against the
//! attribute's kind when they are created, so a tree that exists always
//! renders.
//!
//! Parentheses follow the tree exactly: an `AND`/`OR` nested in another
//! `AND`/`OR` is wrapped, as is the operand of `NOT` when it is compound.

mod cmp;
mod logical;

pub use logical::*;

use soql_types::Value;

use crate::error::Result;
use crate::path::Attr;
use crate::query::Subquery;
use crate::soql::{Soql, SoqlChunk, ToSoql, Token};

/// A boolean filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Comparison(Comparison),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    #[inline]
    const fn is_junction(&self) -> bool {
        matches!(self, Expr::And(_) | Expr::Or(_))
    }

    /// Visit every attribute the expression compares, outermost first.
    ///
    /// Attributes inside subquery operands belong to the subquery and are not
    /// visited.
    pub fn try_for_each_attr<F>(&self, f: &mut F) -> Result<()>
    where
        F: FnMut(&Attr) -> Result<()>,
    {
        match self {
            Expr::Comparison(cmp) => f(&cmp.attr),
            Expr::And(children) | Expr::Or(children) => {
                children.iter().try_for_each(|child| child.try_for_each_attr(f))
            }
            Expr::Not(child) => child.try_for_each_attr(f),
        }
    }

    fn junction<'a>(children: &'a [Expr], separator: Token) -> Soql<'a> {
        Soql::join(
            children.iter().map(|child| {
                let sql = child.to_fragment();
                if child.is_junction() { sql.parens() } else { sql }
            }),
            separator,
        )
    }
}

impl ToSoql for Expr {
    fn to_fragment(&self) -> Soql<'_> {
        match self {
            Expr::Comparison(cmp) => cmp.to_fragment(),
            Expr::And(children) => Self::junction(children, Token::AND),
            Expr::Or(children) => Self::junction(children, Token::OR),
            Expr::Not(child) => {
                let sql = child.to_fragment();
                let sql = if matches!(**child, Expr::Comparison(_)) {
                    sql
                } else {
                    sql.parens()
                };
                Soql::token(Token::NOT).append(sql)
            }
        }
    }
}

impl core::fmt::Display for Expr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_fragment().write_to(f)
    }
}

impl From<Comparison> for Expr {
    fn from(value: Comparison) -> Self {
        Expr::Comparison(value)
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Like,
    In,
    NotIn,
    Includes,
    Excludes,
}

impl CmpOp {
    /// Operator text as rendered.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::Le => "<=",
            CmpOp::Ge => ">=",
            CmpOp::Like => "LIKE",
            CmpOp::In => "IN",
            CmpOp::NotIn => "NOT IN",
            CmpOp::Includes => "INCLUDES",
            CmpOp::Excludes => "EXCLUDES",
        }
    }

    /// Operators whose operand is a parenthesized list.
    #[inline]
    #[must_use]
    pub const fn takes_list(&self) -> bool {
        matches!(
            self,
            CmpOp::In | CmpOp::NotIn | CmpOp::Includes | CmpOp::Excludes
        )
    }

    fn push_tokens(&self, sql: &mut Soql<'_>) {
        match self {
            CmpOp::Eq => sql.push_mut(Token::EQ),
            CmpOp::Ne => sql.push_mut(Token::NE),
            CmpOp::Lt => sql.push_mut(Token::LT),
            CmpOp::Gt => sql.push_mut(Token::GT),
            CmpOp::Le => sql.push_mut(Token::LE),
            CmpOp::Ge => sql.push_mut(Token::GE),
            CmpOp::Like => sql.push_mut(Token::LIKE),
            CmpOp::In => sql.push_mut(Token::IN),
            CmpOp::NotIn => {
                sql.push_mut(Token::NOT);
                sql.push_mut(Token::IN);
            }
            CmpOp::Includes => sql.push_mut(Token::INCLUDES),
            CmpOp::Excludes => sql.push_mut(Token::EXCLUDES),
        }
    }
}

impl core::fmt::Display for CmpOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Value),
    List(Vec<Value>),
    Subquery(Subquery),
}

impl Operand {
    /// Operand as shown in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Operand::Literal(value) => value.to_string(),
            Operand::List(_) | Operand::Subquery(_) => self.to_fragment().text(),
        }
    }
}

impl ToSoql for Operand {
    fn to_fragment(&self) -> Soql<'_> {
        match self {
            Operand::Literal(value) => Soql::from(SoqlChunk::literal_borrowed(value)),
            Operand::List(values) => Soql::join(
                values
                    .iter()
                    .map(|value| Soql::from(SoqlChunk::literal_borrowed(value))),
                Token::COMMA,
            )
            .parens(),
            Operand::Subquery(subquery) => subquery.to_fragment(),
        }
    }
}

impl From<Subquery> for Operand {
    fn from(value: Subquery) -> Self {
        Operand::Subquery(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Operand {
    fn from(values: [T; N]) -> Self {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Operand {
    fn from(values: &[T]) -> Self {
        Operand::List(values.iter().cloned().map(Into::into).collect())
    }
}

/// `attr <op> operand`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    attr: Attr,
    op: CmpOp,
    operand: Operand,
}

impl Comparison {
    #[inline]
    pub fn attr(&self) -> &Attr {
        &self.attr
    }

    #[inline]
    pub const fn op(&self) -> CmpOp {
        self.op
    }

    #[inline]
    pub fn operand(&self) -> &Operand {
        &self.operand
    }
}

impl ToSoql for Comparison {
    fn to_fragment(&self) -> Soql<'_> {
        let mut sql = self.attr.to_fragment();
        self.op.push_tokens(&mut sql);
        sql.append(self.operand.to_fragment())
    }
}
