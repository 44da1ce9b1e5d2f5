//! Comparison constructors.
//!
//! Every constructor validates its operand against the attribute's kind:
//!
//! - `eq`, `ne`: any value of the attribute's kind, or `NULL`
//! - `lt`, `gt`, `le`, `ge`: a non-null value of the attribute's kind
//! - `like`: a string, on string attributes only
//! - `in_`, `not_in`: a non-empty list or a single-column subquery
//! - `includes`, `excludes`: a non-empty list of strings, on string attributes only
//!
//! Integers are accepted for float attributes; no other kinds mix.

use soql_types::{ScalarKind, Value};

use super::{CmpOp, Comparison, Expr, Operand};
use crate::error::{Result, SoqlError};
use crate::path::Attr;
use crate::schema::HasAttributes;

impl Attr {
    /// `attr = value`; `NULL` is allowed.
    pub fn eq(&self, value: impl Into<Value>) -> Result<Expr> {
        self.compare(CmpOp::Eq, Operand::Literal(value.into()))
    }

    /// `attr != value`; `NULL` is allowed.
    pub fn ne(&self, value: impl Into<Value>) -> Result<Expr> {
        self.compare(CmpOp::Ne, Operand::Literal(value.into()))
    }

    pub fn lt(&self, value: impl Into<Value>) -> Result<Expr> {
        self.compare(CmpOp::Lt, Operand::Literal(value.into()))
    }

    pub fn gt(&self, value: impl Into<Value>) -> Result<Expr> {
        self.compare(CmpOp::Gt, Operand::Literal(value.into()))
    }

    pub fn le(&self, value: impl Into<Value>) -> Result<Expr> {
        self.compare(CmpOp::Le, Operand::Literal(value.into()))
    }

    pub fn ge(&self, value: impl Into<Value>) -> Result<Expr> {
        self.compare(CmpOp::Ge, Operand::Literal(value.into()))
    }

    /// `attr LIKE 'pattern'`.
    pub fn like(&self, pattern: impl Into<Value>) -> Result<Expr> {
        self.compare(CmpOp::Like, Operand::Literal(pattern.into()))
    }

    /// `attr IN (...)` over a literal list or a [`Subquery`](crate::Subquery).
    ///
    /// ```
    /// # use soql_core::{AttributeType, ModelSchema, Registry, ToSoql};
    /// # let registry = Registry::builder()
    /// #     .model(ModelSchema::new("User").attribute("id", AttributeType::string("Id")))
    /// #     .build()
    /// #     .unwrap();
    /// let user = registry.schema("User").unwrap();
    /// let expr = user.attr("id").unwrap().in_(["1", "2"]).unwrap();
    /// assert_eq!(expr.to_soql(), "User.Id IN ('1', '2')");
    /// ```
    pub fn in_(&self, operand: impl Into<Operand>) -> Result<Expr> {
        self.compare(CmpOp::In, operand.into())
    }

    /// `attr NOT IN (...)`.
    pub fn not_in(&self, operand: impl Into<Operand>) -> Result<Expr> {
        self.compare(CmpOp::NotIn, operand.into())
    }

    /// `attr INCLUDES (...)` for multi-select picklists.
    pub fn includes(&self, operand: impl Into<Operand>) -> Result<Expr> {
        self.compare(CmpOp::Includes, operand.into())
    }

    /// `attr EXCLUDES (...)` for multi-select picklists.
    pub fn excludes(&self, operand: impl Into<Operand>) -> Result<Expr> {
        self.compare(CmpOp::Excludes, operand.into())
    }

    /// Build a comparison with an explicit operator.
    pub fn compare(&self, op: CmpOp, operand: Operand) -> Result<Expr> {
        self.check_operand(op, &operand)?;
        Ok(Expr::Comparison(Comparison {
            attr: self.clone(),
            op,
            operand,
        }))
    }

    fn check_operand(&self, op: CmpOp, operand: &Operand) -> Result<()> {
        let kind = self.kind();
        let string_only = matches!(op, CmpOp::Like | CmpOp::Includes | CmpOp::Excludes);
        if string_only && kind != ScalarKind::String {
            return Err(self.mismatch(op, operand));
        }

        let ok = match operand {
            Operand::Literal(Value::Null) => matches!(op, CmpOp::Eq | CmpOp::Ne),
            Operand::Literal(value) => !op.takes_list() && kind.accepts(value),
            Operand::List(values) => {
                op.takes_list()
                    && !values.is_empty()
                    && values.iter().all(|value| kind.accepts(value))
            }
            Operand::Subquery(subquery) => {
                matches!(op, CmpOp::In | CmpOp::NotIn)
                    && kind.is_compatible(subquery.column().kind())
            }
        };

        if ok {
            Ok(())
        } else {
            Err(self.mismatch(op, operand))
        }
    }

    fn mismatch(&self, op: CmpOp, operand: &Operand) -> SoqlError {
        SoqlError::TypeMismatch {
            schema: self.root().name().into(),
            attribute: self.field_path(),
            operator: op.as_str(),
            value: operand.describe(),
        }
    }
}
