//! Logical operators (AND, OR, NOT).
//!
//! This module provides both function-based and operator-based logical operations:
//!
//! ```ignore
//! // Function style
//! and([condition1, condition2, condition3])?
//! or([condition1, condition2])?
//! not(condition)
//!
//! // Operator style (via std::ops traits)
//! condition1 & condition2   // BitAnd
//! condition1 | condition2   // BitOr
//! !condition                // Not
//! ```
//!
//! Nodes are never flattened: `(a & b) & c` keeps its nested shape and renders
//! as `(a AND b) AND c`.

use core::ops::{BitAnd, BitOr, Not};

use super::Expr;
use crate::error::{Result, SoqlError};

/// Logical AND of two or more expressions.
pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Result<Expr> {
    let children: Vec<Expr> = exprs.into_iter().collect();
    if children.len() < 2 {
        return Err(SoqlError::InvalidExpression(
            "AND needs at least two operands",
        ));
    }
    Ok(Expr::And(children))
}

/// Logical OR of two or more expressions.
pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Result<Expr> {
    let children: Vec<Expr> = exprs.into_iter().collect();
    if children.len() < 2 {
        return Err(SoqlError::InvalidExpression("OR needs at least two operands"));
    }
    Ok(Expr::Or(children))
}

/// Logical NOT.
pub fn not(expr: Expr) -> Expr {
    Expr::Not(Box::new(expr))
}

// =============================================================================
// Operator Trait Implementations
// =============================================================================

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        not(self)
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Self::Output {
        Expr::And(vec![self, rhs])
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Self::Output {
        Expr::Or(vec![self, rhs])
    }
}
