//! ORDER BY items.

use crate::path::Attr;
use crate::soql::{Soql, ToSoql, Token};

/// Sort direction for ORDER BY clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    const fn token(self) -> Token {
        match self {
            Direction::Asc => Token::ASC,
            Direction::Desc => Token::DESC,
        }
    }
}

/// Where null values sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NullsPosition {
    First,
    Last,
}

impl NullsPosition {
    const fn token(self) -> Token {
        match self {
            NullsPosition::First => Token::FIRST,
            NullsPosition::Last => Token::LAST,
        }
    }
}

/// One ORDER BY item: attribute, optional direction and optional nulls
/// position. Omitted parts are left to the server default.
///
/// ```ignore
/// query.order_by(parent.attr("age")?.desc().nulls_last())?
/// // ORDER BY Parent.Age DESC NULLS LAST
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    attr: Attr,
    direction: Option<Direction>,
    nulls: Option<NullsPosition>,
}

impl OrderBy {
    pub fn new(attr: Attr) -> Self {
        Self {
            attr,
            direction: None,
            nulls: None,
        }
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    #[must_use]
    pub fn asc(self) -> Self {
        self.direction(Direction::Asc)
    }

    #[must_use]
    pub fn desc(self) -> Self {
        self.direction(Direction::Desc)
    }

    #[must_use]
    pub fn nulls(mut self, nulls: NullsPosition) -> Self {
        self.nulls = Some(nulls);
        self
    }

    #[must_use]
    pub fn nulls_first(self) -> Self {
        self.nulls(NullsPosition::First)
    }

    #[must_use]
    pub fn nulls_last(self) -> Self {
        self.nulls(NullsPosition::Last)
    }

    #[inline]
    pub fn attr(&self) -> &Attr {
        &self.attr
    }

    #[inline]
    pub const fn get_direction(&self) -> Option<Direction> {
        self.direction
    }

    #[inline]
    pub const fn get_nulls(&self) -> Option<NullsPosition> {
        self.nulls
    }
}

impl Attr {
    /// `ORDER BY attr ASC`
    pub fn asc(&self) -> OrderBy {
        OrderBy::new(self.clone()).asc()
    }

    /// `ORDER BY attr DESC`
    pub fn desc(&self) -> OrderBy {
        OrderBy::new(self.clone()).desc()
    }
}

impl From<Attr> for OrderBy {
    fn from(value: Attr) -> Self {
        OrderBy::new(value)
    }
}

impl From<&Attr> for OrderBy {
    fn from(value: &Attr) -> Self {
        OrderBy::new(value.clone())
    }
}

impl ToSoql for OrderBy {
    fn to_fragment(&self) -> Soql<'_> {
        let mut sql = self.attr.to_fragment();
        if let Some(direction) = self.direction {
            sql.push_mut(direction.token());
        }
        if let Some(nulls) = self.nulls {
            sql.push_mut(Token::NULLS);
            sql.push_mut(nulls.token());
        }
        sql
    }
}
