use std::borrow::Cow;

use soql_types::{Value, write_literal};

use super::Token;

/// A SOQL chunk represents one lexical piece of a statement.
///
/// - `Token` - keywords, operators and punctuation
/// - `Ident` - object, relationship and field names (never quoted in SOQL)
/// - `Raw` - text written as-is, such as `COUNT()`
/// - `Number` - a non-negative integer, used by `LIMIT` / `OFFSET`
/// - `Literal` - a typed operand value rendered with the literal grammar
#[derive(Debug, Clone, PartialEq)]
pub enum SoqlChunk<'a> {
    Token(Token),
    Ident(Cow<'a, str>),
    Raw(Cow<'a, str>),
    Number(u64),
    Literal(Cow<'a, Value>),
}

impl<'a> SoqlChunk<'a> {
    // ==================== const constructors ====================

    #[inline]
    pub const fn token(t: Token) -> Self {
        Self::Token(t)
    }

    #[inline]
    pub const fn ident_static(name: &'static str) -> Self {
        Self::Ident(Cow::Borrowed(name))
    }

    #[inline]
    pub const fn raw_static(text: &'static str) -> Self {
        Self::Raw(Cow::Borrowed(text))
    }

    #[inline]
    pub const fn literal_borrowed(value: &'a Value) -> Self {
        Self::Literal(Cow::Borrowed(value))
    }

    // ==================== non-const constructors ====================

    #[inline]
    pub fn ident(name: impl Into<Cow<'a, str>>) -> Self {
        Self::Ident(name.into())
    }

    // ==================== write implementation ====================

    /// Write chunk content to buffer
    pub(crate) fn write(&self, buf: &mut impl core::fmt::Write) -> core::fmt::Result {
        match self {
            SoqlChunk::Token(token) => buf.write_str(token.as_str()),
            SoqlChunk::Ident(name) | SoqlChunk::Raw(name) => buf.write_str(name),
            SoqlChunk::Number(n) => write!(buf, "{n}"),
            SoqlChunk::Literal(value) => write_literal(value, buf),
        }
    }

    /// Check if this chunk is "word-like" (needs space separation from other word-like chunks)
    #[inline]
    pub(crate) const fn is_word_like(&self) -> bool {
        match self {
            SoqlChunk::Token(t) => !t.is_punctuation() && !t.is_operator(),
            SoqlChunk::Ident(_)
            | SoqlChunk::Raw(_)
            | SoqlChunk::Number(_)
            | SoqlChunk::Literal(_) => true,
        }
    }
}

// ==================== From implementations ====================

impl From<Token> for SoqlChunk<'_> {
    #[inline]
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

impl<'a> From<&'a Value> for SoqlChunk<'a> {
    #[inline]
    fn from(value: &'a Value) -> Self {
        Self::Literal(Cow::Borrowed(value))
    }
}

impl From<Value> for SoqlChunk<'_> {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Literal(Cow::Owned(value))
    }
}
