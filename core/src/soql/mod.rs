//! SOQL fragment builder.
//!
//! Statements are assembled as a flat list of [`SoqlChunk`]s and written out
//! in one pass; spacing between chunks is decided by [`chunk_needs_space`]
//! so callers never concatenate whitespace by hand.

mod chunk;
mod tokens;

use std::borrow::Cow;
use std::fmt::Write;

pub use chunk::*;
use smallvec::SmallVec;
pub use tokens::*;

/// SOQL fragment with flat chunk storage.
///
/// Uses `SmallVec<[SoqlChunk; 8]>` so short fragments such as a single
/// comparison never touch the heap for their chunk list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Soql<'a> {
    pub chunks: SmallVec<[SoqlChunk<'a>; 8]>,
}

impl<'a> Soql<'a> {
    // ==================== constructors ====================

    /// Creates an empty fragment
    #[inline]
    pub const fn empty() -> Self {
        Self {
            chunks: SmallVec::new_const(),
        }
    }

    /// Creates a fragment with a single token
    #[inline]
    pub fn token(t: Token) -> Self {
        Self {
            chunks: smallvec::smallvec![SoqlChunk::Token(t)],
        }
    }

    #[inline]
    pub fn ident(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SoqlChunk::Ident(name.into())],
        }
    }

    #[inline]
    pub fn number(value: u64) -> Self {
        Self {
            chunks: smallvec::smallvec![SoqlChunk::Number(value)],
        }
    }

    /// Creates a dotted path such as `Child.Mom.Name`.
    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        let iter = segments.into_iter();
        let (lower, _) = iter.size_hint();
        let mut chunks = SmallVec::with_capacity(lower.saturating_mul(2));
        for (i, segment) in iter.enumerate() {
            if i > 0 {
                chunks.push(SoqlChunk::Token(Token::DOT));
            }
            chunks.push(SoqlChunk::Ident(segment.into()));
        }
        Soql { chunks }
    }

    // ==================== builder methods ====================

    /// Append another fragment (flat extend)
    #[inline]
    pub fn append(mut self, other: impl Into<Soql<'a>>) -> Self {
        self.append_mut(other);
        self
    }

    #[inline]
    pub fn append_mut(&mut self, other: impl Into<Soql<'a>>) {
        let other = other.into();

        if self.chunks.is_empty() {
            self.chunks = other.chunks;
            return;
        }
        if other.chunks.is_empty() {
            return;
        }

        self.chunks.extend(other.chunks);
    }

    /// Push a single chunk
    #[inline]
    pub fn push(mut self, chunk: impl Into<SoqlChunk<'a>>) -> Self {
        self.chunks.push(chunk.into());
        self
    }

    #[inline]
    pub fn push_mut(&mut self, chunk: impl Into<SoqlChunk<'a>>) {
        self.chunks.push(chunk.into());
    }

    // ==================== combinators ====================

    /// Joins multiple fragments with a separator
    pub fn join<I>(fragments: I, separator: Token) -> Soql<'a>
    where
        I: IntoIterator<Item = Soql<'a>>,
    {
        let mut iter = fragments.into_iter();
        let Some(mut result) = iter.next() else {
            return Soql::empty();
        };

        let (lower, _) = iter.size_hint();
        result.chunks.reserve(lower.saturating_mul(2));

        for other in iter {
            result.chunks.push(SoqlChunk::Token(separator));
            result.chunks.extend(other.chunks);
        }
        result
    }

    /// Wrap in parentheses: (self)
    #[inline]
    pub fn parens(self) -> Self {
        Soql::token(Token::LPAREN).append(self).push(Token::RPAREN)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    // ==================== output methods ====================

    /// Renders the fragment to a string.
    pub fn text(&self) -> String {
        let mut buf = String::with_capacity(self.chunks.len().saturating_mul(8).max(64));
        let _ = self.write_to(&mut buf);
        buf
    }

    /// Write the fragment to a buffer.
    pub fn write_to(&self, buf: &mut impl Write) -> core::fmt::Result {
        for (i, chunk) in self.chunks.iter().enumerate() {
            chunk.write(buf)?;
            if self.needs_space(i) {
                buf.write_char(' ')?;
            }
        }
        Ok(())
    }

    fn needs_space(&self, index: usize) -> bool {
        let Some(next) = self.chunks.get(index + 1) else {
            return false;
        };

        chunk_needs_space(&self.chunks[index], next)
    }
}

/// Canonical spacing rule between two adjacent chunks.
pub(crate) fn chunk_needs_space(current: &SoqlChunk<'_>, next: &SoqlChunk<'_>) -> bool {
    match (current, next) {
        // No space before closing/separator punctuation
        (_, SoqlChunk::Token(Token::RPAREN | Token::COMMA | Token::DOT)) => false,
        // No space after opening punctuation
        (SoqlChunk::Token(Token::LPAREN | Token::DOT), _) => false,
        // Space after comma
        (SoqlChunk::Token(Token::COMMA), _) => true,
        // Space after closing paren if next is word-like (e.g., ") FROM")
        (SoqlChunk::Token(Token::RPAREN), next) => next.is_word_like(),
        // Space before opening paren if preceded by word-like (e.g., "IN (")
        (current, SoqlChunk::Token(Token::LPAREN)) => {
            current.is_word_like() || matches!(current, SoqlChunk::Token(t) if t.is_operator())
        }
        // Space around comparison operators
        (SoqlChunk::Token(t), _) if t.is_operator() => true,
        (_, SoqlChunk::Token(t)) if t.is_operator() => true,
        // Space between all word-like chunks
        _ => current.is_word_like() && next.is_word_like(),
    }
}

/// Conversion into a renderable fragment.
///
/// Implemented by every piece of the query vocabulary; `to_soql` renders the
/// final text.
pub trait ToSoql {
    fn to_fragment(&self) -> Soql<'_>;

    fn to_soql(&self) -> String {
        self.to_fragment().text()
    }
}

// ==================== trait implementations ====================

impl From<Token> for Soql<'_> {
    fn from(value: Token) -> Self {
        Soql::token(value)
    }
}

impl<'a> From<SoqlChunk<'a>> for Soql<'a> {
    fn from(value: SoqlChunk<'a>) -> Self {
        Self {
            chunks: smallvec::smallvec![value],
        }
    }
}

impl core::fmt::Display for Soql<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.write_to(f)
    }
}

#[cfg(test)]
mod tests {
    use soql_types::Value;

    use super::*;

    #[test]
    fn test_spacing_rules() {
        let sql = Soql::token(Token::SELECT)
            .append(Soql::join(
                [Soql::path(["User", "Id"]), Soql::path(["User", "Email"])],
                Token::COMMA,
            ))
            .push(Token::FROM)
            .push(SoqlChunk::ident("User"));
        assert_eq!(sql.text(), "SELECT User.Id, User.Email FROM User");
    }

    #[test]
    fn test_operators_and_lists() {
        let value = Value::from("123");
        let cmp = Soql::path(["User", "Id"])
            .push(Token::EQ)
            .push(&value);
        assert_eq!(cmp.text(), "User.Id = '123'");

        let list = Soql::path(["User", "Id"]).push(Token::IN).append(
            Soql::join(
                [Value::from(1), Value::from(2)]
                    .map(|value| Soql::from(SoqlChunk::from(value))),
                Token::COMMA,
            )
            .parens(),
        );
        assert_eq!(list.text(), "User.Id IN (1, 2)");
    }

    #[test]
    fn test_nested_parens() {
        let inner = Soql::token(Token::SELECT)
            .append(Soql::path(["User", "Id"]))
            .push(Token::FROM)
            .append(Soql::path(["Account", "Contacts"]));

        let outer = Soql::token(Token::SELECT)
            .append(Soql::path(["Account", "Id"]))
            .push(Token::COMMA)
            .append(inner.parens())
            .push(Token::FROM)
            .append(Soql::ident("Account"));
        assert_eq!(
            outer.text(),
            "SELECT Account.Id, (SELECT User.Id FROM Account.Contacts) FROM Account"
        );
    }

    #[test]
    fn test_not_prefix_and_count() {
        let sql = Soql::token(Token::NOT)
            .append(
                Soql::path(["A", "B"])
                    .push(Token::EQ)
                    .push(Value::from(true))
                    .parens(),
            );
        assert_eq!(sql.text(), "NOT (A.B = true)");

        let count = Soql::token(Token::SELECT)
            .push(SoqlChunk::raw_static("COUNT()"))
            .push(Token::FROM)
            .push(SoqlChunk::ident_static("Child"))
            .push(Token::LIMIT)
            .append(Soql::number(5));
        assert_eq!(count.text(), "SELECT COUNT() FROM Child LIMIT 5");
    }
}
