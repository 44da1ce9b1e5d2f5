/// SOQL keywords, operators and punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // Clauses
    SELECT,
    FROM,
    WHERE,
    ORDER,
    BY,
    LIMIT,
    OFFSET,

    // Ordering
    ASC,
    DESC,
    NULLS,
    FIRST,
    LAST,

    // Logical
    AND,
    OR,
    NOT,

    // Set / pattern membership
    IN,
    LIKE,
    INCLUDES,
    EXCLUDES,

    // Comparison
    EQ,
    NE,
    LT,
    GT,
    LE,
    GE,

    // Punctuation
    LPAREN,
    RPAREN,
    COMMA,
    DOT,
}

impl Token {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Token::SELECT => "SELECT",
            Token::FROM => "FROM",
            Token::WHERE => "WHERE",
            Token::ORDER => "ORDER",
            Token::BY => "BY",
            Token::LIMIT => "LIMIT",
            Token::OFFSET => "OFFSET",
            Token::ASC => "ASC",
            Token::DESC => "DESC",
            Token::NULLS => "NULLS",
            Token::FIRST => "FIRST",
            Token::LAST => "LAST",
            Token::AND => "AND",
            Token::OR => "OR",
            Token::NOT => "NOT",
            Token::IN => "IN",
            Token::LIKE => "LIKE",
            Token::INCLUDES => "INCLUDES",
            Token::EXCLUDES => "EXCLUDES",
            Token::EQ => "=",
            Token::NE => "!=",
            Token::LT => "<",
            Token::GT => ">",
            Token::LE => "<=",
            Token::GE => ">=",
            Token::LPAREN => "(",
            Token::RPAREN => ")",
            Token::COMMA => ",",
            Token::DOT => ".",
        }
    }

    /// Symbolic comparison operators, always surrounded by spaces.
    #[inline]
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::EQ | Token::NE | Token::LT | Token::GT | Token::LE | Token::GE
        )
    }

    /// Punctuation never takes part in word spacing.
    #[inline]
    #[must_use]
    pub const fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Token::LPAREN | Token::RPAREN | Token::COMMA | Token::DOT
        )
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
