//! SOQL literal grammar.
//!
//! Strings are single-quoted with backslash escapes, booleans are the bare
//! words `true` / `false`, dates are `YYYY-MM-DD` and datetimes are RFC 3339
//! with an explicit `+00:00` offset. Numbers never use exponent notation.

use core::fmt::Write;

use chrono::SecondsFormat;

use crate::Value;

/// Keyword rendered for `Value::Null`.
pub const NULL: &str = "NULL";

/// Render a value as a SOQL literal.
///
/// ```
/// use soql_types::{Value, to_literal};
///
/// assert_eq!(to_literal(&Value::from("O'Brien")), r"'O\'Brien'");
/// assert_eq!(to_literal(&Value::from(true)), "true");
/// assert_eq!(to_literal(&Value::Null), "NULL");
/// ```
#[must_use]
pub fn to_literal(value: &Value) -> String {
    let mut buf = String::with_capacity(16);
    let _ = write_literal(value, &mut buf);
    buf
}

/// Write a value as a SOQL literal into `buf`.
pub fn write_literal(value: &Value, buf: &mut impl Write) -> core::fmt::Result {
    match value {
        Value::Null => buf.write_str(NULL),
        Value::String(s) => write_quoted(s, buf),
        Value::Boolean(true) => buf.write_str("true"),
        Value::Boolean(false) => buf.write_str("false"),
        Value::Integer(i) => write!(buf, "{i}"),
        Value::Float(f) => write_float(*f, buf),
        Value::Date(d) => write!(buf, "{}", d.format("%Y-%m-%d")),
        Value::DateTime(dt) => buf.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
    }
}

/// Write `s` single-quoted, escaping characters reserved by the SOQL lexer.
pub fn write_quoted(s: &str, buf: &mut impl Write) -> core::fmt::Result {
    buf.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\\' => buf.write_str("\\\\")?,
            '\'' => buf.write_str("\\'")?,
            '"' => buf.write_str("\\\"")?,
            '\n' => buf.write_str("\\n")?,
            '\r' => buf.write_str("\\r")?,
            '\t' => buf.write_str("\\t")?,
            '\u{8}' => buf.write_str("\\b")?,
            '\u{c}' => buf.write_str("\\f")?,
            c => buf.write_char(c)?,
        }
    }
    buf.write_char('\'')
}

fn write_float(f: f64, buf: &mut impl Write) -> core::fmt::Result {
    // `Display` for f64 never switches to exponent form, but drops the
    // fractional part of integral values.
    if f.is_finite() && f.fract() == 0.0 {
        write!(buf, "{f:.1}")
    } else {
        write!(buf, "{f}")
    }
}
