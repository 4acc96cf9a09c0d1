//! Parser for the `.properties` text format.
//!
//! Each logical line holds one entry. A key runs up to the first unescaped
//! `=`, `:` or whitespace character; the value is the remainder of the line
//! after the separator and any surrounding whitespace. Lines whose first
//! non-blank character is `#` or `!` are comments. A line ending in an odd
//! number of backslashes continues on the next line, whose leading
//! whitespace is dropped.
//!
//! Keys and values recognise the escapes `\t`, `\n`, `\r`, `\f` and
//! `\uXXXX` (including surrogate pairs). Any other escaped character stands
//! for itself, so `\=`, `\:` and `\\` embed literal separators and
//! backslashes.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

type Cursor<'a> = Peekable<Chars<'a>>;

const BLANKS: [char; 3] = [' ', '\t', '\u{c}'];

/// A malformed entry in a `.properties` source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// One-based number of the line the offending entry starts on.
    pub line: usize,
    /// Description of the problem.
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Parses `.properties` text into its key/value entries.
///
/// When a key occurs more than once the last occurrence wins.
///
/// # Errors
///
/// Returns [`ParseError`] when an entry holds a malformed `\u` escape or an
/// unpaired UTF-16 surrogate.
///
/// # Example
///
/// ```
/// let entries = glossa_properties::parse("greeting = Hello %s!!!\n# note\n")?;
/// assert_eq!(entries.get("greeting").map(String::as_str), Some("Hello %s!!!"));
/// # Ok::<(), glossa_properties::ParseError>(())
/// ```
pub fn parse(source: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut entries = HashMap::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, natural) in source.lines().enumerate() {
        let line_number = index + 1;
        let text = natural.trim_start_matches(BLANKS);
        let (start, mut logical) = match pending.take() {
            Some(open) => open,
            None if text.is_empty() || text.starts_with(['#', '!']) => continue,
            None => (line_number, String::new()),
        };

        if let Some(head) = continued(text) {
            logical.push_str(head);
            pending = Some((start, logical));
            continue;
        }
        logical.push_str(text);
        let (key, value) = parse_entry(&logical, start)?;
        entries.insert(key, value);
    }

    if let Some((start, logical)) = pending {
        let (key, value) = parse_entry(&logical, start)?;
        entries.insert(key, value);
    }
    Ok(entries)
}

/// Returns the line without its continuation backslash, if it has one.
fn continued(text: &str) -> Option<&str> {
    let odd = text
        .chars()
        .rev()
        .take_while(|&c| c == '\\')
        .fold(false, |odd, _| !odd);
    if odd { text.strip_suffix('\\') } else { None }
}

fn parse_entry(logical: &str, line: usize) -> Result<(String, String), ParseError> {
    let mut cursor = logical.chars().peekable();
    let (key, separated) = read_key(&mut cursor, line)?;
    skip_blanks(&mut cursor);
    if !separated && cursor.next_if(|c| matches!(c, '=' | ':')).is_some() {
        skip_blanks(&mut cursor);
    }
    let value = read_value(&mut cursor, line)?;
    Ok((key, value))
}

/// Reads the key and reports whether an explicit `=` or `:` ended it.
fn read_key(cursor: &mut Cursor<'_>, line: usize) -> Result<(String, bool), ParseError> {
    let mut key = String::new();
    while let Some(c) = cursor.next() {
        match c {
            '\\' => push_escape(cursor, &mut key, line)?,
            '=' | ':' => return Ok((key, true)),
            _ if BLANKS.contains(&c) => return Ok((key, false)),
            _ => key.push(c),
        }
    }
    Ok((key, false))
}

fn read_value(cursor: &mut Cursor<'_>, line: usize) -> Result<String, ParseError> {
    let mut value = String::new();
    while let Some(c) = cursor.next() {
        if c == '\\' {
            push_escape(cursor, &mut value, line)?;
        } else {
            value.push(c);
        }
    }
    Ok(value)
}

fn skip_blanks(cursor: &mut Cursor<'_>) {
    while cursor.next_if(|c| BLANKS.contains(c)).is_some() {}
}

/// Decodes the escape following a backslash. A trailing lone backslash is
/// dropped.
fn push_escape(cursor: &mut Cursor<'_>, out: &mut String, line: usize) -> Result<(), ParseError> {
    let Some(escaped) = cursor.next() else {
        return Ok(());
    };
    let decoded = match escaped {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\u{c}',
        'u' => read_unicode(cursor, line)?,
        other => other,
    };
    out.push(decoded);
    Ok(())
}

fn read_unicode(cursor: &mut Cursor<'_>, line: usize) -> Result<char, ParseError> {
    let unit = read_code_unit(cursor, line)?;
    if (0xDC00..=0xDFFF).contains(&unit) {
        return Err(ParseError::new(line, format!("unpaired surrogate \\u{unit:04X}")));
    }
    if !(0xD800..=0xDBFF).contains(&unit) {
        return char::from_u32(unit)
            .ok_or_else(|| ParseError::new(line, format!("invalid code point \\u{unit:04X}")));
    }

    let paired = cursor.next_if_eq(&'\\').is_some() && cursor.next_if_eq(&'u').is_some();
    if !paired {
        return Err(ParseError::new(line, format!("unpaired surrogate \\u{unit:04X}")));
    }
    let low = read_code_unit(cursor, line)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(ParseError::new(line, format!("unpaired surrogate \\u{unit:04X}")));
    }
    let scalar = 0x1_0000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(scalar)
        .ok_or_else(|| ParseError::new(line, format!("invalid code point U+{scalar:X}")))
}

fn read_code_unit(cursor: &mut Cursor<'_>, line: usize) -> Result<u32, ParseError> {
    let mut unit = 0_u32;
    for _ in 0..4 {
        let digit = cursor
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| ParseError::new(line, "malformed \\uXXXX escape"))?;
        unit = (unit << 4) | digit;
    }
    Ok(unit)
}

#[cfg(test)]
mod tests;
