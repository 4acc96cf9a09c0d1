//! Conversion of command-line words into format arguments.

use glossa_core::FormatArg;

/// Interprets a word as the most specific argument it spells.
///
/// `null` becomes [`FormatArg::Null`], `true` and `false` booleans, whole
/// numbers integers and finite decimals floats. Anything else is text.
pub(crate) fn parse_format_arg(word: &str) -> FormatArg {
    match word {
        "null" => FormatArg::Null,
        "true" => FormatArg::Bool(true),
        "false" => FormatArg::Bool(false),
        _ => parse_number(word).unwrap_or_else(|| FormatArg::from(word)),
    }
}

fn parse_number(word: &str) -> Option<FormatArg> {
    if let Ok(integer) = word.parse::<i64>() {
        return Some(FormatArg::Int(integer));
    }
    word.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(FormatArg::Float)
}

/// Converts every word, or keeps them all as text when `raw` is set.
pub(crate) fn format_args(words: &[String], raw: bool) -> Vec<FormatArg> {
    words
        .iter()
        .map(|word| {
            if raw {
                FormatArg::from(word.as_str())
            } else {
                parse_format_arg(word)
            }
        })
        .collect()
}
