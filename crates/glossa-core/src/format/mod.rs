//! Positional-argument formatting of resolved message text.
//!
//! Message templates use printf-style specifiers (`%s`, `%d`, `%.2f`,
//! `%2$s`). Arguments are an ordered slice of [`FormatArg`] values so callers
//! state each value's type explicitly instead of relying on runtime type
//! inspection. A [`FormatArg::Null`] renders as the literal `null`.

mod printf;

use std::fmt;

use thiserror::Error;

pub use self::printf::{MAX_FIELD_WIDTH, PrintfFormatter};

/// A single positional value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Text.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// An absent value, rendered as `null`.
    Null,
}

impl FormatArg {
    /// Short type name used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&printf::plain_float(*value)),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FormatArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Errors raised when a template and its arguments do not fit together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A specifier refers to an argument that was not supplied.
    #[error("format specifier '{specifier}' has no matching argument")]
    MissingArgument {
        /// The specifier as written in the template.
        specifier: String,
    },

    /// The argument's type cannot be rendered by the conversion.
    #[error("format specifier '{specifier}' cannot convert a {found} argument")]
    IllegalConversion {
        /// The specifier as written in the template.
        specifier: String,
        /// Type name of the supplied argument.
        found: &'static str,
    },

    /// The conversion character is not recognised.
    #[error("unknown conversion '{conversion}' in format specifier '{specifier}'")]
    UnknownConversion {
        /// The specifier as written in the template.
        specifier: String,
        /// The unrecognised conversion character.
        conversion: char,
    },

    /// The specifier is syntactically incomplete or uses a bad index or
    /// precision.
    #[error("malformed format specifier '{specifier}'")]
    InvalidSpecifier {
        /// The specifier as written in the template.
        specifier: String,
    },

    /// The flags cannot be combined, or do not apply to the conversion.
    #[error("invalid flags in format specifier '{specifier}': {reason}")]
    InvalidFlags {
        /// The specifier as written in the template.
        specifier: String,
        /// Which rule the flags broke.
        reason: &'static str,
    },
}

/// Substitutes positional values into a template.
///
/// The registry defaults to [`PrintfFormatter`]; tests or applications may
/// inject another implementation through
/// [`Registry::with_formatter`](crate::Registry::with_formatter).
pub trait Formatter: Send + Sync {
    /// Renders `template` with `args`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when an argument is missing or has a type
    /// the template cannot render.
    fn format(&self, template: &str, args: &[FormatArg]) -> Result<String, FormatError>;
}
