//! printf-style template rendering.

use std::iter::Peekable;
use std::str::Chars;

use super::{FormatArg, FormatError, Formatter};

const CONVERSIONS: &str = "sSdxXofeEbBcn%";

/// Largest width or precision a specifier may request.
pub const MAX_FIELD_WIDTH: usize = 10_000;

/// Formatter implementing printf-style positional substitution.
///
/// Specifiers follow `%[index$][flags][width][.precision]conversion`:
///
/// - `index$` picks a one-based argument explicitly, `%<s` reuses the
///   previous one, and plain specifiers consume arguments in order.
/// - Flags are `-` (left-justify), `0` (zero-pad), `+`, space and `,`
///   (digit grouping).
/// - Conversions are `s`/`S`, `d`, `x`/`X`, `o`, `f`, `e`/`E`, `b`/`B`, `c`,
///   `n` and `%`.
///
/// Integer conversions only accept [`FormatArg::Int`] and floating-point
/// conversions only accept [`FormatArg::Float`]. [`FormatArg::Null`] renders
/// as `null` under every conversion except `b`, where it reads `false`.
/// Surplus arguments are ignored. Widths and precisions above
/// [`MAX_FIELD_WIDTH`] are rejected as invalid specifiers.
///
/// # Example
///
/// ```
/// use glossa_core::{FormatArg, Formatter, PrintfFormatter};
///
/// let formatter = PrintfFormatter::new();
/// let text = formatter
///     .format("%2$s owes %1$,d coins", &[FormatArg::Int(12_500), "Ada".into()])
///     .expect("template and arguments agree");
/// assert_eq!(text, "Ada owes 12,500 coins");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintfFormatter;

impl PrintfFormatter {
    /// Creates a formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for PrintfFormatter {
    fn format(&self, template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
        let mut output = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        let mut next_ordinal = 0_usize;
        let mut previous: Option<usize> = None;

        while let Some(ch) = chars.next() {
            if ch != '%' {
                output.push(ch);
                continue;
            }

            let spec = Specifier::parse(&mut chars)?;
            match spec.conversion {
                '%' => {
                    output.push_str(&spec.justify(String::from("%")));
                    continue;
                }
                'n' => {
                    output.push('\n');
                    continue;
                }
                _ => {}
            }

            let position = match spec.index {
                ArgIndex::Next => {
                    let position = next_ordinal;
                    next_ordinal += 1;
                    position
                }
                ArgIndex::Explicit(position) => position,
                ArgIndex::Previous => previous.ok_or_else(|| spec.missing_argument())?,
            };
            let arg = args.get(position).ok_or_else(|| spec.missing_argument())?;
            previous = Some(position);
            output.push_str(&spec.render(arg)?);
        }

        Ok(output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgIndex {
    Next,
    /// Zero-based.
    Explicit(usize),
    Previous,
}

#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    group: bool,
}

impl Flags {
    const fn any(self) -> bool {
        self.left || self.zero || self.plus || self.space || self.group
    }
}

#[derive(Debug)]
struct Specifier {
    raw: String,
    index: ArgIndex,
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

impl Specifier {
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Result<Self, FormatError> {
        let mut raw = String::from("%");
        let mut index = ArgIndex::Next;
        let mut flags = Flags::default();
        let width;

        let leading = take_digits(chars, &mut raw);
        if !leading.is_empty() && chars.peek() == Some(&'$') {
            chars.next();
            raw.push('$');
            let position = parse_count(&leading, &raw)?;
            if position == 0 {
                return Err(FormatError::InvalidSpecifier { specifier: raw });
            }
            index = ArgIndex::Explicit(position - 1);
            take_flags(chars, &mut raw, &mut flags);
            width = take_width(chars, &mut raw)?;
        } else if leading.is_empty() {
            if chars.peek() == Some(&'<') {
                chars.next();
                raw.push('<');
                index = ArgIndex::Previous;
            }
            take_flags(chars, &mut raw, &mut flags);
            width = take_width(chars, &mut raw)?;
        } else {
            // A bare digit run is a width, optionally led by the zero flag.
            let digits = leading.trim_start_matches('0');
            flags.zero = digits.len() != leading.len();
            width = if digits.is_empty() {
                // Only zeros so far: further flags and the width may follow.
                take_flags(chars, &mut raw, &mut flags);
                take_width(chars, &mut raw)?
            } else {
                Some(parse_field(digits, &raw)?)
            };
        }

        let precision = if chars.peek() == Some(&'.') {
            chars.next();
            raw.push('.');
            let digits = take_digits(chars, &mut raw);
            if digits.is_empty() {
                return Err(FormatError::InvalidSpecifier { specifier: raw });
            }
            Some(parse_field(&digits, &raw)?)
        } else {
            None
        };

        let Some(conversion) = chars.next() else {
            return Err(FormatError::InvalidSpecifier { specifier: raw });
        };
        raw.push(conversion);

        let spec = Self {
            raw,
            index,
            flags,
            width,
            precision,
            conversion,
        };
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), FormatError> {
        let conversion = self.conversion;
        if !CONVERSIONS.contains(conversion) {
            return Err(FormatError::UnknownConversion {
                specifier: self.raw.clone(),
                conversion,
            });
        }

        let flags = self.flags;
        let numeric = matches!(conversion, 'd' | 'x' | 'X' | 'o' | 'f' | 'e' | 'E');
        let signed = matches!(conversion, 'd' | 'f' | 'e' | 'E');

        if conversion == 'n' && (flags.any() || self.width.is_some()) {
            return Err(self.bad_flags("'%n' takes no flags or width"));
        }
        if flags.left && flags.zero {
            return Err(self.bad_flags("'-' and '0' cannot be combined"));
        }
        if flags.plus && flags.space {
            return Err(self.bad_flags("'+' and ' ' cannot be combined"));
        }
        if (flags.left || flags.zero) && self.width.is_none() {
            return Err(self.bad_flags("'-' and '0' require a width"));
        }
        if flags.zero && !numeric {
            return Err(self.bad_flags("'0' applies only to numeric conversions"));
        }
        if (flags.plus || flags.space) && !signed {
            return Err(self.bad_flags("'+' and ' ' apply only to signed conversions"));
        }
        if flags.group && !matches!(conversion, 'd' | 'f') {
            return Err(self.bad_flags("',' applies only to 'd' and 'f'"));
        }
        if self.precision.is_some() && matches!(conversion, 'd' | 'x' | 'X' | 'o' | 'c' | 'n' | '%')
        {
            return Err(FormatError::InvalidSpecifier {
                specifier: self.raw.clone(),
            });
        }
        Ok(())
    }

    fn render(&self, arg: &FormatArg) -> Result<String, FormatError> {
        let body = match (self.conversion, arg) {
            ('b' | 'B', _) => {
                let truth = match arg {
                    FormatArg::Null => false,
                    FormatArg::Bool(value) => *value,
                    _ => true,
                };
                self.truncate(truth.to_string())
            }
            (_, FormatArg::Null) => self.truncate(String::from("null")),
            ('s' | 'S', _) => self.truncate(arg.to_string()),
            ('c', _) => self.character(arg)?,
            ('d', FormatArg::Int(value)) => {
                let digits = value.unsigned_abs().to_string();
                return Ok(self.numeric(*value < 0, self.grouped(&digits)));
            }
            ('x', FormatArg::Int(value)) => return Ok(self.numeric(false, format!("{value:x}"))),
            ('X', FormatArg::Int(value)) => return Ok(self.numeric(false, format!("{value:X}"))),
            ('o', FormatArg::Int(value)) => return Ok(self.numeric(false, format!("{value:o}"))),
            ('f', FormatArg::Float(value)) => return Ok(self.fixed(*value)),
            ('e' | 'E', FormatArg::Float(value)) => return Ok(self.scientific(*value)),
            _ => return Err(self.illegal(arg)),
        };

        let cased = if matches!(self.conversion, 'S' | 'B') {
            body.to_uppercase()
        } else {
            body
        };
        Ok(self.justify(cased))
    }

    fn character(&self, arg: &FormatArg) -> Result<String, FormatError> {
        let ch = match arg {
            FormatArg::Str(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => None,
                }
            }
            FormatArg::Int(code) => u32::try_from(*code).ok().and_then(char::from_u32),
            _ => None,
        };
        ch.map(String::from).ok_or_else(|| self.illegal(arg))
    }

    fn fixed(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.non_finite(value);
        }
        let precision = self.precision.unwrap_or(6);
        let text = format!("{:.precision$}", value.abs());
        let body = match text.split_once('.') {
            Some((whole, fraction)) => format!("{}.{fraction}", self.grouped(whole)),
            None => self.grouped(&text),
        };
        self.numeric(value.is_sign_negative(), body)
    }

    fn scientific(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.non_finite(value);
        }
        let precision = self.precision.unwrap_or(6);
        let text = format!("{:.precision$e}", value.abs());
        let (mantissa, exponent_text) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let exponent: i32 = exponent_text.parse().unwrap_or_default();
        let sign = if exponent < 0 { '-' } else { '+' };
        let body = format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
        let cased = if self.conversion == 'E' {
            body.to_uppercase()
        } else {
            body
        };
        self.numeric(value.is_sign_negative(), cased)
    }

    fn non_finite(&self, value: f64) -> String {
        let text = if value.is_nan() {
            String::from("NaN")
        } else {
            format!("{}Infinity", self.sign(value.is_sign_negative()))
        };
        self.justify(text)
    }

    fn numeric(&self, negative: bool, digits: String) -> String {
        let sign = self.sign(negative);
        if self.flags.zero {
            let used = sign.len() + digits.chars().count();
            let padding = "0".repeat(self.width.unwrap_or(0).saturating_sub(used));
            format!("{sign}{padding}{digits}")
        } else {
            self.justify(format!("{sign}{digits}"))
        }
    }

    const fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        }
    }

    fn grouped(&self, digits: &str) -> String {
        if self.flags.group {
            group_thousands(digits)
        } else {
            digits.to_owned()
        }
    }

    fn truncate(&self, text: String) -> String {
        match self.precision {
            Some(limit) => text.chars().take(limit).collect(),
            None => text,
        }
    }

    fn justify(&self, text: String) -> String {
        let Some(width) = self.width else {
            return text;
        };
        let length = text.chars().count();
        if length >= width {
            return text;
        }
        let padding = " ".repeat(width - length);
        if self.flags.left {
            format!("{text}{padding}")
        } else {
            format!("{padding}{text}")
        }
    }

    fn missing_argument(&self) -> FormatError {
        FormatError::MissingArgument {
            specifier: self.raw.clone(),
        }
    }

    fn illegal(&self, arg: &FormatArg) -> FormatError {
        FormatError::IllegalConversion {
            specifier: self.raw.clone(),
            found: arg.type_name(),
        }
    }

    fn bad_flags(&self, reason: &'static str) -> FormatError {
        FormatError::InvalidFlags {
            specifier: self.raw.clone(),
            reason,
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>, raw: &mut String) -> String {
    let mut digits = String::new();
    while let Some(&ch) = chars.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        digits.push(ch);
        raw.push(ch);
        chars.next();
    }
    digits
}

fn take_flags(chars: &mut Peekable<Chars<'_>>, raw: &mut String, flags: &mut Flags) {
    while let Some(&ch) = chars.peek() {
        let slot = match ch {
            '-' => &mut flags.left,
            '0' => &mut flags.zero,
            '+' => &mut flags.plus,
            ' ' => &mut flags.space,
            ',' => &mut flags.group,
            _ => break,
        };
        *slot = true;
        raw.push(ch);
        chars.next();
    }
}

fn take_width(
    chars: &mut Peekable<Chars<'_>>,
    raw: &mut String,
) -> Result<Option<usize>, FormatError> {
    let digits = take_digits(chars, raw);
    if digits.is_empty() {
        Ok(None)
    } else {
        parse_field(&digits, raw).map(Some)
    }
}

fn parse_count(digits: &str, raw: &str) -> Result<usize, FormatError> {
    digits
        .parse()
        .map_err(|_| FormatError::InvalidSpecifier {
            specifier: raw.to_owned(),
        })
}

fn parse_field(digits: &str, raw: &str) -> Result<usize, FormatError> {
    let count = parse_count(digits, raw)?;
    if count > MAX_FIELD_WIDTH {
        return Err(FormatError::InvalidSpecifier {
            specifier: raw.to_owned(),
        });
    }
    Ok(count)
}

fn group_thousands(digits: &str) -> String {
    let mut reversed = String::with_capacity(digits.len().saturating_mul(2));
    for (position, ch) in digits.chars().rev().enumerate() {
        if position > 0 && position.is_multiple_of(3) {
            reversed.push(',');
        }
        reversed.push(ch);
    }
    reversed.chars().rev().collect()
}

/// Renders a float the way `%s` shows it.
///
/// Magnitudes from `1e-3` up to `1e7` print as plain decimals with at least
/// one fractional digit. Anything else uses the shortest mantissa with an
/// upper-case exponent, as in `1.0E7` or `2.5E-4`. Non-finite values print
/// as `NaN` and `Infinity`.
pub(super) fn plain_float(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            String::from("-Infinity")
        } else {
            String::from("Infinity")
        };
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return if value.fract() == 0.0 {
            format!("{value:.1}")
        } else {
            format!("{value}")
        };
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{mantissa}E{exponent}")
        }
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}
