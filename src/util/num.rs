/// Returns `true` for characters that may appear in a plain decimal number.
///
/// Signs and exponents are accepted here so that numeric strings such as
/// `"-2.5"` or `"1e3"` coming from variables still coerce, even though the
/// lexer itself only ever produces `[0-9.]+` literals.
const fn is_decimal_char(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '+' | '-' | 'e' | 'E')
}

/// Parses trimmed text as a plain decimal `f64`.
///
/// Words that the standard library would otherwise accept (`inf`, `NaN`,
/// `infinity`) are rejected, as is empty text.
///
/// # Example
/// ```
/// use ruleval::util::num::parse_decimal;
///
/// assert_eq!(parse_decimal(" 12.5 "), Some(12.5));
/// assert_eq!(parse_decimal("-3"), Some(-3.0));
/// assert_eq!(parse_decimal("inf"), None);
/// assert_eq!(parse_decimal("1.2.3"), None);
/// assert_eq!(parse_decimal(""), None);
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(is_decimal_char) {
        return None;
    }
    text.parse().ok()
}

/// Parses the slice of a numeric literal token.
///
/// Literals match `[0-9.]+`, so anything the float parser rejects (multiple
/// dots, a lone `.`) becomes `NaN` instead of an error.
///
/// # Example
/// ```
/// use ruleval::util::num::parse_literal;
///
/// assert_eq!(parse_literal("42"), 42.0);
/// assert_eq!(parse_literal(".5"), 0.5);
/// assert_eq!(parse_literal("3."), 3.0);
/// assert!(parse_literal("1.2.3").is_nan());
/// assert!(parse_literal(".").is_nan());
/// ```
#[must_use]
pub fn parse_literal(slice: &str) -> f64 {
    parse_decimal(slice).unwrap_or(f64::NAN)
}

/// Converts a string to a number for arithmetic and ordering.
///
/// Unparseable text counts as `0`.
#[must_use]
pub fn coerce_str(text: &str) -> f64 {
    parse_decimal(text).unwrap_or(0.0)
}

/// Converts a string to a number for loose equality.
///
/// Blank text counts as `0`, and anything unparseable is `NaN` so that it
/// never compares equal to a number.
#[must_use]
pub fn loose_str(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    parse_decimal(text).unwrap_or(f64::NAN)
}
