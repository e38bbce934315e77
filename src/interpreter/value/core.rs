use std::{convert::Infallible, fmt, str::FromStr};

use crate::util::num::{coerce_str, loose_str, parse_decimal};

/// Represents a runtime value in the interpreter.
///
/// Every expression evaluates to exactly one of these. There is no null
/// variant: an operation either yields a value or fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A text value.
    String(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison and logical operators.
    Boolean(bool),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl Value {
    /// Truthiness used by `and`, `or` and `not`.
    ///
    /// - Booleans pass through.
    /// - Numbers are truthy when non-zero.
    /// - Strings are truthy when non-empty.
    ///
    /// # Example
    /// ```
    /// use ruleval::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(-2.0).is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(Value::from("no").is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Numeric coercion used by arithmetic and ordering comparisons.
    ///
    /// Booleans become `1` or `0`. Strings are parsed as decimal numbers,
    /// and text that does not parse counts as `0` rather than failing.
    ///
    /// # Example
    /// ```
    /// use ruleval::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Boolean(true).to_number(), 1.0);
    /// assert_eq!(Value::from(" 2.5 ").to_number(), 2.5);
    /// assert_eq!(Value::from("abc").to_number(), 0.0);
    /// ```
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Boolean(b) => f64::from(u8::from(*b)),
            Self::String(s) => coerce_str(s),
        }
    }

    /// Loose equality used by `==` and `!=`.
    ///
    /// Values of the same kind compare directly. Mixed kinds compare as
    /// numbers, where booleans are `1`/`0`, blank strings are `0` and any
    /// other unparseable string never equals anything.
    ///
    /// # Example
    /// ```
    /// use ruleval::interpreter::value::core::Value;
    ///
    /// assert!(Value::Boolean(true).loose_eq(&Value::Number(1.0)));
    /// assert!(Value::from("1").loose_eq(&Value::Number(1.0)));
    /// assert!(!Value::from("abc").loose_eq(&Value::Number(0.0)));
    /// assert!(!Value::from("1").loose_eq(&Value::from("1.0")));
    /// ```
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            _ => self.loose_number() == other.loose_number(),
        }
    }

    fn loose_number(&self) -> f64 {
        match self {
            Self::String(s) => loose_str(s),
            _ => self.to_number(),
        }
    }

    /// Returns the number if the value is [`Value::Number`].
    ///
    /// No coercion happens here; see [`Value::to_number`] for that.
    ///
    /// # Example
    /// ```
    /// use ruleval::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.5).as_number(), Some(1.5));
    /// assert_eq!(Value::from("1.5").as_number(), None);
    /// ```
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text if the value is [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if the value is [`Value::Boolean`].
    ///
    /// # Example
    /// ```
    /// use ruleval::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Boolean(false).as_bool(), Some(false));
    /// assert_eq!(Value::Number(0.0).as_bool(), None);
    /// ```
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// Reads a literal the way a command-line binding is written.
///
/// `true` and `false` become booleans, decimal numbers become numbers and
/// anything else is kept as a string.
impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => parse_decimal(s).map_or_else(|| Self::String(s.to_owned()), Self::Number),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Value::Boolean(true), Value::Number(1.0), true)]
    #[case(Value::Boolean(false), Value::Number(0.0), true)]
    #[case(Value::Boolean(true), Value::Number(2.0), false)]
    #[case(Value::from("1"), Value::Number(1.0), true)]
    #[case(Value::from(""), Value::Number(0.0), true)]
    #[case(Value::from("1"), Value::Boolean(true), true)]
    #[case(Value::from("true"), Value::Boolean(true), false)]
    #[case(Value::from("a"), Value::from("a"), true)]
    #[case(Value::Number(f64::NAN), Value::Number(f64::NAN), false)]
    fn loose_equality(#[case] left: Value, #[case] right: Value, #[case] expected: bool) {
        assert_eq!(left.loose_eq(&right), expected);
        assert_eq!(right.loose_eq(&left), expected);
    }

    #[test]
    fn nan_is_truthy_because_it_is_nonzero() {
        assert!(Value::Number(f64::NAN).is_truthy());
    }

    #[rstest]
    #[case("true", Value::Boolean(true))]
    #[case("3.5", Value::Number(3.5))]
    #[case("-2", Value::Number(-2.0))]
    #[case("gold", Value::from("gold"))]
    fn parses_command_line_literals(#[case] text: &str, #[case] expected: Value) {
        assert_eq!(text.parse::<Value>(), Ok(expected));
    }

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::from("text").to_string(), "text");
    }

    #[test]
    fn accessors_do_not_coerce() {
        let text = Value::from("7");
        assert_eq!(text.as_str(), Some("7"));
        assert_eq!(text.as_number(), None);
        assert_eq!(Value::Boolean(true).as_str(), None);
        assert_eq!(Value::Number(1.0).as_bool(), None);
    }
}
