use std::fmt;

/// Operators recognised by the lexer.
///
/// The two-character comparison operators are fused during scanning. `=` and
/// `!` on their own are still emitted as operators, although no grammar rule
/// consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// `=`
    Equals,
    /// `!`
    Bang,
}

impl Operator {
    /// The operator as it is written in source text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Equals => "=",
            Self::Bang => "!",
        }
    }

    /// Narrows the operator to an arithmetic one, if it is `+`, `-`, `*`,
    /// `/` or `%`.
    ///
    /// # Example
    /// ```
    /// use ruleval::interpreter::lexer::{Arithmetic, Operator};
    ///
    /// assert_eq!(Operator::Percent.as_arithmetic(), Some(Arithmetic::Remainder));
    /// assert_eq!(Operator::Less.as_arithmetic(), None);
    /// ```
    #[must_use]
    pub const fn as_arithmetic(self) -> Option<Arithmetic> {
        match self {
            Self::Plus => Some(Arithmetic::Add),
            Self::Minus => Some(Arithmetic::Subtract),
            Self::Star => Some(Arithmetic::Multiply),
            Self::Slash => Some(Arithmetic::Divide),
            Self::Percent => Some(Arithmetic::Remainder),
            _ => None,
        }
    }

    /// Narrows the operator to a comparison, if it is `==`, `!=`, `>`, `<`,
    /// `>=` or `<=`.
    #[must_use]
    pub const fn as_comparison(self) -> Option<Comparison> {
        match self {
            Self::EqualEqual => Some(Comparison::Equal),
            Self::BangEqual => Some(Comparison::NotEqual),
            Self::Greater => Some(Comparison::Greater),
            Self::Less => Some(Comparison::Less),
            Self::GreaterEqual => Some(Comparison::GreaterEqual),
            Self::LessEqual => Some(Comparison::LessEqual),
            _ => None,
        }
    }
}

/// Operators of the additive and multiplicative levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arithmetic {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Remainder,
}

impl Arithmetic {
    /// Whether the operator binds at the additive level (`+`, `-`) rather
    /// than the multiplicative one.
    #[must_use]
    pub const fn is_additive(self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }
}

/// Operators of the comparison level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind and payload of a lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal, already negated when a leading `-` was fused into it.
    Number(f64),
    /// String literal with quotes removed and escapes resolved.
    String(String),
    /// `true` or `false`.
    Boolean(bool),
    /// Names, keywords (`and`, `or`, `not`) and dotted paths such as
    /// `user.name`.
    Identifier(String),
    /// Arithmetic or comparison operator.
    Operator(Operator),
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `,`
    Comma,
    /// Marks the end of the token stream. Always the last token.
    EndOfInput,
}

impl TokenKind {
    /// Returns `true` if this token is the identifier `keyword`.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::Identifier(name) if name == keyword)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::String(s) => write!(f, "string {s:?}"),
            Self::Boolean(b) => write!(f, "boolean {b}"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Operator(op) => write!(f, "operator '{op}'"),
            Self::ParenOpen => f.write_str("'('"),
            Self::ParenClose => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// A lexical token together with the byte offset where it starts in the
/// source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was scanned.
    pub kind:   TokenKind,
    /// Byte offset of the first character of the token in the original
    /// (untrimmed) source.
    pub offset: usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub const fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}
