/// Public token types produced by [`tokenize`].
pub mod token;

use std::ops::Range;

use logos::{Lexer, Logos};
use tracing::{trace, warn};

pub use token::{Arithmetic, Comparison, Operator, Token, TokenKind};

use crate::util::num::parse_literal;

/// Raw tokens as recognised by the generated scanner.
///
/// Negative literals are not fused here: the scanner has no notion of the
/// previous token, so [`tokenize`] performs that step afterwards.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    /// Numeric literal tokens such as `3`, `3.14` or `.5`.
    #[regex(r"[0-9.]+", |lex| parse_literal(lex.slice()))]
    Number(f64),
    /// Quoted strings, scanned by [`lex_quoted`].
    #[token("\"", |lex| lex_quoted(lex, '"'))]
    #[token("'", |lex| lex_quoted(lex, '\''))]
    String(String),
    /// `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Boolean(bool),
    /// Names, keywords and dotted paths.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*", |lex| lex.slice().to_owned())]
    Identifier(String),
    #[token("+", |_| Operator::Plus)]
    #[token("-", |_| Operator::Minus)]
    #[token("*", |_| Operator::Star)]
    #[token("/", |_| Operator::Slash)]
    #[token("%", |_| Operator::Percent)]
    #[token("==", |_| Operator::EqualEqual)]
    #[token("!=", |_| Operator::BangEqual)]
    #[token(">=", |_| Operator::GreaterEqual)]
    #[token("<=", |_| Operator::LessEqual)]
    #[token(">", |_| Operator::Greater)]
    #[token("<", |_| Operator::Less)]
    #[token("=", |_| Operator::Equals)]
    #[token("!", |_| Operator::Bang)]
    Operator(Operator),
    /// `(`
    #[token("(")]
    ParenOpen,
    /// `)`
    #[token(")")]
    ParenClose,
    /// `,`
    #[token(",")]
    Comma,
}

impl RawToken {
    fn into_kind(self) -> TokenKind {
        match self {
            Self::Number(n) => TokenKind::Number(n),
            Self::String(s) => TokenKind::String(s),
            Self::Boolean(b) => TokenKind::Boolean(b),
            Self::Identifier(name) => TokenKind::Identifier(name),
            Self::Operator(op) => TokenKind::Operator(op),
            Self::ParenOpen => TokenKind::ParenOpen,
            Self::ParenClose => TokenKind::ParenClose,
            Self::Comma => TokenKind::Comma,
        }
    }
}

/// Scans the body of a quoted string after its opening quote.
///
/// A backslash inserts the following character literally. A string with no
/// closing quote runs to the end of the input.
fn lex_quoted(lex: &mut Lexer<'_, RawToken>, quote: char) -> String {
    let mut text = String::new();
    let mut consumed = 0;
    let mut chars = lex.remainder().chars();

    while let Some(c) = chars.next() {
        consumed += c.len_utf8();
        if c == quote {
            break;
        }
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                consumed += escaped.len_utf8();
                text.push(escaped);
            }
            continue;
        }
        text.push(c);
    }

    lex.bump(consumed);
    text
}

/// Whether a `-` directly before a digit may be folded into a negative
/// literal, given the last token emitted so far.
const fn accepts_negative_literal(previous: Option<&Token>) -> bool {
    match previous {
        None => true,
        Some(token) => {
            matches!(token.kind,
                     TokenKind::ParenOpen | TokenKind::Operator(_) | TokenKind::Comma)
        },
    }
}

/// Converts source text into a token sequence.
///
/// Tokenization never fails. Unrecognised characters are reported through a
/// `tracing` warning and skipped, malformed numbers become `NaN`, and
/// unterminated strings end at the end of the input. The returned sequence
/// always ends with exactly one [`TokenKind::EndOfInput`].
///
/// Token offsets refer to the original `source`, including any leading
/// whitespace.
///
/// # Example
/// ```
/// use ruleval::interpreter::lexer::{Operator, TokenKind, tokenize};
///
/// let kinds: Vec<TokenKind> = tokenize("(-3) - 1").into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::ParenOpen,
///                 TokenKind::Number(-3.0),
///                 TokenKind::ParenClose,
///                 TokenKind::Operator(Operator::Minus),
///                 TokenKind::Number(1.0),
///                 TokenKind::EndOfInput]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let trimmed = source.trim();
    let base = source.len() - source.trim_start().len();

    let mut scanned: Vec<(RawToken, Range<usize>)> = Vec::new();
    let mut lexer = RawToken::lexer(trimmed);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => scanned.push((token, span)),
            Err(()) => {
                warn!(character = lexer.slice(),
                      offset = base + span.start,
                      "skipping unrecognized character");
            },
        }
    }

    let mut tokens: Vec<Token> = Vec::with_capacity(scanned.len() + 1);
    let mut stream = scanned.into_iter().peekable();

    while let Some((token, span)) = stream.next() {
        let offset = base + span.start;

        if token == RawToken::Operator(Operator::Minus)
           && accepts_negative_literal(tokens.last())
           && let Some((RawToken::Number(value), _)) = stream.next_if(|(next, next_span)| {
                  matches!(next, RawToken::Number(_))
                  && next_span.start == span.end
                  && trimmed[next_span.clone()].starts_with(|c: char| c.is_ascii_digit())
              })
        {
            tokens.push(Token::new(TokenKind::Number(-value), offset));
            continue;
        }

        tokens.push(Token::new(token.into_kind(), offset));
    }

    tokens.push(Token::new(TokenKind::EndOfInput, base + trimmed.len()));
    trace!(count = tokens.len(), "tokenized expression");

    tokens
}
