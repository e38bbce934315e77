use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::{Functions, Variables},
        lexer::{Token, TokenKind},
        value::core::Value,
    },
    options::EvalOptions,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stands in for the end-of-input marker when a caller hands over a token
/// slice that lacks one.
static END_OF_INPUT: TokenKind = TokenKind::EndOfInput;

/// A single in-flight evaluation of a token sequence.
///
/// The evaluator parses by recursive descent with precedence climbing and
/// computes each subexpression the moment it is recognised. Its only mutable
/// state is the cursor into the token slice (plus depth bookkeeping), and
/// [`Evaluator::evaluate`] consumes it, so every evaluation starts from the
/// first token with a fresh cursor.
pub struct Evaluator<'a> {
    tokens:               &'a [Token],
    cursor:               usize,
    pub(super) variables: &'a Variables,
    pub(super) functions: &'a Functions,
    pub(super) options:   EvalOptions,
    depth:                usize,
    pub(super) skipping:  bool,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator with default options.
    ///
    /// `variables` must already contain any constants merged underneath it.
    #[must_use]
    pub fn new(tokens: &'a [Token], variables: &'a Variables, functions: &'a Functions) -> Self {
        Self::with_options(tokens, variables, functions, EvalOptions::default())
    }

    /// Creates an evaluator with explicit options.
    #[must_use]
    pub fn with_options(tokens: &'a [Token],
                        variables: &'a Variables,
                        functions: &'a Functions,
                        options: EvalOptions)
                        -> Self {
        Self { tokens,
               cursor: 0,
               variables,
               functions,
               options,
               depth: 0,
               skipping: false }
    }

    /// Evaluates the token sequence from its first token.
    ///
    /// Parsing stops after one complete top-level expression. Anything left
    /// over is ignored, unless strict mode is enabled, in which case it is
    /// reported as [`RuntimeError::TrailingTokens`].
    ///
    /// # Errors
    /// Returns the first failure met during the walk; there is no partial
    /// result.
    pub fn evaluate(mut self) -> EvalResult<Value> {
        let value = self.parse_or()?;

        if !self.at_end() {
            if self.options.strict {
                return Err(RuntimeError::TrailingTokens { token:  self.peek().to_string(),
                                                          offset: self.offset(), });
            }
            debug!(token = %self.peek(), offset = self.offset(), "ignoring trailing tokens");
        }

        Ok(value)
    }

    /// The token under the cursor.
    pub(super) fn peek(&self) -> &'a TokenKind {
        self.tokens
            .get(self.cursor)
            .map_or(&END_OF_INPUT, |token| &token.kind)
    }

    /// Byte offset of the token under the cursor.
    pub(super) fn offset(&self) -> usize {
        self.tokens.get(self.cursor).map_or_else(|| self.tokens.last().map_or(0, |t| t.offset),
                                                 |token| token.offset)
    }

    /// Moves the cursor forward by one token. The cursor never moves past
    /// the end-of-input marker.
    pub(super) fn advance(&mut self) {
        if !self.at_end() {
            self.cursor += 1;
        }
    }

    pub(super) fn at_end(&self) -> bool {
        matches!(self.peek(), TokenKind::EndOfInput)
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// Fails with [`RuntimeError::DepthExceeded`] once the configured
    /// maximum depth would be exceeded.
    pub(super) fn nested<T>(&mut self,
                            parse: impl FnOnce(&mut Self) -> EvalResult<T>)
                            -> EvalResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(RuntimeError::DepthExceeded { limit:  self.options.max_depth,
                                                     offset: self.offset(), });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Runs `parse` without side effects when `skip` is set.
    ///
    /// While skipping, identifiers and calls still consume their tokens but
    /// resolve to a placeholder instead of reading variables or invoking
    /// functions.
    pub(super) fn skipping_if<T>(&mut self,
                                 skip: bool,
                                 parse: impl FnOnce(&mut Self) -> EvalResult<T>)
                                 -> EvalResult<T> {
        let previous = self.skipping;
        self.skipping |= skip;
        let result = parse(self);
        self.skipping = previous;
        result
    }
}

/// Evaluates a token sequence against merged variables and a function
/// registry, using the default options.
///
/// # Errors
/// Returns the first [`RuntimeError`] met during evaluation.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use ruleval::interpreter::{
///     evaluator::core::evaluate_tokens, lexer::tokenize, value::core::Value,
/// };
///
/// let variables = HashMap::from([("x".to_owned(), Value::Number(4.0))]);
/// let tokens = tokenize("x * 2 + 1");
///
/// let value = evaluate_tokens(&tokens, &variables, &HashMap::new()).unwrap();
/// assert_eq!(value, Value::Number(9.0));
/// ```
pub fn evaluate_tokens(tokens: &[Token],
                       variables: &Variables,
                       functions: &Functions)
                       -> EvalResult<Value> {
    Evaluator::new(tokens, variables, functions).evaluate()
}

/// Like [`evaluate_tokens`], with explicit [`EvalOptions`].
///
/// # Errors
/// Returns the first [`RuntimeError`] met during evaluation.
pub fn evaluate_tokens_with(tokens: &[Token],
                            variables: &Variables,
                            functions: &Functions,
                            options: EvalOptions)
                            -> EvalResult<Value> {
    Evaluator::with_options(tokens, variables, functions, options).evaluate()
}
