use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during evaluation.
///
/// Every variant records the byte offset of the token that triggered it.
pub enum RuntimeError {
    /// Looked up a variable that is neither a variable nor a constant.
    #[error("Error at offset {offset}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name:   String,
        /// Byte offset of the identifier in the source.
        offset: usize,
    },
    /// Called a function that is not registered.
    #[error("Error at offset {offset}: Undefined function '{name}'.")]
    UndefinedFunction {
        /// The name of the function.
        name:   String,
        /// Byte offset of the identifier in the source.
        offset: usize,
    },
    /// A value was required but the cursor sits on an operator, a comma, a
    /// closing parenthesis or the end of input.
    #[error("Error at offset {offset}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// Description of the token encountered.
        token:  String,
        /// Byte offset of the token in the source.
        offset: usize,
    },
    /// Nesting went deeper than the configured limit.
    #[error("Error at offset {offset}: Expression nesting exceeds the limit of {limit}.")]
    DepthExceeded {
        /// The configured maximum depth.
        limit:  usize,
        /// Byte offset of the token where the limit was hit.
        offset: usize,
    },
    /// Strict mode: an opening parenthesis was never closed.
    #[error("Error at offset {offset}: Expected closing parenthesis ')' but none found.")]
    UnclosedParen {
        /// Byte offset where the closing parenthesis was expected.
        offset: usize,
    },
    /// Strict mode: tokens remain after a complete expression.
    #[error("Error at offset {offset}: Extra tokens after expression: {token}.")]
    TrailingTokens {
        /// Description of the first unconsumed token.
        token:  String,
        /// Byte offset of that token.
        offset: usize,
    },
}

impl RuntimeError {
    /// Byte offset in the source where the error was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UndefinedVariable { offset, .. }
            | Self::UndefinedFunction { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::DepthExceeded { offset, .. }
            | Self::UnclosedParen { offset }
            | Self::TrailingTokens { offset, .. } => *offset,
        }
    }
}
