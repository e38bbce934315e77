use thiserror::Error;

use crate::error::RuntimeError;

/// Failure of a whole expression evaluation.
///
/// Carries the original expression text next to the underlying
/// [`RuntimeError`], which stays reachable through
/// [`std::error::Error::source`].
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use ruleval::{error::RuntimeError, evaluate};
///
/// let err = evaluate("price * qty", &HashMap::new()).unwrap_err();
///
/// assert_eq!(err.expression(), "price * qty");
/// assert!(matches!(err.kind(), RuntimeError::UndefinedVariable { name, .. } if name == "price"));
/// assert_eq!(err.to_string(),
///            "Failed to evaluate expression \"price * qty\": Error at offset 0: Undefined variable 'price'.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to evaluate expression \"{expression}\": {source}")]
pub struct ExpressionError {
    expression: String,
    #[source]
    source:     RuntimeError,
}

impl ExpressionError {
    /// Wraps an evaluation failure with the expression that caused it.
    #[must_use]
    pub fn new(expression: impl Into<String>, source: RuntimeError) -> Self {
        Self { expression: expression.into(),
               source }
    }

    /// The expression text as it was given to the facade.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The underlying evaluation error.
    #[must_use]
    pub const fn kind(&self) -> &RuntimeError {
        &self.source
    }

    /// Consumes the wrapper and returns the underlying evaluation error.
    #[must_use]
    pub fn into_kind(self) -> RuntimeError {
        self.source
    }
}

/// A `name=value` binding given on the command line could not be split.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid binding '{input}': expected NAME=VALUE.")]
pub struct ParseVariableError {
    /// The rejected argument.
    pub input: String,
}
