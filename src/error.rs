/// Evaluation errors.
///
/// Contains every failure the evaluator can raise while walking a token
/// stream: unresolved names, tokens that cannot start a value, exceeded
/// nesting depth, and the strict-mode structural checks.
pub mod runtime_error;
/// Errors surfaced by the expression facade.
///
/// Wraps a [`RuntimeError`] together with the source text of the expression
/// that produced it, so callers get a self-contained diagnostic.
pub mod expression_error;

pub use expression_error::{ExpressionError, ParseVariableError};
pub use runtime_error::RuntimeError;
