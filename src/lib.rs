//! # ruleval
//!
//! ruleval evaluates small, untrusted rule expressions such as
//! `user.age >= 18 and country == "NL"` against caller supplied variables,
//! without ever executing host code the caller did not register.
//!
//! Expressions support numbers, strings and booleans, arithmetic,
//! comparisons with loose equality, `and`/`or`/`not`, parentheses and calls to
//! registered host functions. Evaluation happens directly during parsing;
//! no syntax tree is built.
//!
//! # Example
//! ```
//! use std::collections::HashMap;
//!
//! use ruleval::{Expression, Value};
//!
//! let mut engine = Expression::with_standard_functions();
//! engine.add_constant("BASE_RATE", 5.0);
//!
//! let rule = engine.parse("BASE_RATE + max(0, weight - 1) * 2");
//! let vars = HashMap::from([("weight".to_owned(), Value::Number(3.0))]);
//!
//! assert_eq!(rule.evaluate(&vars).unwrap(), Value::Number(9.0));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Error types for evaluation failures.
///
/// [`RuntimeError`](error::RuntimeError) describes what went wrong and at which
/// byte offset; [`ExpressionError`](error::ExpressionError) adds the expression
/// text for reporting.
pub mod error;
/// The user facing entry points.
///
/// # Responsibilities
/// - Holds the constants and functions registries.
/// - Wraps expression text in reusable handles.
/// - Provides the one shot [`evaluate`] and [`compile`] helpers.
pub mod expression;
/// Tokenizing, evaluation, values and bindings.
pub mod interpreter;
/// Evaluation settings.
pub mod options;
/// Numeric parsing helpers shared by the lexer and value coercion.
pub mod util;

pub use crate::{
    error::{ExpressionError, ParseVariableError, RuntimeError},
    expression::{CompiledExpression, Expression, ParsedExpression, compile, evaluate},
    interpreter::{
        environment::{Callable, Constants, Functions, Variables, callable},
        evaluator::{
            core::{evaluate_tokens, evaluate_tokens_with},
            function::core::{STANDARD_FUNCTIONS, standard_functions},
        },
        lexer::{Arithmetic, Comparison, Operator, Token, TokenKind, tokenize},
        value::core::Value,
    },
    options::{DEFAULT_MAX_DEPTH, EvalOptions},
};
