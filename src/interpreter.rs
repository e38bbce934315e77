/// The environment module describes what an expression can see.
///
/// Variables, constants and host functions are plain maps keyed by name. This
/// module defines those aliases, the [`Callable`](environment::Callable)
/// function type, and the merge step that layers variables over constants.
pub mod environment;
/// The evaluator module computes results straight from the token stream.
///
/// There is no intermediate tree: each precedence level is a method on
/// [`Evaluator`](evaluator::core::Evaluator) that consumes tokens and returns
/// a value. Errors are reported in the order the tokens are met.
///
/// # Responsibilities
/// - Applies operator precedence and associativity while evaluating.
/// - Resolves variables and calls host functions.
/// - Enforces the nesting limit and the strict and short-circuit modes.
pub mod evaluator;
/// The lexer module turns expression text into tokens.
///
/// # Responsibilities
/// - Recognises numbers, quoted strings, booleans, identifiers, operators,
///   parentheses and commas, each tagged with its byte offset.
/// - Folds a `-` directly before a digit into a negative literal when it
///   cannot be a binary minus.
/// - Skips unrecognised characters instead of failing.
pub mod lexer;
/// The value module defines the runtime [`Value`](value::core::Value) type and
/// its coercion rules.
pub mod value;
