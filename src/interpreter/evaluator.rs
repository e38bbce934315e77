/// Cursor management, depth accounting and the evaluator entry points.
pub mod core;

/// The binary precedence levels: `or`, `and`, comparison, additive and
/// multiplicative.
///
/// Each level evaluates its operands as soon as they are recognised and
/// applies the operator immediately, so no tree is ever built.
pub mod binary;

/// Prefix `not` and primary expressions: literals, parenthesised groups,
/// variable lookups and function calls.
pub mod unary;

/// Host function invocation and the optional standard function table.
pub mod function;
