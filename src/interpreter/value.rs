/// Runtime values and the coercion rules between them.
///
/// Defines [`core::Value`] together with truthiness, numeric coercion and
/// loose equality, which the evaluator applies at the operator levels that
/// require them.
pub mod core;
