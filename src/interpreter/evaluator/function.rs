/// Function-call dispatch and the standard function table.
///
/// Resolves call-form identifiers against the host's registry and exposes
/// [`core::standard_functions`], an opt-in table of common helpers.
pub mod core;

/// Numeric standard functions (`min`, `max`, `abs`, rounding, `sqrt`) and
/// the value-selecting `if`.
pub mod builtin;

/// Text standard functions (`len`, `upper`, `lower`).
pub mod text;
