use crate::interpreter::value::core::Value;

/// Renders the first argument as text; missing arguments are empty.
fn text_arg(args: &[Value]) -> String {
    args.first().map(ToString::to_string).unwrap_or_default()
}

/// Number of characters in the first argument's text form.
///
/// # Example
/// ```
/// use ruleval::interpreter::{evaluator::function::text::len, value::core::Value};
///
/// assert_eq!(len(&[Value::from("héllo")]), Value::Number(5.0));
/// assert_eq!(len(&[Value::Number(120.0)]), Value::Number(3.0));
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn len(args: &[Value]) -> Value {
    Value::Number(text_arg(args).chars().count() as f64)
}

/// Upper-cased text form of the first argument.
#[must_use]
pub fn upper(args: &[Value]) -> Value {
    Value::String(text_arg(args).to_uppercase())
}

/// Lower-cased text form of the first argument.
#[must_use]
pub fn lower(args: &[Value]) -> Value {
    Value::String(text_arg(args).to_lowercase())
}
