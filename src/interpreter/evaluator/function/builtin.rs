use crate::interpreter::value::core::Value;

/// Reads argument `index` as a number, or `NaN` when it is missing.
fn number_arg(args: &[Value], index: usize) -> f64 {
    args.get(index).map_or(f64::NAN, Value::to_number)
}

/// Folds every argument through `pick` after numeric coercion.
///
/// With no arguments the result is `NaN`.
fn fold_numbers(args: &[Value], pick: fn(f64, f64) -> f64) -> Value {
    let value = args.iter()
                    .map(Value::to_number)
                    .reduce(pick)
                    .unwrap_or(f64::NAN);
    Value::Number(value)
}

/// Smallest of any number of arguments.
///
/// # Example
/// ```
/// use ruleval::interpreter::{evaluator::function::builtin::min, value::core::Value};
///
/// assert_eq!(min(&[Value::Number(3.0), Value::from("2"), Value::Boolean(true)]),
///            Value::Number(1.0));
/// ```
#[must_use]
pub fn min(args: &[Value]) -> Value {
    fold_numbers(args, f64::min)
}

/// Largest of any number of arguments.
///
/// # Example
/// ```
/// use ruleval::interpreter::{evaluator::function::builtin::max, value::core::Value};
///
/// assert_eq!(max(&[Value::Number(0.0), Value::Number(-0.5)]), Value::Number(0.0));
/// ```
#[must_use]
pub fn max(args: &[Value]) -> Value {
    fold_numbers(args, f64::max)
}

/// Applies a single-argument numeric function to the first argument.
///
/// A missing argument reads as `NaN`.
///
/// # Example
/// ```
/// use ruleval::interpreter::{evaluator::function::builtin::unary, value::core::Value};
///
/// assert_eq!(unary(&[Value::Number(2.5)], f64::round), Value::Number(3.0));
/// assert_eq!(unary(&[Value::from("-4")], f64::abs), Value::Number(4.0));
/// ```
#[must_use]
pub fn unary(args: &[Value], f: fn(f64) -> f64) -> Value {
    Value::Number(f(number_arg(args, 0)))
}

/// `if(condition, then, else)`: returns the second or third argument by the
/// truthiness of the first.
///
/// All three arguments have already been evaluated by the time this runs.
/// A missing branch yields `false`.
///
/// # Example
/// ```
/// use ruleval::interpreter::{evaluator::function::builtin::choose, value::core::Value};
///
/// let args = [Value::Number(0.0), Value::from("yes"), Value::from("no")];
/// assert_eq!(choose(&args), Value::from("no"));
/// ```
#[must_use]
pub fn choose(args: &[Value]) -> Value {
    let condition = args.first().is_some_and(Value::is_truthy);
    let branch = if condition { 1 } else { 2 };
    args.get(branch).cloned().unwrap_or(Value::Boolean(false))
}
