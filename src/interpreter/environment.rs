use std::{collections::HashMap, sync::Arc};

use crate::interpreter::value::core::Value;

/// A host function callable from expressions.
///
/// Receives the evaluated arguments in call order. No arity check is made
/// before the call, so implementations should tolerate missing or extra
/// arguments.
pub type Callable = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Variable bindings, keyed by exact name.
pub type Variables = HashMap<String, Value>;

/// Constant bindings. Merged underneath [`Variables`] before evaluation.
pub type Constants = HashMap<String, Value>;

/// Function registry, keyed by exact name.
pub type Functions = HashMap<String, Callable>;

/// Wraps a closure as a [`Callable`].
///
/// # Example
/// ```
/// use ruleval::interpreter::{environment::callable, value::core::Value};
///
/// let double = callable(|args| Value::Number(args.first().map_or(0.0, Value::to_number) * 2.0));
///
/// assert_eq!(double(&[Value::Number(4.0)]), Value::Number(8.0));
/// ```
pub fn callable<F>(f: F) -> Callable
    where F: Fn(&[Value]) -> Value + Send + Sync + 'static
{
    Arc::new(f)
}

/// Merges constants and variables into the single map an evaluation reads.
///
/// Variables override constants of the same name.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use ruleval::interpreter::{environment::merge_bindings, value::core::Value};
///
/// let constants = HashMap::from([("rate".to_owned(), Value::Number(5.0)),
///                                ("cap".to_owned(), Value::Number(10.0))]);
/// let variables = HashMap::from([("rate".to_owned(), Value::Number(7.0))]);
///
/// let merged = merge_bindings(&constants, &variables);
///
/// assert_eq!(merged["rate"], Value::Number(7.0));
/// assert_eq!(merged["cap"], Value::Number(10.0));
/// ```
#[must_use]
pub fn merge_bindings(constants: &Constants, variables: &Variables) -> Variables {
    let mut merged = Variables::with_capacity(constants.len() + variables.len());
    merged.extend(constants.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged.extend(variables.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
