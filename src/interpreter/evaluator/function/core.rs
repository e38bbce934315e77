use std::sync::Arc;

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::{Callable, Functions},
        evaluator::{
            core::{EvalResult, Evaluator},
            function::{builtin, text},
        },
        value::core::Value,
    },
};

/// Signature of a standard function.
///
/// Standard functions receive the evaluated arguments and never fail.
type BuiltinFn = fn(&[Value]) -> Value;

/// Defines the standard functions by generating a lookup table and a name
/// list.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table used to build a registry),
/// - `STANDARD_FUNCTIONS` (public list of function names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $func:expr
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name: &'static str,
            func: BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, func: $func },
            )*
        ];
        /// Names of every function registered by [`standard_functions`].
        pub const STANDARD_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "min"   => builtin::min,
    "max"   => builtin::max,
    "abs"   => |args| builtin::unary(args, f64::abs),
    "floor" => |args| builtin::unary(args, f64::floor),
    "ceil"  => |args| builtin::unary(args, f64::ceil),
    "round" => |args| builtin::unary(args, f64::round),
    "sqrt"  => |args| builtin::unary(args, f64::sqrt),
    "if"    => builtin::choose,
    "len"   => text::len,
    "upper" => text::upper,
    "lower" => text::lower,
}

/// Builds a registry holding every standard function.
///
/// The registry is an ordinary [`Functions`] map, so hosts may add to it,
/// remove entries or override them with their own callables.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use ruleval::interpreter::{
///     evaluator::{core::evaluate_tokens, function::core::standard_functions},
///     lexer::tokenize,
///     value::core::Value,
/// };
///
/// let functions = standard_functions();
/// let tokens = tokenize("max(1, 7, 3) + len('abc')");
///
/// let value = evaluate_tokens(&tokens, &HashMap::new(), &functions).unwrap();
/// assert_eq!(value, Value::Number(10.0));
/// ```
#[must_use]
pub fn standard_functions() -> Functions {
    BUILTIN_TABLE.iter()
                 .map(|def| {
                     let func = def.func;
                     let callable: Callable = Arc::new(func);
                     (def.name.to_owned(), callable)
                 })
                 .collect()
}

impl Evaluator<'_> {
    /// Invokes a host function with already-evaluated arguments.
    ///
    /// Arguments are evaluated before the name is resolved, so an undefined
    /// variable inside the argument list is reported ahead of an undefined
    /// function. No arity check is made.
    ///
    /// # Errors
    /// `UndefinedFunction` if the name is not registered.
    pub(in crate::interpreter::evaluator) fn call_function(&self,
                                                           name: &str,
                                                           arguments: &[Value],
                                                           offset: usize)
                                                           -> EvalResult<Value> {
        if self.skipping {
            return Ok(Value::Boolean(false));
        }

        let function =
            self.functions
                .get(name)
                .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_owned(),
                                                                 offset })?;

        Ok(function(arguments))
    }
}
