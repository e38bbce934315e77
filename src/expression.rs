use tracing::debug;

use crate::{
    error::ExpressionError,
    interpreter::{
        environment::{Callable, Constants, Functions, Variables, merge_bindings},
        evaluator::{core::Evaluator, function::core::standard_functions},
        lexer::{Token, tokenize},
        value::core::Value,
    },
    options::EvalOptions,
};

/// A registry of constants and functions that expressions are evaluated
/// against.
///
/// Register everything first, then [`parse`](Self::parse) expressions.
/// Parsed handles borrow the registry, so it cannot change while one of them
/// is alive, and any later change is seen by handles created afterwards.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use ruleval::{Expression, Value, callable};
///
/// let mut engine = Expression::new();
/// engine.add_constant("BASE_RATE", 5.0)
///       .add_function("max",
///                     callable(|args| {
///                         let a = args.first().map_or(f64::NAN, Value::to_number);
///                         let b = args.get(1).map_or(f64::NAN, Value::to_number);
///                         Value::Number(a.max(b))
///                     }));
///
/// let rule = engine.parse("BASE_RATE + max(0, weight - 1) * 2");
///
/// let light = HashMap::from([("weight".to_owned(), Value::Number(0.5))]);
/// let heavy = HashMap::from([("weight".to_owned(), Value::Number(3.0))]);
///
/// assert_eq!(rule.evaluate(&light).unwrap(), Value::Number(5.0));
/// assert_eq!(rule.evaluate(&heavy).unwrap(), Value::Number(9.0));
/// ```
#[derive(Clone, Default)]
pub struct Expression {
    constants: Constants,
    functions: Functions,
    options:   EvalOptions,
}

impl Expression {
    /// Creates an empty registry with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the standard functions (`min`,
    /// `max`, `abs`, `floor`, `ceil`, `round`, `sqrt`, `if`, `len`, `upper`,
    /// `lower`).
    #[must_use]
    pub fn with_standard_functions() -> Self {
        Self { functions: standard_functions(),
               ..Self::default() }
    }

    /// Replaces the evaluation options.
    #[must_use]
    pub const fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers or replaces a constant.
    pub fn add_constant(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    /// Registers or replaces a function.
    pub fn add_function(&mut self, name: impl Into<String>, function: Callable) -> &mut Self {
        self.functions.insert(name.into(), function);
        self
    }

    /// The registered constants.
    ///
    /// # Example
    /// ```
    /// use ruleval::{Expression, Value};
    ///
    /// let mut engine = Expression::new();
    /// engine.add_constant("RATE", 2.5);
    ///
    /// assert_eq!(engine.constants().get("RATE"), Some(&Value::Number(2.5)));
    /// ```
    #[must_use]
    pub const fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Mutable access to the constants, for bulk edits.
    pub const fn constants_mut(&mut self) -> &mut Constants {
        &mut self.constants
    }

    /// The registered functions.
    ///
    /// # Example
    /// ```
    /// use ruleval::{Expression, STANDARD_FUNCTIONS};
    ///
    /// assert!(Expression::new().functions().is_empty());
    /// assert_eq!(Expression::with_standard_functions().functions().len(),
    ///            STANDARD_FUNCTIONS.len());
    /// ```
    #[must_use]
    pub const fn functions(&self) -> &Functions {
        &self.functions
    }

    /// Mutable access to the functions, for bulk edits.
    pub const fn functions_mut(&mut self) -> &mut Functions {
        &mut self.functions
    }

    /// The current evaluation options.
    ///
    /// # Example
    /// ```
    /// use ruleval::{EvalOptions, Expression};
    ///
    /// let engine = Expression::new().with_options(EvalOptions::default().with_strict(true));
    ///
    /// assert!(engine.options().strict);
    /// assert_eq!(Expression::new().options(), EvalOptions::default());
    /// ```
    #[must_use]
    pub const fn options(&self) -> EvalOptions {
        self.options
    }

    /// Wraps expression text in a reusable handle.
    ///
    /// Nothing is tokenized yet; each [`ParsedExpression::evaluate`] call
    /// tokenizes the text again.
    #[must_use]
    pub fn parse(&self, expression: impl Into<String>) -> ParsedExpression<'_> {
        ParsedExpression { engine:     self,
                           expression: expression.into(), }
    }

    /// Parses and evaluates an expression in one step.
    ///
    /// # Errors
    /// Returns an [`ExpressionError`] wrapping the first evaluation failure.
    pub fn evaluate(&self, expression: &str, variables: &Variables) -> Result<Value, ExpressionError> {
        self.parse(expression).evaluate(variables)
    }
}

/// An expression bound to an [`Expression`] registry.
///
/// Every evaluation re-tokenizes the stored text and runs a fresh evaluator
/// over it, so evaluations never share state.
#[derive(Clone)]
pub struct ParsedExpression<'e> {
    engine:     &'e Expression,
    expression: String,
}

impl ParsedExpression<'_> {
    /// The expression text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.expression
    }

    /// Evaluates the expression with the given variables.
    ///
    /// An empty expression evaluates to `true`. Variables override constants
    /// of the same name.
    ///
    /// # Errors
    /// Returns an [`ExpressionError`] carrying the expression text and the
    /// underlying [`RuntimeError`](crate::error::RuntimeError).
    pub fn evaluate(&self, variables: &Variables) -> Result<Value, ExpressionError> {
        if self.expression.is_empty() {
            return Ok(Value::Boolean(true));
        }

        debug!(expression = %self.expression, "evaluating expression");

        let bindings = merge_bindings(&self.engine.constants, variables);
        let tokens = tokenize(&self.expression);

        Evaluator::with_options(&tokens, &bindings, &self.engine.functions, self.engine.options)
            .evaluate()
            .map_err(|source| ExpressionError::new(self.expression.clone(), source))
    }
}

/// A pre-tokenized expression with no functions or constants.
///
/// The tokens are produced once by [`compile`]. Each call to
/// [`evaluate`](Self::evaluate) walks them again from the first token with a
/// fresh evaluator; no parse structure or result is kept between calls.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use ruleval::{Value, compile};
///
/// let rule = compile("qty * price > 100");
///
/// let small = HashMap::from([("qty".to_owned(), Value::Number(2.0)),
///                            ("price".to_owned(), Value::Number(10.0))]);
/// let large = HashMap::from([("qty".to_owned(), Value::Number(20.0)),
///                            ("price".to_owned(), Value::Number(10.0))]);
///
/// assert_eq!(rule.evaluate(&small).unwrap(), Value::Boolean(false));
/// assert_eq!(rule.evaluate(&large).unwrap(), Value::Boolean(true));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    expression: String,
    tokens:     Vec<Token>,
    options:    EvalOptions,
}

impl CompiledExpression {
    /// The expression text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.expression
    }

    /// The token sequence produced at compile time.
    ///
    /// # Example
    /// ```
    /// use ruleval::{TokenKind, compile};
    ///
    /// let rule = compile("a >= -1");
    /// let kinds: Vec<&TokenKind> = rule.tokens().iter().map(|t| &t.kind).collect();
    ///
    /// assert_eq!(kinds.len(), 4);
    /// assert_eq!(kinds[2], &TokenKind::Number(-1.0));
    /// assert_eq!(kinds[3], &TokenKind::EndOfInput);
    /// ```
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Replaces the evaluation options.
    #[must_use]
    pub const fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    /// Evaluates the compiled tokens with the given variables.
    ///
    /// # Errors
    /// Returns an [`ExpressionError`] wrapping the first evaluation failure.
    pub fn evaluate(&self, variables: &Variables) -> Result<Value, ExpressionError> {
        if self.expression.is_empty() {
            return Ok(Value::Boolean(true));
        }

        let functions = Functions::new();
        Evaluator::with_options(&self.tokens, variables, &functions, self.options)
            .evaluate()
            .map_err(|source| ExpressionError::new(self.expression.clone(), source))
    }
}

/// Evaluates an expression with the given variables and no functions or
/// constants.
///
/// # Errors
/// Returns an [`ExpressionError`] wrapping the first evaluation failure.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use ruleval::{Value, evaluate};
///
/// assert_eq!(evaluate("2 + 3 * 4", &HashMap::new()).unwrap(), Value::Number(14.0));
/// assert_eq!(evaluate("", &HashMap::new()).unwrap(), Value::Boolean(true));
/// ```
pub fn evaluate(expression: &str, variables: &Variables) -> Result<Value, ExpressionError> {
    Expression::new().evaluate(expression, variables)
}

/// Tokenizes an expression once for repeated evaluation.
#[must_use]
pub fn compile(expression: &str) -> CompiledExpression {
    CompiledExpression { expression: expression.to_owned(),
                         tokens:     tokenize(expression),
                         options:    EvalOptions::default(), }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RuntimeError, interpreter::environment::callable};

    fn vars(pairs: &[(&str, Value)]) -> Variables {
        pairs.iter()
             .map(|(name, value)| ((*name).to_owned(), value.clone()))
             .collect()
    }

    #[test]
    fn variables_override_constants() {
        let mut engine = Expression::new();
        engine.add_constant("limit", 10.0);

        let rule = engine.parse("limit * 2");
        assert_eq!(rule.evaluate(&Variables::new()), Ok(Value::Number(20.0)));
        assert_eq!(rule.evaluate(&vars(&[("limit", Value::Number(1.0))])),
                   Ok(Value::Number(2.0)));
    }

    #[test]
    fn registry_changes_are_seen_by_new_handles() {
        let mut engine = Expression::new();
        assert!(engine.evaluate("twice(2)", &Variables::new()).is_err());

        engine.add_function("twice",
                            callable(|args| Value::Number(args[0].to_number() * 2.0)));
        assert_eq!(engine.evaluate("twice(2)", &Variables::new()),
                   Ok(Value::Number(4.0)));

        engine.functions_mut().remove("twice");
        assert!(engine.evaluate("twice(2)", &Variables::new()).is_err());
    }

    #[test]
    fn errors_carry_the_expression_text() {
        let err = evaluate("x + y", &Variables::new()).unwrap_err();
        assert_eq!(err.expression(), "x + y");
        assert_eq!(err.kind(),
                   &RuntimeError::UndefinedVariable { name:   "x".to_owned(),
                                                      offset: 0, });
    }

    #[test]
    fn whitespace_only_expressions_are_not_empty() {
        let err = evaluate("   ", &Variables::new()).unwrap_err();
        assert!(matches!(err.kind(), RuntimeError::UnexpectedToken { .. }));
        assert_eq!(compile("").evaluate(&Variables::new()), Ok(Value::Boolean(true)));
    }

    #[test]
    fn options_flow_through_the_facade() {
        let strict = Expression::new().with_options(EvalOptions::default().with_strict(true));
        let err = strict.evaluate("(1", &Variables::new()).unwrap_err();
        assert_eq!(err.kind(), &RuntimeError::UnclosedParen { offset: 2 });

        let compiled = compile("1 2").with_options(EvalOptions::default().with_strict(true));
        assert!(matches!(compiled.evaluate(&Variables::new()).map_err(ExpressionError::into_kind),
                         Err(RuntimeError::TrailingTokens { .. })));
    }

    #[test]
    fn standard_functions_are_opt_in() {
        assert!(evaluate("max(1, 2)", &Variables::new()).is_err());
        let engine = Expression::with_standard_functions();
        assert_eq!(engine.evaluate("if(len(name) > 3, upper(name), lower(name))",
                                   &vars(&[("name", Value::from("Ada"))])),
                   Ok(Value::from("ada")));
    }
}
