use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        lexer::TokenKind,
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a `not` prefix.
    ///
    /// `not` is right-associative and may be stacked, so `not not x` is
    /// `not (not x)`. Every prefix counts as one nesting level.
    ///
    /// Grammar: `not := "not" not | comparison`
    pub(super) fn parse_not(&mut self) -> EvalResult<Value> {
        if self.peek().is_keyword("not") {
            self.advance();
            let operand = self.nested(Self::parse_not)?;
            return Ok(Value::Boolean(!operand.is_truthy()));
        }

        self.parse_comparison()
    }

    /// Evaluates a primary (atomic) expression.
    ///
    /// Grammar:
    /// ```text
    ///     primary := number | string | boolean
    ///              | "(" or [")"]
    ///              | identifier ["(" (or ("," or)*)? ")"]
    /// ```
    ///
    /// # Errors
    /// - `UnexpectedToken` when the cursor is on an operator, a comma, a
    ///   closing parenthesis or the end of input.
    /// - `UndefinedVariable` / `UndefinedFunction` for unresolved names.
    pub(super) fn parse_primary(&mut self) -> EvalResult<Value> {
        let offset = self.offset();

        match self.peek() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Value::Number(*n))
            },
            TokenKind::String(s) => {
                self.advance();
                Ok(Value::String(s.clone()))
            },
            TokenKind::Boolean(b) => {
                self.advance();
                Ok(Value::Boolean(*b))
            },
            TokenKind::ParenOpen => self.parse_grouping(),
            TokenKind::Identifier(name) => {
                self.advance();
                self.parse_identifier_or_call(name, offset)
            },
            other => Err(RuntimeError::UnexpectedToken { token: other.to_string(),
                                                         offset }),
        }
    }

    /// Evaluates a parenthesised expression.
    ///
    /// A missing `)` is tolerated: evaluation simply continues from wherever
    /// the inner expression stopped. Strict mode reports it instead.
    fn parse_grouping(&mut self) -> EvalResult<Value> {
        self.advance();
        let value = self.parse_or()?;
        self.expect_closing_paren()?;
        Ok(value)
    }

    /// Resolves an identifier whose token has already been consumed.
    ///
    /// When followed by `(` it is a call, otherwise a variable lookup in the
    /// merged bindings.
    fn parse_identifier_or_call(&mut self, name: &str, offset: usize) -> EvalResult<Value> {
        if !matches!(self.peek(), TokenKind::ParenOpen) {
            return self.lookup_variable(name, offset);
        }

        self.advance();
        let arguments = self.parse_arguments()?;
        self.call_function(name, &arguments, offset)
    }

    /// Evaluates call arguments up to `)` or the end of input.
    ///
    /// Arguments are separated by commas; a trailing comma before `)` is
    /// accepted.
    fn parse_arguments(&mut self) -> EvalResult<Vec<Value>> {
        let mut arguments = Vec::new();

        while !matches!(self.peek(), TokenKind::ParenClose | TokenKind::EndOfInput) {
            arguments.push(self.parse_or()?);

            if matches!(self.peek(), TokenKind::Comma) {
                self.advance();
            }
        }

        self.expect_closing_paren()?;
        Ok(arguments)
    }

    fn expect_closing_paren(&mut self) -> EvalResult<()> {
        if matches!(self.peek(), TokenKind::ParenClose) {
            self.advance();
        } else if self.options.strict {
            return Err(RuntimeError::UnclosedParen { offset: self.offset() });
        }
        Ok(())
    }

    fn lookup_variable(&self, name: &str, offset: usize) -> EvalResult<Value> {
        if self.skipping {
            return Ok(Value::Boolean(false));
        }

        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_owned(),
                                                             offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        interpreter::{
            environment::{Functions, Variables},
            evaluator::{core::evaluate_tokens_with, function::core::standard_functions},
            lexer::tokenize,
        },
        options::EvalOptions,
    };

    fn eval_with(source: &str, variables: &Variables, options: EvalOptions) -> EvalResult<Value> {
        evaluate_tokens_with(&tokenize(source), variables, &Functions::new(), options)
    }

    fn eval(source: &str) -> EvalResult<Value> {
        eval_with(source, &Variables::new(), EvalOptions::default())
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        assert_eq!(eval("42"), Ok(Value::Number(42.0)));
        assert_eq!(eval("\"hi\""), Ok(Value::from("hi")));
        assert_eq!(eval("false"), Ok(Value::Boolean(false)));
    }

    #[test]
    fn missing_closing_parens_are_tolerated() {
        assert_eq!(eval("(((5)"), Ok(Value::Number(5.0)));
        assert_eq!(eval("(1 + 2"), Ok(Value::Number(3.0)));
    }

    #[test]
    fn strict_mode_reports_missing_closing_parens() {
        let strict = EvalOptions::default().with_strict(true);
        assert_eq!(eval_with("(1 + 2", &Variables::new(), strict),
                   Err(RuntimeError::UnclosedParen { offset: 6 }));
    }

    #[test]
    fn strict_mode_reports_unclosed_argument_lists() {
        let functions = standard_functions();
        let run = |options| {
            evaluate_tokens_with(&tokenize("max(1, 2"), &Variables::new(), &functions, options)
        };

        assert_eq!(run(EvalOptions::default()), Ok(Value::Number(2.0)));
        assert_eq!(run(EvalOptions::default().with_strict(true)),
                   Err(RuntimeError::UnclosedParen { offset: 8 }));
    }

    #[test]
    fn dotted_identifiers_are_plain_names() {
        let variables = Variables::from([("user.age".to_owned(), Value::Number(30.0))]);
        assert_eq!(eval_with("user.age >= 18", &variables, EvalOptions::default()),
                   Ok(Value::Boolean(true)));
    }

    #[test]
    fn unresolved_variables_fail_at_their_offset() {
        assert_eq!(eval("1 + missing"),
                   Err(RuntimeError::UndefinedVariable { name:   "missing".to_owned(),
                                                         offset: 4, }));
    }

    #[test]
    fn operators_in_value_position_are_unexpected() {
        assert_eq!(eval("1 + * 2"),
                   Err(RuntimeError::UnexpectedToken { token:  "operator '*'".to_owned(),
                                                       offset: 4, }));
        assert_eq!(eval("1 +"),
                   Err(RuntimeError::UnexpectedToken { token:  "end of input".to_owned(),
                                                       offset: 3, }));
        assert!(matches!(eval(")"), Err(RuntimeError::UnexpectedToken { .. })));
        assert!(matches!(eval("- x"), Err(RuntimeError::UnexpectedToken { .. })));
    }

    #[test]
    fn keywords_in_value_position_are_variable_lookups() {
        assert!(matches!(eval("and"),
                         Err(RuntimeError::UndefinedVariable { name, .. }) if name == "and"));
    }
}
