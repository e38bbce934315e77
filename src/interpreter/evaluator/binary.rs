use crate::interpreter::{
    evaluator::core::{EvalResult, Evaluator},
    lexer::{Arithmetic, Comparison, TokenKind},
    value::core::Value,
};

impl Evaluator<'_> {
    /// Evaluates logical OR expressions.
    ///
    /// This is the lowest precedence level and the entry point for every
    /// full expression, including group contents and call arguments, so it
    /// is also where nesting depth is counted.
    ///
    /// Grammar: `or := and ("or" and)*`
    ///
    /// Both operands are evaluated even when the left one is already truthy,
    /// unless short-circuit mode is enabled.
    pub(super) fn parse_or(&mut self) -> EvalResult<Value> {
        self.nested(|this| {
                let mut left = this.parse_and()?;

                while this.peek().is_keyword("or") {
                    this.advance();

                    let decided = left.is_truthy();
                    let skip = this.options.short_circuit && decided;
                    let right = this.skipping_if(skip, Self::parse_and)?;

                    left = Value::Boolean(decided || right.is_truthy());
                }

                Ok(left)
            })
    }

    /// Evaluates logical AND expressions.
    ///
    /// Grammar: `and := not ("and" not)*`
    pub(super) fn parse_and(&mut self) -> EvalResult<Value> {
        let mut left = self.parse_not()?;

        while self.peek().is_keyword("and") {
            self.advance();

            let decided = !left.is_truthy();
            let skip = self.options.short_circuit && decided;
            let right = self.skipping_if(skip, Self::parse_not)?;

            left = Value::Boolean(!decided && right.is_truthy());
        }

        Ok(left)
    }

    /// Evaluates a comparison.
    ///
    /// At most one comparison operator is consumed: in `1 < 2 < 3` the second
    /// `<` is left for the caller.
    ///
    /// Grammar: `comparison := additive [("==" | "!=" | ">" | "<" | ">=" |
    /// "<=") additive]`
    pub(super) fn parse_comparison(&mut self) -> EvalResult<Value> {
        let left = self.parse_additive()?;

        if let TokenKind::Operator(op) = self.peek()
           && let Some(op) = op.as_comparison()
        {
            self.advance();

            let right = self.parse_additive()?;
            return Ok(Value::Boolean(compare(op, &left, &right)));
        }

        Ok(left)
    }

    /// Evaluates addition and subtraction.
    ///
    /// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
    pub(super) fn parse_additive(&mut self) -> EvalResult<Value> {
        let mut left = self.parse_multiplicative()?;

        while let TokenKind::Operator(op) = self.peek()
              && let Some(op) = op.as_arithmetic()
              && op.is_additive()
        {
            self.advance();

            let right = self.parse_multiplicative()?;
            left = Value::Number(arithmetic(op, left.to_number(), right.to_number()));
        }

        Ok(left)
    }

    /// Evaluates multiplication, division and remainder.
    ///
    /// Grammar: `multiplicative := primary (("*" | "/" | "%") primary)*`
    pub(super) fn parse_multiplicative(&mut self) -> EvalResult<Value> {
        let mut left = self.parse_primary()?;

        while let TokenKind::Operator(op) = self.peek()
              && let Some(op) = op.as_arithmetic()
              && !op.is_additive()
        {
            self.advance();

            let right = self.parse_primary()?;
            left = Value::Number(arithmetic(op, left.to_number(), right.to_number()));
        }

        Ok(left)
    }
}

/// Applies an arithmetic operator to two already-coerced operands.
///
/// Division by zero and remainders of zero follow IEEE-754 and produce
/// infinities or `NaN` instead of errors.
///
/// # Example
/// ```
/// use ruleval::interpreter::{evaluator::binary::arithmetic, lexer::Arithmetic};
///
/// assert_eq!(arithmetic(Arithmetic::Remainder, 7.0, 4.0), 3.0);
/// assert_eq!(arithmetic(Arithmetic::Divide, 1.0, 0.0), f64::INFINITY);
/// ```
#[must_use]
pub fn arithmetic(op: Arithmetic, left: f64, right: f64) -> f64 {
    match op {
        Arithmetic::Add => left + right,
        Arithmetic::Subtract => left - right,
        Arithmetic::Multiply => left * right,
        Arithmetic::Divide => left / right,
        Arithmetic::Remainder => left % right,
    }
}

/// Applies a comparison operator.
///
/// `==` and `!=` use [`Value::loose_eq`] on the raw values. Ordering
/// operators coerce both sides with [`Value::to_number`] first, so strings
/// are never compared lexicographically.
///
/// # Example
/// ```
/// use ruleval::interpreter::{evaluator::binary::compare, lexer::Comparison, value::core::Value};
///
/// assert!(compare(Comparison::Equal, &Value::Boolean(true), &Value::Number(1.0)));
/// assert!(compare(Comparison::Greater, &Value::from("10"), &Value::from("9")));
/// assert!(!compare(Comparison::Greater, &Value::from("b"), &Value::from("a")));
/// ```
#[must_use]
pub fn compare(op: Comparison, left: &Value, right: &Value) -> bool {
    match op {
        Comparison::Equal => left.loose_eq(right),
        Comparison::NotEqual => !left.loose_eq(right),
        Comparison::Greater => left.to_number() > right.to_number(),
        Comparison::Less => left.to_number() < right.to_number(),
        Comparison::GreaterEqual => left.to_number() >= right.to_number(),
        Comparison::LessEqual => left.to_number() <= right.to_number(),
    }
}
