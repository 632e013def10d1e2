use crate::{
    ast::{Expr, LogicalOperator},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a short-circuiting logical operation.
    ///
    /// The result is whichever operand decided it, not a coerced boolean:
    /// `or` returns its left operand when that is truthy, `and` returns it when
    /// it is falsy, and otherwise both return the right operand. The right
    /// operand is only evaluated when needed.
    ///
    /// # Example
    /// ```
    /// use tern::{
    ///     ast::{Expr, LiteralValue, LogicalOperator},
    ///     interpreter::{
    ///         evaluator::core::{Config, Interpreter},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut interpreter = Interpreter::new(Config::default());
    /// let nil = Expr::Literal { value: LiteralValue::Nil,
    ///                           line:  1, };
    /// let text = Expr::Literal { value: "fallback".into(),
    ///                            line:  1, };
    ///
    /// let v = interpreter.eval_logical(&nil, LogicalOperator::Or, &text).unwrap();
    /// assert_eq!(v, Value::from("fallback"));
    /// ```
    ///
    /// # Errors
    /// Any error raised while evaluating an operand.
    pub fn eval_logical(&mut self,
                        left: &Expr,
                        op: LogicalOperator,
                        right: &Expr)
                        -> EvalResult<Value> {
        let left = self.evaluate(left)?;

        let decided = match op {
            LogicalOperator::Or => left.is_truthy(),
            LogicalOperator::And => !left.is_truthy(),
        };
        if decided {
            return Ok(left);
        }

        self.evaluate(right)
    }
}
