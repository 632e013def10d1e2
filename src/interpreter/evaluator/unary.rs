use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::number_operand,
        },
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation; any other operand is a type mismatch.
    /// - `Not`: the negated truthiness of any value.
    ///
    /// # Example
    /// ```
    /// use tern::{
    ///     ast::{Expr, UnaryOperator},
    ///     interpreter::{
    ///         evaluator::core::{Config, Interpreter},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut interpreter = Interpreter::new(Config::default());
    /// let nil = Expr::Literal { value: tern::ast::LiteralValue::Nil,
    ///                           line:  1, };
    ///
    /// let v = interpreter.eval_unary(UnaryOperator::Not, &nil, 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// assert!(interpreter.eval_unary(UnaryOperator::Negate, &nil, 1).is_err());
    /// ```
    ///
    /// # Errors
    /// A type mismatch when negating a non-number, or any error raised while
    /// evaluating the operand.
    pub fn eval_unary(&mut self,
                      op: UnaryOperator,
                      operand: &Expr,
                      line: usize)
                      -> EvalResult<Value> {
        let value = self.evaluate(operand)?;
        match op {
            UnaryOperator::Negate => Ok(Value::Number(-number_operand(&value, line)?)),
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
