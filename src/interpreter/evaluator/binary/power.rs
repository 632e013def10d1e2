use crate::interpreter::{
    evaluator::{
        core::{EvalResult, Interpreter},
        utils::number_operands,
    },
    value::core::Value,
};

impl Interpreter {
    /// Evaluates an exponentiation operation.
    ///
    /// Both operands must be numbers; the result is `base.powf(exponent)`, so
    /// a negative base with a fractional exponent gives `NaN`.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::{evaluator::core::Interpreter, value::core::Value};
    ///
    /// let result = Interpreter::eval_pow(&Value::Number(2.0), &Value::Number(10.0), 1);
    /// assert_eq!(result.unwrap(), Value::Number(1024.0));
    /// ```
    ///
    /// # Errors
    /// A type mismatch unless both operands are numbers.
    pub fn eval_pow(base: &Value, exponent: &Value, line: usize) -> EvalResult<Value> {
        let (base, exponent) = number_operands(base, exponent, line)?;
        Ok(Value::Number(base.powf(exponent)))
    }
}
