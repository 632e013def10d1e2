use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::number_operands,
        },
        value::core::Value,
    },
};

/// The operators that take exactly two numbers and yield a number.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arithmetic {
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

impl Interpreter {
    /// Evaluates `+`: the sum of two numbers or the concatenation of two
    /// strings.
    ///
    /// # Errors
    /// A type mismatch for any other pair of operands.
    pub fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Text(a), Value::Text(b)) => Ok(Value::from(format!("{a}{b}"))),
            _ => {
                Err(RuntimeError::type_mismatch("Operands must be two numbers or two strings.",
                                                line))
            },
        }
    }

    /// Evaluates `+.`, which joins the display forms of any two values.
    ///
    /// Numbers lose a zero fraction on the way, so `1 +. 2` is `"12"`.
    #[must_use]
    pub fn eval_concat(left: &Value, right: &Value) -> Value {
        Value::from(format!("{left}{right}"))
    }

    /// Evaluates `-`, `*`, `/` and `%` on two numbers.
    ///
    /// Division by zero does not fail: it yields `nil`. `%` is the floating
    /// remainder, which takes the sign of the dividend.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::{
    ///     evaluator::{binary::scalar::Arithmetic, core::Interpreter},
    ///     value::core::Value,
    /// };
    ///
    /// let rem = Interpreter::eval_arithmetic(Arithmetic::Mod,
    ///                                        &Value::Number(-7.0),
    ///                                        &Value::Number(3.0),
    ///                                        1);
    /// assert_eq!(rem.unwrap(), Value::Number(-1.0));
    /// ```
    ///
    /// # Errors
    /// A type mismatch unless both operands are numbers.
    pub fn eval_arithmetic(op: Arithmetic,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        let (a, b) = number_operands(left, right, line)?;

        let result = match op {
            Arithmetic::Sub => a - b,
            Arithmetic::Mul => a * b,
            Arithmetic::Div if b == 0.0 => return Ok(Value::Nil),
            Arithmetic::Div => a / b,
            Arithmetic::Mod => a % b,
        };
        Ok(Value::Number(result))
    }
}
