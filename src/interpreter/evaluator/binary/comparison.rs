use crate::{
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::number_operands,
        },
        value::core::Value,
    },
};

/// The operators that yield a boolean.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl Interpreter {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` accept any operands and use value equality: numbers
    /// compare structurally (NaN equals NaN, `0` differs from `-0`), text by
    /// content, functions by identity, and
    /// values of different types are never equal. The relational operators
    /// require two numbers.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::{
    ///     evaluator::{binary::comparison::Comparison, core::Interpreter},
    ///     value::core::Value,
    /// };
    ///
    /// let less = Interpreter::eval_comparison(Comparison::Less,
    ///                                         &Value::Number(3.0),
    ///                                         &Value::Number(5.0),
    ///                                         1);
    /// assert_eq!(less.unwrap(), Value::Bool(true));
    ///
    /// let mixed = Interpreter::eval_comparison(Comparison::Equal,
    ///                                          &Value::Number(1.0),
    ///                                          &Value::from("1"),
    ///                                          1);
    /// assert_eq!(mixed.unwrap(), Value::Bool(false));
    /// ```
    ///
    /// # Errors
    /// A type mismatch when a relational operator gets a non-number.
    pub fn eval_comparison(op: Comparison,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        let result = match op {
            Comparison::Equal => left == right,
            Comparison::NotEqual => left != right,
            Comparison::Less => {
                let (a, b) = number_operands(left, right, line)?;
                a < b
            },
            Comparison::LessEqual => {
                let (a, b) = number_operands(left, right, line)?;
                a <= b
            },
            Comparison::Greater => {
                let (a, b) = number_operands(left, right, line)?;
                a > b
            },
            Comparison::GreaterEqual => {
                let (a, b) = number_operands(left, right, line)?;
                a >= b
            },
        };
        Ok(Value::Bool(result))
    }
}
