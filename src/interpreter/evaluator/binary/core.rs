use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::{comparison::Comparison, scalar::Arithmetic},
            core::{EvalResult, Interpreter},
        },
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a strict binary operation between two already evaluated
    /// operands.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator. `+` adds numbers or joins text, `+.` joins the display
    /// forms of any two values, the other arithmetic operators require numbers
    /// (`/` by zero yields `nil`), and comparisons call `eval_comparison`.
    ///
    /// # Example
    /// ```
    /// use tern::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let sum = Interpreter::eval_binary(BinaryOperator::Add,
    ///                                    &Value::Number(3.0),
    ///                                    &Value::Number(4.0),
    ///                                    1);
    /// assert_eq!(sum.unwrap(), Value::Number(7.0));
    ///
    /// let text = Interpreter::eval_binary(BinaryOperator::Concat,
    ///                                     &Value::from("n = "),
    ///                                     &Value::Number(3.0),
    ///                                     1);
    /// assert_eq!(text.unwrap(), Value::from("n = 3"));
    /// ```
    ///
    /// # Errors
    /// A type mismatch when the operands do not suit the operator.
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Concat, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual,
            Pow, Sub,
        };

        match op {
            Add => Self::eval_add(left, right, line),
            Concat => Ok(Self::eval_concat(left, right)),
            Sub => Self::eval_arithmetic(Arithmetic::Sub, left, right, line),
            Mul => Self::eval_arithmetic(Arithmetic::Mul, left, right, line),
            Div => Self::eval_arithmetic(Arithmetic::Div, left, right, line),
            Mod => Self::eval_arithmetic(Arithmetic::Mod, left, right, line),
            Pow => Self::eval_pow(left, right, line),
            Equal => Self::eval_comparison(Comparison::Equal, left, right, line),
            NotEqual => Self::eval_comparison(Comparison::NotEqual, left, right, line),
            Less => Self::eval_comparison(Comparison::Less, left, right, line),
            LessEqual => Self::eval_comparison(Comparison::LessEqual, left, right, line),
            Greater => Self::eval_comparison(Comparison::Greater, left, right, line),
            GreaterEqual => Self::eval_comparison(Comparison::GreaterEqual, left, right, line),
        }
    }
}
