use std::io::{BufRead, Write};

use crate::{
    ast::{CompoundOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

/// Extracts the number from a unary operand.
///
/// # Errors
/// "Operand must be a number." for any other value.
pub fn number_operand(value: &Value, line: usize) -> EvalResult<f64> {
    value.as_number()
         .ok_or_else(|| RuntimeError::type_mismatch("Operand must be a number.", line))
}

/// Extracts the numbers from both operands of a binary operator.
///
/// # Errors
/// "Operands must be numbers." unless both values are numbers.
///
/// # Example
/// ```
/// use tern::interpreter::{evaluator::utils::number_operands, value::core::Value};
///
/// assert_eq!(number_operands(&Value::Number(1.0), &Value::Number(2.0), 1).unwrap(),
///            (1.0, 2.0));
/// assert!(number_operands(&Value::Number(1.0), &Value::from("2"), 1).is_err());
/// ```
pub fn number_operands(left: &Value, right: &Value, line: usize) -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::type_mismatch("Operands must be numbers.", line)),
    }
}

impl Interpreter {
    /// Evaluates `+=`, `-=`, `*=`, `/=`, `++` and `--`.
    ///
    /// The right-hand side is evaluated before the variable is read. Both must
    /// be numbers; on a mismatch the variable keeps its old value. The new
    /// value is written to the nearest binding and returned.
    ///
    /// Unlike plain `/`, `/=` by zero follows IEEE division.
    pub(super) fn eval_compound_assign(&mut self,
                                       name: &str,
                                       op: CompoundOperator,
                                       value: &Expr,
                                       line: usize)
                                       -> EvalResult<Value> {
        let operand = self.evaluate(value)?;
        let current = self.environment.get(name, line)?;
        let (current, operand) = number_operands(&current, &operand, line)?;

        let result = match op {
            CompoundOperator::AddAssign
            | CompoundOperator::Increment
            | CompoundOperator::Decrement => current + operand,
            CompoundOperator::SubAssign => current - operand,
            CompoundOperator::MulAssign => current * operand,
            CompoundOperator::DivAssign => current / operand,
        };

        self.environment.assign(name, Value::Number(result), line)?;
        Ok(Value::Number(result))
    }

    /// Writes the display form of `value` and a newline to the output stream.
    pub(crate) fn write_line(&mut self, value: &Value, line: usize) -> EvalResult<()> {
        writeln!(self.output, "{value}").map_err(|source| RuntimeError::Output { source, line })
    }

    /// Reads one line from the input stream without its line terminator.
    ///
    /// This is the stream `input()` reads from; an interactive driver reads
    /// its source lines through here too, so both share one buffer. Pending
    /// output is flushed first so prompts appear before the read blocks.
    /// Returns `None` at end of input or when reading fails.
    pub fn read_line(&mut self) -> Option<String> {
        if let Err(error) = self.output.flush() {
            tracing::debug!(%error, "could not flush output before reading input");
        }

        let mut buffer = String::new();
        match self.input.read_line(&mut buffer) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
                buffer.truncate(trimmed);
                Some(buffer)
            },
            Err(error) => {
                tracing::debug!(%error, "could not read input");
                None
            },
        }
    }
}
