use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::{
            callable::{Callable, UserFunction},
            core::Value,
        },
    },
    util::stack::ensure_sufficient_stack,
};

impl Interpreter {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then every argument from left to right.
    /// Only then is the callee checked: it must be a function, and it must
    /// declare exactly as many parameters as there are arguments. A failed
    /// check never runs any of the function body.
    ///
    /// # Errors
    /// - [`RuntimeError::NotCallable`] when the callee is not a function.
    /// - [`RuntimeError::ArityMismatch`] when the argument count is wrong.
    /// - Any error raised while evaluating operands or running the function.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       callee: &Expr,
                                                       arguments: &[Expr],
                                                       line: usize)
                                                       -> EvalResult<Value> {
        let callee = self.evaluate(callee)?;
        let arguments = arguments.iter()
                                 .map(|argument| self.evaluate(argument))
                                 .collect::<EvalResult<Vec<_>>>()?;

        let Value::Function(function) = callee else {
            return Err(RuntimeError::NotCallable { line });
        };
        check_arity(&function, arguments.len(), line)?;

        function.call(self, arguments, line)
    }

    /// Executes a user-defined function.
    ///
    /// Parameters are bound to the arguments in a new frame whose enclosing
    /// frame is the function's closure, not the caller's scope. A `return`
    /// anywhere in the body ends the call with its value; falling off the end
    /// yields `nil`.
    ///
    /// # Errors
    /// - [`RuntimeError::StackOverflow`] when the call would exceed the
    ///   configured call depth.
    /// - Any error raised by the body.
    pub fn call_user_function(&mut self,
                              function: &UserFunction,
                              arguments: Vec<Value>,
                              line: usize)
                              -> EvalResult<Value> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::StackOverflow { limit: self.config.max_call_depth,
                                                     line });
        }

        let declaration = &function.declaration;
        let scope = Environment::enclosed(&function.closure);
        for (param, argument) in declaration.params.iter().zip(arguments) {
            scope.define(param.as_str(), argument);
        }

        tracing::trace!(name = %declaration.name, depth = self.call_depth, "call");
        self.call_depth += 1;
        let flow = ensure_sufficient_stack(|| self.execute_block(&declaration.body, scope));
        self.call_depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

/// Ensures that `found` arguments satisfy the callee's arity.
///
/// # Errors
/// [`RuntimeError::ArityMismatch`] when the counts differ.
pub fn check_arity(function: &Callable, found: usize, line: usize) -> EvalResult<()> {
    let expected = function.arity();
    if expected != found {
        return Err(RuntimeError::ArityMismatch { expected,
                                                 found,
                                                 line });
    }
    Ok(())
}
