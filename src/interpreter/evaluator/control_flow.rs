use crate::{
    ast::{Expr, Statement},
    interpreter::evaluator::core::{EvalResult, Flow, Interpreter},
};

impl Interpreter {
    /// Executes `then_branch` when `condition` is truthy, otherwise the
    /// optional `else_branch`.
    pub(super) fn execute_if(&mut self,
                             condition: &Expr,
                             then_branch: &Statement,
                             else_branch: Option<&Statement>)
                             -> EvalResult<Flow> {
        if self.evaluate(condition)?.is_truthy() {
            return self.execute(then_branch);
        }
        match else_branch {
            Some(branch) => self.execute(branch),
            None => Ok(Flow::Normal),
        }
    }

    /// Executes exactly one branch of a statement-level ternary.
    ///
    /// The ternary dispatches statements and produces no value of its own.
    pub(super) fn execute_ternary(&mut self,
                                  condition: &Expr,
                                  true_branch: &Statement,
                                  false_branch: &Statement)
                                  -> EvalResult<Flow> {
        if self.evaluate(condition)?.is_truthy() {
            self.execute(true_branch)
        } else {
            self.execute(false_branch)
        }
    }

    /// Runs `body` for as long as `condition` is truthy, checking before every
    /// iteration.
    ///
    /// A `return` inside the body ends the loop and keeps unwinding.
    pub(super) fn execute_while(&mut self, condition: &Expr, body: &Statement) -> EvalResult<Flow> {
        while self.evaluate(condition)?.is_truthy() {
            if let Flow::Return(value) = self.execute(body)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs `body` once, then again for as long as `condition` is truthy.
    pub(super) fn execute_do_while(&mut self,
                                   body: &Statement,
                                   condition: &Expr)
                                   -> EvalResult<Flow> {
        loop {
            if let Flow::Return(value) = self.execute(body)? {
                return Ok(Flow::Return(value));
            }
            if !self.evaluate(condition)?.is_truthy() {
                return Ok(Flow::Normal);
            }
        }
    }
}
