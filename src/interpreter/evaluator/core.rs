use std::{
    io::{self, BufRead, BufReader, Write},
    mem,
    rc::Rc,
};

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::function::native,
        value::{callable::Callable, core::Value},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Interpreter settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Print the value of every bare expression statement, as an interactive
    /// session does.
    pub echo_expressions: bool,
    /// How deeply user functions may nest before a call fails with
    /// [`RuntimeError::StackOverflow`].
    pub max_call_depth:   usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { echo_expressions: false,
               max_call_depth:   DEFAULT_MAX_CALL_DEPTH, }
    }
}

impl Config {
    /// Settings for an interactive session: expression statements echo their
    /// value.
    #[must_use]
    pub fn interactive() -> Self {
        Self { echo_expressions: true,
               ..Self::default() }
    }
}

/// How a statement finished.
///
/// `return` is ordinary control flow, not an error: blocks and loops stop at
/// the first `Return` and hand it upward until the enclosing call turns it
/// into the call's value.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is unwinding to the nearest function call.
    Return(Value),
}

/// Stores the runtime state of a program.
///
/// The interpreter owns the global scope (with the native bindings already
/// defined), the scope currently in effect, and the streams that `print` and
/// `input()` use.
///
/// ## Usage
///
/// One interpreter is created per session and fed successive programs, so
/// globals declared by one REPL line remain visible to the next.
///
/// ```
/// use tern::{
///     error::Diagnostics,
///     interpreter::{
///         evaluator::core::{Config, Interpreter},
///         lexer::tokenize,
///         parser::parse,
///     },
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// let tokens = tokenize("var greeting = \"hi\";", &mut diagnostics);
/// let program = parse(&tokens, &mut diagnostics);
///
/// let mut interpreter = Interpreter::new(Config::default());
/// interpreter.interpret(&program).unwrap();
///
/// assert!(interpreter.globals().contains_local("greeting"));
/// ```
pub struct Interpreter {
    globals:                Environment,
    pub(super) environment: Environment,
    pub(super) config:      Config,
    pub(super) call_depth:  usize,
    pub(super) output:      Box<dyn Write>,
    pub(super) input:       Box<dyn BufRead>,
}

impl Interpreter {
    /// Creates an interpreter that prints to standard output and reads
    /// `input()` from standard input.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_io(config,
                      Box::new(io::stdout()),
                      Box::new(BufReader::new(io::stdin())))
    }

    /// Creates an interpreter over the given output and input streams.
    ///
    /// All native bindings are defined in the fresh global scope.
    #[must_use]
    pub fn with_io(config: Config, output: Box<dyn Write>, input: Box<dyn BufRead>) -> Self {
        let globals = Environment::global();
        native::register(&globals);

        Self { environment: globals.clone(),
               globals,
               config,
               call_depth: 0,
               output,
               input }
    }

    /// The root scope, which lives as long as the interpreter.
    #[must_use]
    pub const fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Executes a program's statements in order.
    ///
    /// The first runtime error aborts the run: no further statements execute,
    /// and the error is returned for the caller to report.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised while executing a statement.
    pub fn interpret(&mut self, statements: &[Statement]) -> EvalResult<()> {
        let result = statements.iter()
                               .try_for_each(|statement| self.execute(statement).map(drop));

        if let Err(error) = &result {
            tracing::debug!(line = error.line(), %error, "runtime error");
            // A failure can leave a block's scope active.
            self.environment = self.globals.clone();
            self.call_depth = 0;
        }

        let line = statements.last().map_or(0, Statement::line_number);
        let flushed = self.output
                          .flush()
                          .map_err(|source| RuntimeError::Output { source, line });
        result.and(flushed)
    }

    /// Executes a single statement.
    ///
    /// Returns [`Flow::Return`] when a `return` statement ran, either directly
    /// or inside a nested block or loop.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised while evaluating the statement.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| self.execute_statement(statement))
    }

    fn execute_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr, line } => {
                let value = self.evaluate(expr)?;
                if self.config.echo_expressions {
                    self.write_line(&value, *line)?;
                }
            },
            Statement::Print { expr, line } => {
                let value = self.evaluate(expr)?;
                self.write_line(&value, *line)?;
            },
            Statement::VariableDeclaration { name, initializer, .. } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.define(name.as_str(), value);
            },
            Statement::Block { statements, .. } => {
                let scope = Environment::enclosed(&self.environment);
                return self.execute_block(statements, scope);
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                return self.execute_if(condition, then_branch, else_branch.as_deref());
            },
            Statement::Ternary { condition,
                                 true_branch,
                                 false_branch,
                                 .. } => {
                return self.execute_ternary(condition, true_branch, false_branch);
            },
            Statement::While { condition, body, .. } => {
                return self.execute_while(condition, body);
            },
            Statement::DoWhile { body, condition, .. } => {
                return self.execute_do_while(body, condition);
            },
            Statement::Function(declaration) => {
                let function = Callable::user(Rc::clone(declaration), self.environment.clone());
                self.environment
                    .define(declaration.name.as_str(), Value::Function(function));
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                return Ok(Flow::Return(value));
            },
        }
        Ok(Flow::Normal)
    }

    /// Executes `statements` with `scope` as the current environment.
    ///
    /// The previous environment is restored afterwards, including when a
    /// statement fails or returns.
    ///
    /// # Errors
    /// The first [`RuntimeError`] raised by a statement.
    pub fn execute_block(&mut self,
                         statements: &[Statement],
                         scope: Environment)
                         -> EvalResult<Flow> {
        let previous = mem::replace(&mut self.environment, scope);
        let result = self.execute_sequence(statements);
        self.environment = previous;
        result
    }

    fn execute_sequence(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.execute(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// evaluated left to right; `and`/`or` skip their right operand when the
    /// left one decides the result.
    ///
    /// # Example
    /// ```
    /// use tern::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::{
    ///         evaluator::core::{Config, Interpreter},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut interpreter = Interpreter::new(Config::default());
    /// let expr = Expr::Binary { left:  Box::new(Expr::Literal { value: 1.0.into(),
    ///                                                           line:  1, }),
    ///                           op:    BinaryOperator::Div,
    ///                           right: Box::new(Expr::Literal { value: 0.0.into(),
    ///                                                           line:  1, }),
    ///                           line:  1, };
    ///
    /// assert_eq!(interpreter.evaluate(&expr).unwrap(), Value::Nil);
    /// ```
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised by an operator, lookup or call.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.evaluate_expr(expr))
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Grouping { expr, .. } => self.evaluate(expr),
            Expr::Unary { op, operand, line } => self.eval_unary(*op, operand, *line),
            Expr::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right),
            Expr::Variable { name, line } => self.environment.get(name, *line),
            Expr::Assign { name, value, line } => {
                let value = self.evaluate(value)?;
                self.environment.assign(name, value.clone(), *line)?;
                Ok(value)
            },
            Expr::CompoundAssign { name,
                                   op,
                                   value,
                                   line, } => self.eval_compound_assign(name, *op, value, *line),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
        }
    }
}
