//! # tern
//!
//! tern is a tree-walking interpreter for a small, dynamically typed,
//! C-like scripting language with first-class functions and closures.
//! Source text is scanned into tokens, parsed into statements, and executed
//! directly against a chain of shared scopes.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::{Diagnostics, RuntimeError, SyntaxError},
    interpreter::{
        evaluator::core::{Config, Interpreter},
        lexer::tokenize,
        parser::parse,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of a program as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Shares function declarations between the tree and the closures built
///   from them.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code, each carrying the source line it refers to.
///
/// # Responsibilities
/// - Defines the syntax error and its collecting sink.
/// - Defines the runtime error taxonomy.
/// - Formats every error as `Error on line N...` for user feedback.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, scoping, evaluation and value
/// representations to provide a complete runtime for scripts.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, environment, evaluator,
///   and value types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General helpers for number formatting and stack safety.
///
/// # Responsibilities
/// - Format and parse numbers the way scripts see them.
/// - Grow the native stack before deep recursion.
pub mod util;

/// Any failure of a whole run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source did not scan or parse; nothing was executed.
    #[error("{}", join_lines(.0))]
    Syntax(Vec<SyntaxError>),
    /// Execution stopped at a runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The process exit status conventionally used for this failure: 65 for
    /// bad input data, 70 for an internal software error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Syntax(_) => 65,
            Self::Runtime(_) => 70,
        }
    }
}

fn join_lines(errors: &[SyntaxError]) -> String {
    errors.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join("\n")
}

/// Scans, parses and executes `source` on an existing interpreter.
///
/// Globals defined by earlier runs stay visible, which is what an interactive
/// session needs. If the source has any syntax error, every error is returned
/// and nothing runs.
///
/// # Examples
/// ```
/// use tern::{
///     interpreter::evaluator::core::{Config, Interpreter},
///     run,
/// };
///
/// let mut interpreter = Interpreter::new(Config::default());
/// run("var x = 5;", &mut interpreter).unwrap();
/// run("x++; print x;", &mut interpreter).unwrap();
/// ```
pub fn run(source: &str, interpreter: &mut Interpreter) -> Result<(), Error> {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    let program = parse(&tokens, &mut diagnostics);

    if diagnostics.had_error() {
        return Err(Error::Syntax(diagnostics.into_errors()));
    }

    interpreter.interpret(&program)?;
    Ok(())
}

/// Runs a complete script on a fresh interpreter using standard streams.
///
/// With `echo` set, bare expression statements also print their value.
///
/// # Errors
/// Returns every syntax error, or the runtime error that stopped execution.
///
/// # Examples
/// ```
/// use tern::{Error, get_result};
///
/// let source = "fun add(a, b) { return a + b; } print add(2, 3);";
/// assert!(get_result(source, false).is_ok());
///
/// // 'y' is not defined.
/// let res = get_result("print y;", false);
/// assert!(matches!(res, Err(Error::Runtime(_))));
///
/// let res = get_result("print (1;", false);
/// assert!(matches!(res, Err(Error::Syntax(_))));
/// ```
pub fn get_result(source: &str, echo: bool) -> Result<(), Error> {
    let config = Config { echo_expressions: echo,
                          ..Config::default() };
    let mut interpreter = Interpreter::new(config);
    run(source, &mut interpreter)
}
