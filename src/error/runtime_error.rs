use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// Every variant carries the source line of the offending token. A runtime
/// error is fatal to the run: it propagates out of
/// [`Interpreter::interpret`](crate::interpreter::evaluator::core::Interpreter::interpret)
/// and no further statements execute.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// An operator received operands of the wrong type.
    #[error("Error on line {line}: {details}")]
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Read or assignment of a name that no enclosing scope defines.
    #[error("Error on line {line}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The callee of a call expression is not a function.
    #[error("Error on line {line}: Can only call functions.")]
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Expected {expected} arguments but got {found}.")]
    ArityMismatch {
        /// The declared arity of the callee.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Function calls nested deeper than the configured limit.
    #[error("Error on line {line}: Stack overflow, call depth exceeded {limit}.")]
    StackOverflow {
        /// The configured maximum call depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Writing program output failed.
    #[error("Error on line {line}: Could not write output: {source}")]
    Output {
        /// The underlying I/O failure.
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl RuntimeError {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::TypeMismatch { line, .. }
            | Self::UndefinedVariable { line, .. }
            | Self::NotCallable { line }
            | Self::ArityMismatch { line, .. }
            | Self::StackOverflow { line, .. }
            | Self::Output { line, .. } => *line,
        }
    }

    /// Shorthand for a [`RuntimeError::TypeMismatch`].
    pub(crate) fn type_mismatch(details: impl Into<String>, line: usize) -> Self {
        Self::TypeMismatch { details: details.into(),
                             line }
    }
}
