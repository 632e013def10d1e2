/// Parsing errors.
///
/// Defines the syntax error raised by the lexer and parser, and the
/// `Diagnostics` sink that collects them so one pass can surface several
/// independent mistakes.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Any of them
/// aborts the whole run.
pub mod runtime_error;

pub use parse_error::{Diagnostics, SyntaxError};
pub use runtime_error::RuntimeError;
