/// Binary operator evaluation logic.
///
/// Handles arithmetic, concatenation, comparisons and the short-circuiting
/// logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, its configuration, the statement and
/// expression dispatch, and the control-flow outcome used for `return`.
pub mod core;

/// Evaluation of branching and looping statements.
///
/// Supports `if`, the statement-level ternary, `while` and `do ... while`.
pub mod control_flow;

/// Utility functions for evaluation.
///
/// Provides operand checks, compound assignment and access to the
/// interpreter's input and output streams.
pub mod utils;

/// Function evaluation.
///
/// Handles the call protocol for native and user-defined functions, and the
/// native bindings registered into the global scope.
pub mod function;
