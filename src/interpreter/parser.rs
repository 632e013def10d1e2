/// Core parsing logic.
///
/// Holds the `Parser` cursor over the token stream, the entry point that
/// turns a token slice into a program, error construction, and the
/// synchronization used to recover after a syntax error.
pub mod core;

/// Unary, call and primary expression parsing.
///
/// Handles prefix operators, chained call suffixes, literals, grouping and
/// identifiers.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence-climbing levels from logical `or` down to the
/// exponent level.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement lists for blocks and function bodies.
pub mod block;

/// Utility functions for the parser.
///
/// Provides identifier consumption and comma-separated list parsing shared by
/// parameter and argument lists.
pub mod utils;

/// Statement parsing.
///
/// Implements declarations and statements, including the `for` desugaring and
/// the statement-level ternary.
pub mod statement;

pub use self::core::{Parser, parse};
