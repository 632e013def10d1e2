/// Numeric formatting helpers.
///
/// This module provides the canonical decimal rendering of numbers, shared by
/// `print`, `string()`, `+.` and the REPL echo, so every path that turns a
/// number into text agrees on the format.
pub mod num;
/// Stack growth for deep recursion.
///
/// Evaluating nested calls recurses on the native stack; this module grows it
/// on demand so that deep but legitimate recursion does not abort the
/// process.
pub mod stack;
