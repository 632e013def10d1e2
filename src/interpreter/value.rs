/// Runtime value representation.
///
/// Defines the closed `Value` enum (numbers, booleans, text, `nil` and
/// functions), its truthiness and equality rules, and the canonical text form
/// used by `print`, `string()` and `+.`.
pub mod core;
/// Callable values.
///
/// Defines the two kinds of function a script can hold: native bindings
/// provided by the host, and user functions that close over the environment
/// they were declared in.
pub mod callable;
