/// Operator dispatch for strict binary operators.
pub mod core;
/// Addition, concatenation and the remaining arithmetic operators.
pub mod scalar;
/// Exponentiation.
pub mod power;
/// Relational and equality comparisons.
pub mod comparison;
/// Short-circuiting `and` and `or`.
pub mod logic;
