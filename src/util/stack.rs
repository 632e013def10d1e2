/// Minimum stack space to keep available before recursing (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Stack space to allocate when growing (2MB).
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Runs `f`, first growing the stack if less than the red zone remains.
///
/// Wrap every recursion point whose depth the script controls with this:
/// nested expressions and statements in the parser and evaluator, and
/// function calls.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
