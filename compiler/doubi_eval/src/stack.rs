//! Stack growth for deeply recursive evaluation.
//!
//! Nested expressions and user recursion both recurse on the native stack.
//! Spawned units start on a fresh thread stack, so every recursive entry
//! point goes through `ensure_sufficient_stack`.

/// Run `f`, first growing the stack onto the heap if less than the red zone
/// is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Keep this much stack free before recursing (128KB).
    const RED_ZONE: usize = 128 * 1024;

    /// Size of each newly allocated stack segment (1MB).
    const STACK_SEGMENT: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            ensure_sufficient_stack(|| 1 + depth(n - 1))
        }
    }

    #[test]
    fn deep_recursion_completes() {
        assert_eq!(depth(200_000), 200_000);
    }
}
