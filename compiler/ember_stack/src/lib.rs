//! Stack safety utilities for deep recursion.
//!
//! The evaluator's own driver is iterative by design (see `ember_eval::driver`):
//! user-level recursion depth never touches the host stack there. A handful of
//! *helper* algorithms are still naturally recursive because they walk a tree
//! shape directly — pattern matching, the `contains` preorder, and free-variable
//! computation over the AST. Pathological self-loop nesting (`Int (Int (Int
//! ...)))`) or deeply nested object patterns could still overflow the host
//! stack in those helpers, so they run under [`ensure_sufficient_stack`].
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).
//!
//! # Configuration
//!
//! - **Red zone**: 100KB - If less than this remains, we grow the stack.
//! - **Growth size**: 1MB - Each growth allocates this much additional space.

/// Minimum stack space to keep available (100KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, this will
/// allocate additional stack space before calling `f`.
///
/// # Platform Behavior
///
/// - **Native**: Uses `stacker::maybe_grow` to dynamically grow the stack.
/// - **WASM**: Simply calls `f()` directly (WASM manages its own stack).
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
