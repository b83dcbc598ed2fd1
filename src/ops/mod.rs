//! # Operation Backends
//!
//! This module holds the two implementations of the pipeline's kernels and
//! the layer that picks between them at runtime.
//!
//! ## Submodules
//!
//! - [`reference`] — Sequential scalar loops; the semantic reference
//! - [`parallel`] — Rayon fork-join over the outer dimensions, SSE2 inner
//!   loops when built with `--features=simd`
//! - [`dispatch`] — Runtime backend switching behind one interface
//!
//! ## Backend Selection
//!
//! Callers normally go through [`crate::graph`], which routes through
//! [`dispatch`] based on the global [`crate::backend::Backend`]. The backend
//! modules can also be called directly, which is what the parity tests do to
//! compare both implementations on the same inputs.
//!
//! ## Contract
//!
//! Both backends implement the same algorithms:
//!
//! - `max_pool`: zero-pad the trailing edge of each spatial dimension, then
//!   take the maximum over each kernel window
//! - `broadcast_add`: per-axis broadcast with clamped input coordinates
//!
//! The parallel backend is a pure throughput optimization. For every valid
//! input, its output is bit-identical to the reference backend's; this is the
//! crate's central invariant and is exercised by `tests/parity.rs`.
//!
//! ## Feature Flags
//!
//! - `simd` — Enables the SSE2-accelerated width loop in [`parallel`]

pub mod dispatch;
pub mod parallel;
pub mod reference;

/// Copies a `height * width` plane into a zero-initialized
/// `padded_height * padded_width` plane, leaving the trailing rows and row
/// tails as the zero filler.
///
/// Shared by both backends so padding geometry cannot drift between them.
/// `dst` must already be zeroed.
pub(crate) fn fill_padded_plane(
    dst: &mut [i32],
    src: &[i32],
    height: usize,
    width: usize,
    padded_width: usize,
) {
    for h in 0..height {
        dst[h * padded_width..h * padded_width + width]
            .copy_from_slice(&src[h * width..(h + 1) * width]);
    }
}
