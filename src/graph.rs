//! The fixed two-stage pipeline.
//!
//! # Pipeline Operations
//!
//! User-facing entry points for the crate's hard-wired computation:
//!
//! ```text
//! dst = broadcast_add(max_pool(src1, kernel, pad, stride), src2)
//! ```
//!
//! Each function forwards to [`crate::ops::dispatch`], so the active
//! [`crate::backend::Backend`] decides whether the sequential reference or
//! the rayon/SIMD implementation runs. There is no operator graph: the two
//! ops compose at the call site, and [`forward`] is merely that composition
//! spelled out.
//!
//! ## Usage Guidelines
//!
//! - `max_pool` **panics** on incoherent window geometry; keep kernels within
//!   the padded input.
//! - `broadcast_add` returns `Err` on incompatible shapes rather than
//!   producing a placeholder result.

use crate::tensors::{DimensionMismatch, Tensor4};

/// Max-pools the spatial dimensions of `t`.
///
/// # Returns
/// A new tensor of shape `[B, C, (H + 2*ph - kh)/sh + 1, (W + 2*pw - kw)/sw + 1]`.
/// The input is not mutated; padding happens in a private scratch buffer.
///
/// # Panics
/// Panics if a kernel or stride extent is zero, or the kernel exceeds the
/// padded input.
///
/// # Performance
/// Pads and reduces one `(batch, channel)` plane per rayon worker when the
/// `Parallel` backend is selected.
///
/// # Example
/// ```rust
/// use poolcast::graph::max_pool;
/// use poolcast::tensors::{Shape4, Tensor4};
///
/// let t = Tensor4::filled(Shape4::new(1, 1, 112, 112), 0);
/// let out = max_pool(&t, [3, 3], [1, 1], [2, 2]);
/// assert_eq!(out.shape, Shape4::new(1, 1, 56, 56));
/// ```
pub fn max_pool(t: &Tensor4, kernel: [usize; 2], pad: [usize; 2], stride: [usize; 2]) -> Tensor4 {
    crate::ops::dispatch::max_pool(t, kernel, pad, stride)
}

/// Adds two tensors element-wise under NumPy-style broadcasting.
///
/// Per axis, extents must be equal or one of them exactly 1; the output
/// extent is the larger of the two, and a size-1 axis replicates its single
/// slice.
///
/// # Errors
/// Returns [`DimensionMismatch`] naming the first incompatible axis.
///
/// # Example
/// ```rust
/// use poolcast::graph::broadcast_add;
/// use poolcast::tensors::{Shape4, Tensor4};
///
/// let a = Tensor4::filled(Shape4::new(2, 3, 4, 4), 1);
/// let bias = Tensor4::filled(Shape4::new(2, 1, 4, 4), 10);
/// let out = broadcast_add(&a, &bias).unwrap();
/// assert_eq!(out.shape, a.shape);
/// assert!(out.data.iter().all(|&v| v == 11));
/// ```
pub fn broadcast_add(t1: &Tensor4, t2: &Tensor4) -> Result<Tensor4, DimensionMismatch> {
    crate::ops::dispatch::broadcast_add(t1, t2)
}

/// Runs the full pipeline: pool `src1`, then add `src2` to the result.
///
/// This is the published formulation
/// `dst[32,64,56,56] = add(max_pool(src1[32,64,112,112]), src2[32,1,56,56])`
/// generalized to any coherent shapes.
///
/// # Errors
/// Returns [`DimensionMismatch`] if `src2` cannot broadcast against the
/// pooled shape.
///
/// # Panics
/// Panics under the same geometry preconditions as [`max_pool`].
pub fn forward(
    src1: &Tensor4,
    src2: &Tensor4,
    kernel: [usize; 2],
    pad: [usize; 2],
    stride: [usize; 2],
) -> Result<Tensor4, DimensionMismatch> {
    let pooled = max_pool(src1, kernel, pad, stride);
    broadcast_add(&pooled, src2)
}
