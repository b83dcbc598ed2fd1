//! Parallel CPU backend.
//!
//! # Parallel Backend
//!
//! Rayon-accelerated implementations of the same two kernels as
//! [`crate::ops::reference`], decomposed so every worker writes a disjoint
//! slice of the output:
//!
//! - `max_pool` parallelizes both of its phases over `(batch, channel)`
//!   planes; the padding pass joins before the reduction pass starts, since
//!   the reduction reads padded elements from every plane it owns
//! - `broadcast_add` parallelizes over the output batch axis
//!
//! ## Features
//!
//! - Parallel execution using [`rayon`](https://docs.rs/rayon)
//! - Optional SIMD acceleration of the width loop using SSE2 (enabled via
//!   the `simd` feature flag)
//! - Pure Rust fallback path when SIMD is disabled or unavailable
//!
//! ## Design Goals
//!
//! - Bit-identical output to the reference backend for every valid input;
//!   thread count and work partitioning must never be observable in results
//! - No locking: `par_chunks_mut` hands each worker exclusive ownership of
//!   its output slab, and the fork-join structure is the only synchronization
//!
//! ## Safety
//!
//! The SIMD path uses `unsafe` for unaligned 128-bit loads and stores. All
//! pointers derive from in-bounds slice indices, and the 4-lane loop only
//! runs over the width prefix that holds complete groups; the remainder goes
//! through the scalar tail.

use rayon::prelude::*;

use crate::ops::fill_padded_plane;
use crate::tensors::{DimensionMismatch, Tensor4};

#[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "sse2"))]
use std::arch::x86_64::*;

/// Max-pools the spatial dimensions of `t`, one `(batch, channel)` plane per
/// unit of parallel work.
///
/// Semantics are identical to [`crate::ops::reference::max_pool`]: fresh
/// trailing-edge zero padding, then a windowed maximum with origins at
/// `(oh * sh, ow * sw)`. The padding pass completes for every plane before
/// the reduction pass begins.
///
/// # Panics
/// Panics on zero kernel/stride extents or a kernel exceeding the padded
/// input (see [`crate::tensors::Shape4::pooled`]).
pub fn max_pool(t: &Tensor4, kernel: [usize; 2], pad: [usize; 2], stride: [usize; 2]) -> Tensor4 {
    let out_shape = t.shape.pooled(kernel, pad, stride);
    let padded_shape = t.shape.padded(pad);

    let src_plane = t.shape.height * t.shape.width;
    let pad_plane = padded_shape.height * padded_shape.width;
    let out_plane = out_shape.height * out_shape.width;

    // padding phase: each worker owns one (b, c) plane of the scratch buffer
    let mut padded = vec![0i32; padded_shape.len()];
    padded
        .par_chunks_mut(pad_plane)
        .zip(t.data.par_chunks(src_plane))
        .for_each(|(dst, src)| {
            fill_padded_plane(dst, src, t.shape.height, t.shape.width, padded_shape.width);
        });

    // the par_chunks_mut above has joined: every padded plane is complete
    // before any window is scanned
    let mut data = vec![0i32; out_shape.len()];
    data.par_chunks_mut(out_plane)
        .zip(padded.par_chunks(pad_plane))
        .for_each(|(out, plane)| {
            for oh in 0..out_shape.height {
                for ow in 0..out_shape.width {
                    let sx = oh * stride[0];
                    let sy = ow * stride[1];
                    let mut best = plane[sx * padded_shape.width + sy];
                    for i in 0..kernel[0] {
                        let row = &plane[(sx + i) * padded_shape.width + sy..][..kernel[1]];
                        for &v in row {
                            if v > best {
                                best = v;
                            }
                        }
                    }
                    out[oh * out_shape.width + ow] = best;
                }
            }
        });

    Tensor4::new(out_shape, data)
}

/// Adds two tensors element-wise under broadcasting, one output batch slab
/// per unit of parallel work.
///
/// Within a slab the channel/height loops clamp their coordinates exactly
/// like the reference backend, then hand each output row to `add_rows`,
/// which is where the SIMD fast path lives.
///
/// # Errors
/// Returns [`DimensionMismatch`] before any computation if the shapes are
/// broadcast-incompatible.
pub fn broadcast_add(t1: &Tensor4, t2: &Tensor4) -> Result<Tensor4, DimensionMismatch> {
    let shape = t1.shape.broadcast(&t2.shape)?;
    let s1 = t1.shape;
    let s2 = t2.shape;
    let slab = shape.channels * shape.height * shape.width;

    let mut data = vec![0i32; shape.len()];
    data.par_chunks_mut(slab).enumerate().for_each(|(b, slab_data)| {
        let b1 = b.min(s1.batch - 1);
        let b2 = b.min(s2.batch - 1);
        for c in 0..shape.channels {
            let c1 = c.min(s1.channels - 1);
            let c2 = c.min(s2.channels - 1);
            for h in 0..shape.height {
                let h1 = h.min(s1.height - 1);
                let h2 = h.min(s2.height - 1);
                let out_row =
                    &mut slab_data[(c * shape.height + h) * shape.width..][..shape.width];
                let lhs = &t1.data[s1.index(b1, c1, h1, 0)..][..s1.width];
                let rhs = &t2.data[s2.index(b2, c2, h2, 0)..][..s2.width];
                add_rows(out_row, lhs, rhs);
            }
        }
    });

    Ok(Tensor4::new(shape, data))
}

/// Sums one output row from two input rows, each of which is either full
/// width or a single broadcast-replicated element.
///
/// Processes the width in groups of 4 `i32` lanes per 128-bit register; a
/// size-1 input is splat across all lanes. The `width % 4` remainder runs the
/// scalar path. Lane adds wrap on overflow, as does the scalar tail.
#[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "sse2"))]
fn add_rows(out: &mut [i32], lhs: &[i32], rhs: &[i32]) {
    const LANES: usize = 4;
    let full = out.len() - out.len() % LANES;

    let mut w = 0;
    while w < full {
        unsafe {
            let x1 = if lhs.len() == 1 {
                _mm_set1_epi32(lhs[0])
            } else {
                _mm_loadu_si128(lhs.as_ptr().add(w).cast())
            };
            let x2 = if rhs.len() == 1 {
                _mm_set1_epi32(rhs[0])
            } else {
                _mm_loadu_si128(rhs.as_ptr().add(w).cast())
            };
            let sum = _mm_add_epi32(x1, x2);
            _mm_storeu_si128(out.as_mut_ptr().add(w).cast(), sum);
        }
        w += LANES;
    }

    for w in full..out.len() {
        out[w] = lhs[w.min(lhs.len() - 1)].wrapping_add(rhs[w.min(rhs.len() - 1)]);
    }
}

/// Scalar fallback for [`add_rows`] when SIMD is disabled or unavailable.
#[cfg(not(all(feature = "simd", target_arch = "x86_64", target_feature = "sse2")))]
fn add_rows(out: &mut [i32], lhs: &[i32], rhs: &[i32]) {
    for w in 0..out.len() {
        out[w] = lhs[w.min(lhs.len() - 1)].wrapping_add(rhs[w.min(rhs.len() - 1)]);
    }
}
