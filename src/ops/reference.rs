//! Sequential scalar backend.
//!
//! # Reference Backend
//!
//! Straight-line nested loops with no threading and no vector registers.
//! This is the semantic reference for the whole crate: the parallel backend
//! is only correct insofar as it reproduces these results bit for bit.
//!
//! ## Implemented Ops
//!
//! - `max_pool`: trailing-edge zero padding, then windowed maximum
//! - `broadcast_add`: element-wise sum with clamped broadcast coordinates
//!
//! ## Design Goals
//!
//! - Obvious correspondence between code and the algorithm definitions
//! - No shared state; each call allocates its own padded scratch and output

use crate::ops::fill_padded_plane;
use crate::tensors::{DimensionMismatch, Tensor4};

/// Max-pools the spatial dimensions of `t` with the given window geometry.
///
/// The input is first copied into a fresh zero-filled buffer whose spatial
/// extents are grown by `2 * pad`; the filler occupies the trailing rows and
/// columns (below and to the right of the image), so window origins coincide
/// with the unpadded origin. The input itself is never mutated.
///
/// # Returns
/// A new tensor of shape `[B, C, (H + 2*ph - kh)/sh + 1, (W + 2*pw - kw)/sw + 1]`.
///
/// # Panics
/// Panics if kernel or stride extents are zero, or if the kernel exceeds the
/// padded input (see [`crate::tensors::Shape4::pooled`]).
///
/// # Example
/// ```rust
/// use poolcast::ops::reference::max_pool;
/// use poolcast::tensors::{Shape4, Tensor4};
///
/// let t = Tensor4::filled(Shape4::new(1, 1, 4, 4), 9);
/// let out = max_pool(&t, [2, 2], [0, 0], [2, 2]);
/// assert_eq!(out.shape, Shape4::new(1, 1, 2, 2));
/// assert_eq!(out.data, vec![9; 4]);
/// ```
pub fn max_pool(t: &Tensor4, kernel: [usize; 2], pad: [usize; 2], stride: [usize; 2]) -> Tensor4 {
    let out_shape = t.shape.pooled(kernel, pad, stride);
    let padded_shape = t.shape.padded(pad);

    // padding phase
    let src_plane = t.shape.height * t.shape.width;
    let pad_plane = padded_shape.height * padded_shape.width;
    let mut padded = vec![0i32; padded_shape.len()];
    for (dst, src) in padded.chunks_mut(pad_plane).zip(t.data.chunks(src_plane)) {
        fill_padded_plane(dst, src, t.shape.height, t.shape.width, padded_shape.width);
    }

    // reduction phase
    let mut out = Tensor4::filled(out_shape, 0);
    for b in 0..out_shape.batch {
        for c in 0..out_shape.channels {
            for oh in 0..out_shape.height {
                for ow in 0..out_shape.width {
                    // window origin
                    let sx = oh * stride[0];
                    let sy = ow * stride[1];
                    let mut best = padded[padded_shape.index(b, c, sx, sy)];
                    for i in 0..kernel[0] {
                        for j in 0..kernel[1] {
                            let v = padded[padded_shape.index(b, c, sx + i, sy + j)];
                            if v > best {
                                best = v;
                            }
                        }
                    }
                    out.data[out_shape.index(b, c, oh, ow)] = best;
                }
            }
        }
    }
    out
}

/// Adds two tensors element-wise under NumPy-style broadcasting.
///
/// Each output coordinate maps back to an input coordinate by clamping every
/// axis index to `min(i, extent - 1)`; a size-1 axis therefore replicates its
/// single slice across the whole output. Addition wraps on overflow, matching
/// the vector lanes in the parallel backend.
///
/// # Errors
/// Returns [`DimensionMismatch`] before any computation if some axis pair is
/// neither equal nor 1 on either side.
///
/// # Example
/// ```rust
/// use poolcast::ops::reference::broadcast_add;
/// use poolcast::tensors::{Shape4, Tensor4};
///
/// let bias = Tensor4::filled(Shape4::new(1, 1, 1, 1), 5);
/// let row = Tensor4::new(Shape4::new(1, 1, 1, 4), vec![1, 2, 3, 4]);
/// let out = broadcast_add(&bias, &row).unwrap();
/// assert_eq!(out.data, vec![6, 7, 8, 9]);
/// ```
pub fn broadcast_add(t1: &Tensor4, t2: &Tensor4) -> Result<Tensor4, DimensionMismatch> {
    let shape = t1.shape.broadcast(&t2.shape)?;
    let s1 = t1.shape;
    let s2 = t2.shape;

    let mut out = Tensor4::filled(shape, 0);
    for b in 0..shape.batch {
        let b1 = b.min(s1.batch - 1);
        let b2 = b.min(s2.batch - 1);
        for c in 0..shape.channels {
            let c1 = c.min(s1.channels - 1);
            let c2 = c.min(s2.channels - 1);
            for h in 0..shape.height {
                let h1 = h.min(s1.height - 1);
                let h2 = h.min(s2.height - 1);
                for w in 0..shape.width {
                    let w1 = w.min(s1.width - 1);
                    let w2 = w.min(s2.width - 1);
                    out.data[shape.index(b, c, h, w)] =
                        t1.get(b1, c1, h1, w1).wrapping_add(t2.get(b2, c2, h2, w2));
                }
            }
        }
    }
    Ok(out)
}
