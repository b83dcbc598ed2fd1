//! Core tensor data structures.
//!
//! # 4-D Tensor Utilities
//!
//! This module defines the dense rank-4 tensor used throughout the crate,
//! together with its shape arithmetic: strided indexing, pooled-output
//! geometry, and NumPy-style broadcast resolution.
//!
//! It supports:
//! - Construction of `[batch, channels, height, width]` tensors with a flat
//!   row-major buffer
//! - Uniform-fill and per-coordinate factory constructors
//! - Shape queries used by the pooling and addition kernels
//! - Broadcast-compatibility checks with a typed [`DimensionMismatch`] error
//!
//! ## Design Highlights
//! - Shape is an explicit [`Shape4`] value, not re-derived from nesting; the
//!   data lives in one contiguous `Vec<i32>` with
//!   `index(b, c, h, w) = ((b*C + c)*H + h)*W + w`
//! - Elements are fixed at `i32`; the kernels in [`crate::ops`] rely on the
//!   128-bit-register layout of four consecutive lanes
//! - Tensors are independently owned values; operators take `&Tensor4` inputs
//!   and return freshly allocated outputs, never mutating their arguments
//!
//! ## Limitations
//! - Rank is fixed at 4
//! - Row-major only, no views or slicing
//!
//! ## Example
//!
//! ```rust
//! use poolcast::tensors::{Shape4, Tensor4};
//! let t = Tensor4::filled(Shape4::new(2, 3, 4, 4), 7);
//! assert_eq!(t.data.len(), 2 * 3 * 4 * 4);
//! assert_eq!(t.get(1, 2, 3, 3), 7);
//! ```

use std::error::Error;
use std::fmt;

/// Axis labels in storage order, used for diagnostics.
const AXIS_NAMES: [&str; 4] = ["batch", "channel", "height", "width"];

/// The shape of a rank-4 tensor, `[batch, channels, height, width]`.
///
/// All shape arithmetic lives here so the sequential and parallel backends
/// share one definition of output geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape4 {
    pub batch: usize,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl Shape4 {
    /// Creates a shape from its four extents.
    pub const fn new(batch: usize, channels: usize, height: usize, width: usize) -> Self {
        Self { batch, channels, height, width }
    }

    /// Total number of elements (`batch * channels * height * width`).
    pub const fn len(&self) -> usize {
        self.batch * self.channels * self.height * self.width
    }

    /// Returns `true` if any extent is zero.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The four extents in storage order.
    pub const fn dims(&self) -> [usize; 4] {
        [self.batch, self.channels, self.height, self.width]
    }

    /// Flat row-major offset of `(b, c, h, w)`.
    ///
    /// Coordinates are not bounds-checked here; the backing `Vec` indexing is.
    pub const fn index(&self, b: usize, c: usize, h: usize, w: usize) -> usize {
        ((b * self.channels + c) * self.height + h) * self.width + w
    }

    /// Shape after extending the spatial extents by `pad = [ph, pw]` on the
    /// trailing edge of each dimension.
    pub const fn padded(&self, pad: [usize; 2]) -> Self {
        Self {
            batch: self.batch,
            channels: self.channels,
            height: self.height + 2 * pad[0],
            width: self.width + 2 * pad[1],
        }
    }

    /// Output shape of a max-pool with the given window geometry:
    /// `out_h = (H + 2*ph - kh)/sh + 1`, and likewise for width.
    ///
    /// # Panics
    /// Panics if a kernel or stride extent is zero, or if the kernel exceeds
    /// the padded input. These are contract violations, not recoverable
    /// errors; callers are expected to pass coherent geometry.
    pub fn pooled(&self, kernel: [usize; 2], pad: [usize; 2], stride: [usize; 2]) -> Self {
        assert!(kernel[0] > 0 && kernel[1] > 0, "pooling kernel must be positive, got {kernel:?}");
        assert!(stride[0] > 0 && stride[1] > 0, "pooling stride must be positive, got {stride:?}");
        let padded = self.padded(pad);
        assert!(
            kernel[0] <= padded.height && kernel[1] <= padded.width,
            "kernel {:?} exceeds padded input {}x{}",
            kernel,
            padded.height,
            padded.width
        );
        Self {
            batch: self.batch,
            channels: self.channels,
            height: (padded.height - kernel[0]) / stride[0] + 1,
            width: (padded.width - kernel[1]) / stride[1] + 1,
        }
    }

    /// Resolves the broadcast of two shapes.
    ///
    /// Each axis pair is compatible iff the extents are equal or one of them
    /// is exactly 1; the output extent is the larger of the two. The first
    /// incompatible axis is reported in the error.
    ///
    /// # Example
    /// ```rust
    /// use poolcast::tensors::Shape4;
    /// let a = Shape4::new(32, 64, 56, 56);
    /// let b = Shape4::new(32, 1, 56, 56);
    /// assert_eq!(a.broadcast(&b).unwrap(), a);
    /// assert!(Shape4::new(1, 1, 1, 3).broadcast(&Shape4::new(1, 1, 1, 5)).is_err());
    /// ```
    pub fn broadcast(&self, other: &Shape4) -> Result<Shape4, DimensionMismatch> {
        let lhs = self.dims();
        let rhs = other.dims();
        let mut out = [0usize; 4];
        for axis in 0..4 {
            if lhs[axis] != rhs[axis] && lhs[axis] != 1 && rhs[axis] != 1 {
                return Err(DimensionMismatch { lhs: *self, rhs: *other, axis });
            }
            out[axis] = lhs[axis].max(rhs[axis]);
        }
        Ok(Shape4::new(out[0], out[1], out[2], out[3]))
    }
}

impl fmt::Display for Shape4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.batch, self.channels, self.height, self.width)
    }
}

/// Two tensor shapes that cannot be broadcast together.
///
/// Returned by [`Shape4::broadcast`] and the addition kernels when an axis
/// pair is neither equal nor 1 on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionMismatch {
    /// Left-hand shape.
    pub lhs: Shape4,
    /// Right-hand shape.
    pub rhs: Shape4,
    /// Index of the first incompatible axis (0 = batch .. 3 = width).
    pub axis: usize,
}

impl fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot broadcast {} with {}: {} extents {} and {} differ and neither is 1",
            self.lhs,
            self.rhs,
            AXIS_NAMES[self.axis],
            self.lhs.dims()[self.axis],
            self.rhs.dims()[self.axis]
        )
    }
}

impl Error for DimensionMismatch {}

/// A dense rank-4 tensor of `i32` with flat row-major data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor4 {
    pub shape: Shape4,
    pub data: Vec<i32>,
}

impl Tensor4 {
    /// Creates a tensor from a shape and flat data.
    ///
    /// # Panics
    /// Panics if `data.len()` does not equal the shape volume.
    pub fn new(shape: Shape4, data: Vec<i32>) -> Self {
        assert_eq!(
            shape.len(),
            data.len(),
            "shape {shape} is incompatible with {} data elements",
            data.len()
        );
        Self { shape, data }
    }

    /// Allocates a tensor where every element equals `fill`.
    ///
    /// This is the factory used for all fresh outputs; allocation and
    /// initialization are O(volume).
    ///
    /// # Example
    /// ```rust
    /// use poolcast::tensors::{Shape4, Tensor4};
    /// let t = Tensor4::filled(Shape4::new(1, 1, 2, 2), 5);
    /// assert_eq!(t.data, vec![5, 5, 5, 5]);
    /// ```
    pub fn filled(shape: Shape4, fill: i32) -> Self {
        Self { shape, data: vec![fill; shape.len()] }
    }

    /// Builds a tensor by evaluating `f(b, c, h, w)` at every coordinate in
    /// row-major order.
    pub fn from_fn(shape: Shape4, mut f: impl FnMut(usize, usize, usize, usize) -> i32) -> Self {
        let mut data = Vec::with_capacity(shape.len());
        for b in 0..shape.batch {
            for c in 0..shape.channels {
                for h in 0..shape.height {
                    for w in 0..shape.width {
                        data.push(f(b, c, h, w));
                    }
                }
            }
        }
        Self { shape, data }
    }

    /// Reads the element at `(b, c, h, w)`.
    ///
    /// # Panics
    /// Panics if the flat offset falls outside the buffer.
    pub fn get(&self, b: usize, c: usize, h: usize, w: usize) -> i32 {
        self.data[self.shape.index(b, c, h, w)]
    }
}
