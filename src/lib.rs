//! poolcast: a fixed max-pool + broadcast-add tensor pipeline.
//!
//! Implements one hard-wired two-stage computation over dense rank-4 integer
//! tensors — spatial max-pooling followed by a broadcasting element-wise
//! addition — twice: once as plain sequential loops, once parallelized with
//! rayon and vectorized with SSE2. Both produce bit-identical results; the
//! point of the crate is comparing their throughput while proving the
//! optimized path changes nothing semantically.
//!
//! # Features
//!
//! - Dense `[batch, channels, height, width]` tensors with a flat row-major
//!   buffer and explicit shape arithmetic.
//! - Max-pooling with configurable kernel, trailing-edge zero padding, and
//!   stride.
//! - NumPy-style broadcasting addition with a typed shape-mismatch error.
//! - Runtime backend switching between the reference and parallel
//!   implementations.
//!
//! # Modules
//!
//! - [`tensors`] — Shapes, the tensor type, and broadcast resolution.
//! - [`backend`] — Global selection between the two implementations.
//! - [`ops`] — The reference and parallel kernels plus dispatch.
//! - [`graph`] — User-facing pipeline entry points.
//!
//! # Example
//!
//! ```rust
//! use poolcast::graph::forward;
//! use poolcast::tensors::{Shape4, Tensor4};
//!
//! let src1 = Tensor4::filled(Shape4::new(2, 4, 112, 112), 0);
//! let src2 = Tensor4::filled(Shape4::new(2, 1, 56, 56), 1);
//! let dst = forward(&src1, &src2, [3, 3], [1, 1], [2, 2]).unwrap();
//! assert_eq!(dst.shape, Shape4::new(2, 4, 56, 56));
//! ```

pub mod backend;
pub mod graph;
pub mod ops;
pub mod tensors;
