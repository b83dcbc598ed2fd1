//! Operation Dispatch Layer
//!
//! This module selects the correct backend (reference or parallel) at runtime
//! for each kernel, based on the global [`crate::backend::Backend`].
//!
//! # Design Highlights
//! - **Minimal overhead**: one atomic load and a match per call
//! - **Deterministic**: both arms compute bit-identical results, so callers
//!   never observe which backend ran beyond elapsed time
//!
//! # Example
//! ```rust
//! use poolcast::backend::{set_backend, Backend};
//! use poolcast::ops::dispatch;
//! use poolcast::tensors::{Shape4, Tensor4};
//!
//! let t = Tensor4::filled(Shape4::new(1, 2, 8, 8), 3);
//! set_backend(Backend::Parallel);
//! let pooled = dispatch::max_pool(&t, [3, 3], [1, 1], [2, 2]);
//! assert_eq!(pooled.shape, Shape4::new(1, 2, 4, 4));
//! ```

use crate::backend::{Backend, get_backend};
use crate::tensors::{DimensionMismatch, Tensor4};

/// Dispatches max-pooling to the selected backend.
///
/// # Panics
/// Panics on incoherent window geometry (see
/// [`crate::tensors::Shape4::pooled`]); the check runs identically in either
/// backend.
pub fn max_pool(t: &Tensor4, kernel: [usize; 2], pad: [usize; 2], stride: [usize; 2]) -> Tensor4 {
    match get_backend() {
        Backend::Parallel => super::parallel::max_pool(t, kernel, pad, stride),
        Backend::Reference => super::reference::max_pool(t, kernel, pad, stride),
    }
}

/// Dispatches broadcasting addition to the selected backend.
///
/// # Errors
/// Returns [`DimensionMismatch`] if the shapes are broadcast-incompatible;
/// the compatibility check is backend-independent.
pub fn broadcast_add(t1: &Tensor4, t2: &Tensor4) -> Result<Tensor4, DimensionMismatch> {
    match get_backend() {
        Backend::Parallel => super::parallel::broadcast_add(t1, t2),
        Backend::Reference => super::reference::broadcast_add(t1, t2),
    }
}
