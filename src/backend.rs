//! Backend selection module.
//!
//! This module defines the available computation backends for the pipeline
//! and provides functions to set and get the current backend.
//!
//! # Supported Backends
//!
//! - `Reference` — Sequential scalar loops; the semantic reference (default).
//! - `Parallel` — Rayon fork-join over the outer dimensions, with a SIMD
//!   fast path when built with `--features=simd`.
//!
//! The backend is stored globally using an `AtomicU8`, enabling fast
//! switching between the two implementations at runtime. The timing demo
//! relies on this to run the same workload through both and compare.
//!
//! Whichever backend is selected, outputs are bit-identical; the choice only
//! affects throughput.

use core::convert::TryFrom;
use core::sync::atomic::{AtomicU8, Ordering};

/// Enumeration of supported computation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Backend {
    /// Sequential scalar backend (default).
    #[default]
    Reference = 0,
    /// Rayon-parallel backend with optional SIMD inner loops.
    Parallel,
}

impl TryFrom<u8> for Backend {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Reference),
            1 => Ok(Self::Parallel),
            _ => Err(()),
        }
    }
}

/// Internal global state for the active backend.
///
/// This uses acquire/release ordering; the backend is only expected to change
/// between pipeline runs, never mid-operation.
#[cfg(target_has_atomic = "8")]
static GLOBAL_DEFAULT_BACKEND: AtomicU8 = AtomicU8::new(Backend::Reference as u8);

/// A mutable non-atomic unsynchronized backend state.
///
/// It is assumed that this will not be accessed concurrently on targets
/// without 8-bit atomics.
#[cfg(not(target_has_atomic = "8"))]
static mut UNSAFE_GLOBAL_BACKEND: u8 = Backend::Reference as u8;

/// Sets the active backend to use for tensor computation.
///
/// # Example
///
/// ```
/// use poolcast::backend::{set_backend, Backend};
/// set_backend(Backend::Parallel);
/// ```
pub fn set_backend(b: Backend) {
    #[cfg(not(target_has_atomic = "8"))]
    unsafe {
        UNSAFE_GLOBAL_BACKEND = b as u8;
    }
    #[cfg(target_has_atomic = "8")]
    GLOBAL_DEFAULT_BACKEND.store(b as u8, Ordering::Release);
}

/// Returns the currently active computation backend.
///
/// If the stored value is invalid, defaults to [`Backend::Reference`].
///
/// # Example
///
/// ```
/// use poolcast::backend::get_backend;
/// let backend = get_backend();
/// ```
pub fn get_backend() -> Backend {
    #[cfg(not(target_has_atomic = "8"))]
    {
        Backend::try_from(unsafe { UNSAFE_GLOBAL_BACKEND }).unwrap_or_default()
    }
    #[cfg(target_has_atomic = "8")]
    Backend::try_from(GLOBAL_DEFAULT_BACKEND.load(Ordering::Acquire)).unwrap_or_default()
}
