//! Filter operations
//!
//! This module provides sliding window smoothing filters for single channel images.
//! Every output pixel is the reduction of the square window centered on it in the
//! replicate padded input.

/// Window reductions
mod reduction;
pub use reduction::Reduction;

/// Filter operations
mod ops;
pub use ops::*;
