#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// sliding window filtering module.
pub mod filter;

/// image quality metrics module.
pub mod metrics;

/// replicate border padding module.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;
