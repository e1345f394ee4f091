//! Image quality metrics.
//!
//! This module provides functions for quantitatively comparing a filtered image
//! against a reference, e.g. a ground truth image or the image before noise was
//! added.
//!
//! # Available Metrics
//!
//! - **MSE** (Mean Squared Error): Average squared difference between pixels
//! - **PSNR** (Peak Signal-to-Noise Ratio): Quality metric in dB scale
//!
//! All metrics accumulate in `f64`.

mod mse;

pub use mse::{mse, psnr, psnr_with_max, PIXEL_MAX};
