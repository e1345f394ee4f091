use rayon::prelude::*;
use thiserror::Error;

use imsmooth_image::ImageError;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0, got {0}")]
    InvalidRowStride(usize),

    /// The destination length is not a multiple of the row stride.
    #[error("destination length ({0}) is not a multiple of the row stride ({1})")]
    SizeMismatch(usize, usize),
}

impl From<ParallelError> for ImageError {
    fn from(err: ParallelError) -> Self {
        ImageError::Parallel(err.to_string())
    }
}

/// Controls how the rows of an output image are evaluated.
///
/// Every strategy produces the same result; output rows never depend on each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a function to each row of a destination buffer with the given strategy.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `dst` - The destination buffer, laid out as consecutive rows of `row_stride` elements.
/// * `row_stride` - The number of elements per row.
/// * `init` - Creates the per-worker scratch state handed to `op`.
/// * `op` - Called with the scratch state, the row index and the mutable row.
///
/// # Errors
///
/// Returns an error if the stride is zero, if `dst` is not made of whole rows,
/// or if the local thread pool cannot be built.
pub fn par_iter_rows_with<T, S, I, F>(
    strategy: ExecutionStrategy,
    dst: &mut [T],
    row_stride: usize,
    init: I,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    I: Fn() -> S + Send + Sync,
    F: Fn(&mut S, usize, &mut [T]) + Send + Sync,
{
    if row_stride == 0 {
        return Err(ParallelError::InvalidRowStride(row_stride));
    }

    if dst.len() % row_stride != 0 {
        return Err(ParallelError::SizeMismatch(dst.len(), row_stride));
    }

    match strategy {
        ExecutionStrategy::Serial => {
            let mut state = init();
            dst.chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| op(&mut state, y, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each_init(&init, |state, (y, row)| op(state, y, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each_init(&init, |state, (y, row)| op(state, y, row));
            });
        }
    }

    Ok(())
}
