use imsmooth_image::{Image, ImageError};

use super::Reduction;
use crate::padding::{filter_radius, replicate_padding};
use crate::parallel::{par_iter_rows_with, ExecutionStrategy};

/// The filter size used when the caller has no preference.
pub const DEFAULT_FILTER_SIZE: usize = 3;

/// Filter an image by reducing the square window around every pixel.
///
/// The source is replicate padded by `filter_size / 2` pixels so that every window
/// is complete, then each output pixel `(y, x)` is the reduction of the
/// `filter_size x filter_size` window of the padded image centered at
/// `(y + filter_size / 2, x + filter_size / 2)`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 1).
/// * `filter_size` - The size of the square window, a positive odd number.
/// * `reduction` - How a window becomes one sample.
/// * `strategy` - How the output rows are evaluated.
///
/// # Errors
///
/// * [`ImageError::InvalidParameter`] if `filter_size` is zero, even or too large
///   for the padded image to fit in memory.
/// * [`ImageError::InvalidShape`] if `src` is empty.
/// * [`ImageError::ShapeMismatch`] if `src` and `dst` have different sizes.
pub fn window_filter_into(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    filter_size: usize,
    reduction: Reduction,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    filter_radius(filter_size)?;

    if src.is_empty() {
        return Err(ImageError::InvalidShape(format!(
            "cannot filter an empty image of {}",
            src.size()
        )));
    }

    if src.size() != dst.size() {
        return Err(ImageError::ShapeMismatch(src.size(), dst.size()));
    }

    log::debug!(
        "{:?} filter of size {} over {} ({:?})",
        reduction,
        filter_size,
        src.size(),
        strategy
    );

    let padded = replicate_padding(src, filter_size)?;
    let padded_cols = padded.cols();
    let padded_data = padded.as_slice();
    let window_len = filter_size * filter_size;

    par_iter_rows_with(
        strategy,
        dst.as_slice_mut(),
        src.cols(),
        || Vec::with_capacity(window_len),
        |window: &mut Vec<u8>, y, dst_row| {
            for (x, dst_pixel) in dst_row.iter_mut().enumerate() {
                // the window centered at (y + r, x + r) starts at (y, x) in the padded image
                window.clear();
                for wy in y..y + filter_size {
                    let start = wy * padded_cols + x;
                    window.extend_from_slice(&padded_data[start..start + filter_size]);
                }
                *dst_pixel = reduction.reduce(window);
            }
        },
    )?;

    Ok(())
}

/// Filter an image by reducing the square window around every pixel.
///
/// Allocating version of [`window_filter_into`].
///
/// # Example
///
/// ```
/// use imsmooth_image::Image;
/// use imsmooth_imgproc::filter::{window_filter, Reduction};
/// use imsmooth_imgproc::parallel::ExecutionStrategy;
///
/// let src = Image::<u8, 1>::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
/// let dst = window_filter(&src, 3, Reduction::Median, ExecutionStrategy::ParallelRows).unwrap();
///
/// assert_eq!(dst.to_rows(), vec![vec![2, 3, 3], vec![4, 5, 6], vec![7, 7, 8]]);
/// ```
pub fn window_filter(
    src: &Image<u8, 1>,
    filter_size: usize,
    reduction: Reduction,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 1>, ImageError> {
    let mut dst = Image::from_size_val(src.size(), 0u8)?;
    window_filter_into(src, &mut dst, filter_size, reduction, strategy)?;
    Ok(dst)
}

/// Smooth an image with a mean (box) filter using replicate padding.
///
/// The mean of each window is truncated to the output sample, not rounded.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `filter_size` - The size of the square window, a positive odd number.
///
/// # Example
///
/// ```
/// use imsmooth_image::Image;
/// use imsmooth_imgproc::filter::{mean_filter, DEFAULT_FILTER_SIZE};
///
/// let src = Image::<u8, 1>::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
/// let dst = mean_filter(&src, DEFAULT_FILTER_SIZE).unwrap();
///
/// assert_eq!(dst.to_rows(), vec![vec![2, 3, 3], vec![4, 5, 5], vec![6, 7, 7]]);
/// ```
pub fn mean_filter(src: &Image<u8, 1>, filter_size: usize) -> Result<Image<u8, 1>, ImageError> {
    window_filter(src, filter_size, Reduction::Mean, ExecutionStrategy::Serial)
}

/// Smooth an image with a median filter using replicate padding.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `filter_size` - The size of the square window, a positive odd number.
pub fn median_filter(src: &Image<u8, 1>, filter_size: usize) -> Result<Image<u8, 1>, ImageError> {
    window_filter(src, filter_size, Reduction::Median, ExecutionStrategy::Serial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsmooth_image::ImageSize;

    fn make_ramp_3x3() -> Result<Image<u8, 1>, ImageError> {
        Image::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]])
    }

    #[test]
    fn test_mean_filter_ramp() -> Result<(), ImageError> {
        let dst = mean_filter(&make_ramp_3x3()?, 3)?;
        assert_eq!(
            dst.to_rows(),
            vec![vec![2, 3, 3], vec![4, 5, 5], vec![6, 7, 7]]
        );
        Ok(())
    }

    #[test]
    fn test_median_filter_ramp() -> Result<(), ImageError> {
        let dst = median_filter(&make_ramp_3x3()?, 3)?;
        assert_eq!(
            dst.to_rows(),
            vec![vec![2, 3, 3], vec![4, 5, 6], vec![7, 7, 8]]
        );
        Ok(())
    }

    #[test]
    fn test_constant_image() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_rows(&[[10; 3]; 3])?;

        let mean = mean_filter(&src, 3)?;
        let median = median_filter(&src, 3)?;

        assert_eq!(mean.get_pixel(1, 1, 0)?, 10);
        assert_eq!(median.get_pixel(1, 1, 0)?, 10);
        assert_eq!(mean, src);
        assert_eq!(median, src);

        Ok(())
    }

    #[test]
    fn test_filter_size_one_is_identity() -> Result<(), ImageError> {
        let src = make_ramp_3x3()?;
        assert_eq!(mean_filter(&src, 1)?, src);
        assert_eq!(median_filter(&src, 1)?, src);
        Ok(())
    }

    #[test]
    fn test_median_removes_impulse() -> Result<(), ImageError> {
        let mut rows = [[20u8; 5]; 5];
        rows[2][2] = 255;
        let src = Image::<u8, 1>::from_rows(&rows)?;

        let median = median_filter(&src, 3)?;
        assert!(median.as_slice().iter().all(|&v| v == 20));

        // the impulse leaks into every mean window that covers it: 20 + 235 / 9
        let mean = mean_filter(&src, 3)?;
        assert_eq!(mean.get_pixel(2, 2, 0)?, 46);
        assert_eq!(mean.get_pixel(1, 1, 0)?, 46);
        assert_eq!(mean.get_pixel(0, 0, 0)?, 20);

        Ok(())
    }

    #[test]
    fn test_window_filter_non_square() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_rows(&[[0, 0, 0, 0], [90, 90, 90, 90]])?;

        let median = window_filter(&src, 3, Reduction::Median, ExecutionStrategy::Serial)?;
        assert_eq!(median.size(), ImageSize { width: 4, height: 2 });
        assert_eq!(median, src);

        let mean = window_filter(&src, 3, Reduction::Mean, ExecutionStrategy::Serial)?;
        assert_eq!(mean.to_rows(), vec![vec![30; 4], vec![60; 4]]);

        Ok(())
    }

    #[test]
    fn test_window_filter_strategies_agree() -> Result<(), ImageError> {
        let data = (0..13 * 7).map(|i| ((i * 37) % 256) as u8).collect();
        let src = Image::<u8, 1>::new([13, 7].into(), data)?;

        for reduction in [Reduction::Mean, Reduction::Median] {
            let serial = window_filter(&src, 5, reduction, ExecutionStrategy::Serial)?;
            let rows = window_filter(&src, 5, reduction, ExecutionStrategy::ParallelRows)?;
            let fixed = window_filter(&src, 5, reduction, ExecutionStrategy::Fixed(3))?;
            assert_eq!(serial, rows);
            assert_eq!(serial, fixed);
        }

        Ok(())
    }

    #[test]
    fn test_window_filter_errors() -> Result<(), ImageError> {
        let src = make_ramp_3x3()?;

        assert!(matches!(
            mean_filter(&src, 0),
            Err(ImageError::InvalidParameter(_))
        ));
        assert!(matches!(
            median_filter(&src, 4),
            Err(ImageError::InvalidParameter(_))
        ));

        // the padded size would overflow usize
        let pixel = Image::<u8, 1>::from_rows(&[[9]])?;
        assert!(matches!(
            mean_filter(&pixel, usize::MAX),
            Err(ImageError::InvalidParameter(_))
        ));
        assert!(matches!(
            median_filter(&src, (1 << (usize::BITS / 2)) + 1),
            Err(ImageError::InvalidParameter(_))
        ));

        let empty = Image::<u8, 1>::new([0, 3].into(), vec![])?;
        assert!(matches!(
            mean_filter(&empty, 3),
            Err(ImageError::InvalidShape(_))
        ));

        let mut dst = Image::<u8, 1>::from_size_val([2, 3].into(), 0)?;
        let res = window_filter_into(
            &src,
            &mut dst,
            3,
            Reduction::Mean,
            ExecutionStrategy::Serial,
        );
        assert!(matches!(res, Err(ImageError::ShapeMismatch(_, _))));

        let mut dst = Image::<u8, 1>::from_size_val([3, 3].into(), 0)?;
        let res = window_filter_into(
            &src,
            &mut dst,
            3,
            Reduction::Mean,
            ExecutionStrategy::Fixed(0),
        );
        assert!(matches!(res, Err(ImageError::Parallel(_))));

        Ok(())
    }
}
