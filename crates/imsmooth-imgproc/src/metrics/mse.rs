use imsmooth_image::{Image, ImageError};

/// The peak value of an 8-bit sample.
pub const PIXEL_MAX: f64 = 255.0;

fn check_same_size<T, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<(), ImageError> {
    if image1.size() != image2.size() {
        return Err(ImageError::ShapeMismatch(image1.size(), image2.size()));
    }

    if image1.is_empty() {
        return Err(ImageError::InvalidShape(format!(
            "cannot compare empty images of {}",
            image1.size()
        )));
    }

    Ok(())
}

/// Compute the mean squared error (MSE) between two images.
///
/// The MSE is defined as:
///
/// $ MSE = \frac{1}{n} \sum_{i=1}^{n} (I_1 - I_2)^2 $
///
/// where `I_1` and `I_2` are the two images and `n` is the number of samples.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
///
/// # Errors
///
/// Returns [`ImageError::ShapeMismatch`] if the two images have different sizes and
/// [`ImageError::InvalidShape`] if they are empty.
///
/// # Example
///
/// ```
/// use imsmooth_image::Image;
/// use imsmooth_imgproc::metrics::mse;
///
/// let image1 = Image::<u8, 1>::from_rows(&[[0, 1, 2], [3, 4, 5]]).unwrap();
/// let image2 = Image::<u8, 1>::from_rows(&[[0, 3, 2], [3, 4, 5]]).unwrap();
///
/// let mse = mse(&image1, &image2).unwrap();
/// assert_eq!(mse, 4.0 / 6.0);
/// ```
pub fn mse<T, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<f64, ImageError>
where
    T: Copy + Into<f64>,
{
    check_same_size(image1, image2)?;

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .map(|(&a, &b)| {
            let diff = a.into() - b.into();
            diff * diff
        })
        .sum::<f64>();

    Ok(sum / image1.numel() as f64)
}

/// Compute the peak signal-to-noise ratio (PSNR) between two 8-bit images.
///
/// The PSNR is defined as:
///
/// $ PSNR = 10 \log_{10} \left( \frac{255^2}{MSE} \right) $
///
/// Identical images have an MSE of zero and a PSNR of `f64::INFINITY`.
///
/// # Arguments
///
/// * `reference` - The reference image, e.g. the ground truth.
/// * `test` - The image to evaluate, e.g. the smoothed image.
///
/// # Errors
///
/// Returns [`ImageError::ShapeMismatch`] if the two images have different sizes and
/// [`ImageError::InvalidShape`] if they are empty.
///
/// # Example
///
/// ```
/// use imsmooth_image::Image;
/// use imsmooth_imgproc::metrics::psnr;
///
/// let reference = Image::<u8, 1>::from_rows(&[[0, 0], [0, 0]]).unwrap();
/// let test = Image::<u8, 1>::from_rows(&[[10, 10], [10, 10]]).unwrap();
///
/// let score = psnr(&reference, &test).unwrap();
/// assert!((score - 28.1308).abs() < 1e-4);
///
/// assert_eq!(psnr(&reference, &reference).unwrap(), f64::INFINITY);
/// ```
///
/// # Note
///
/// The PSNR is expressed in decibels (dB). The higher the PSNR, the closer the
/// test image is to the reference.
pub fn psnr<T, const C: usize>(
    reference: &Image<T, C>,
    test: &Image<T, C>,
) -> Result<f64, ImageError>
where
    T: Copy + Into<f64>,
{
    psnr_with_max(reference, test, PIXEL_MAX)
}

/// Compute the peak signal-to-noise ratio (PSNR) for an arbitrary peak value.
///
/// # Arguments
///
/// * `reference` - The reference image.
/// * `test` - The image to evaluate.
/// * `max_value` - The maximum possible pixel value.
///
/// # Errors
///
/// Returns [`ImageError::ShapeMismatch`] if the two images have different sizes,
/// [`ImageError::InvalidShape`] if they are empty and
/// [`ImageError::InvalidParameter`] if `max_value` is not a positive finite number.
pub fn psnr_with_max<T, const C: usize>(
    reference: &Image<T, C>,
    test: &Image<T, C>,
    max_value: f64,
) -> Result<f64, ImageError>
where
    T: Copy + Into<f64>,
{
    if !(max_value.is_finite() && max_value > 0.0) {
        return Err(ImageError::InvalidParameter(format!(
            "peak value must be positive and finite, got {max_value}"
        )));
    }

    let mse = mse(reference, test)?;

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(10.0 * (max_value * max_value / mse).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use imsmooth_image::ImageSize;

    #[test]
    fn test_mse_equal() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::from_rows(&[[0, 1], [2, 3], [4, 5]])?;
        let image2 = image1.clone();
        assert_eq!(mse(&image1, &image2)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_mse_not_equal() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::from_rows(&[[0, 1], [2, 3]])?;
        let image2 = Image::<u8, 1>::from_rows(&[[0, 3], [2, 3]])?;
        assert_eq!(mse(&image1, &image2)?, 1.0);
        Ok(())
    }

    #[test]
    fn test_mse_no_u8_wraparound() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::from_rows(&[[0]])?;
        let image2 = Image::<u8, 1>::from_rows(&[[255]])?;
        assert_eq!(mse(&image1, &image2)?, 65025.0);
        assert_eq!(mse(&image2, &image1)?, 65025.0);
        Ok(())
    }

    #[test]
    fn test_psnr_concrete() -> Result<(), ImageError> {
        let reference = Image::<u8, 1>::from_rows(&[[0, 0], [0, 0]])?;
        let test = Image::<u8, 1>::from_rows(&[[10, 10], [10, 10]])?;

        assert_eq!(mse(&reference, &test)?, 100.0);
        assert_relative_eq!(
            psnr(&reference, &test)?,
            10.0 * (65025.0f64 / 100.0).log10()
        );
        assert_relative_eq!(psnr(&reference, &test)?, 28.1308, epsilon = 1e-4);

        Ok(())
    }

    #[test]
    fn test_psnr_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[[1, 2, 3], [4, 5, 6]])?;
        assert_eq!(psnr(&image, &image)?, f64::INFINITY);
        Ok(())
    }

    #[test]
    fn test_psnr_symmetric() -> Result<(), ImageError> {
        let a = Image::<u8, 1>::from_rows(&[[12, 200, 3], [90, 45, 6]])?;
        let b = Image::<u8, 1>::from_rows(&[[10, 190, 7], [91, 40, 0]])?;
        assert_eq!(psnr(&a, &b)?, psnr(&b, &a)?);
        Ok(())
    }

    #[test]
    fn test_psnr_monotonic() -> Result<(), ImageError> {
        let reference = Image::<u8, 1>::from_rows(&[[100, 100], [100, 100]])?;
        let close = Image::<u8, 1>::from_rows(&[[101, 100], [99, 100]])?;
        let far = Image::<u8, 1>::from_rows(&[[110, 90], [100, 100]])?;

        assert!(mse(&reference, &close)? < mse(&reference, &far)?);
        assert!(psnr(&reference, &close)? > psnr(&reference, &far)?);

        Ok(())
    }

    #[test]
    fn test_psnr_with_max() -> Result<(), ImageError> {
        let image1 = Image::<f32, 1>::new([2, 1].into(), vec![0.0, 0.5])?;
        let image2 = Image::<f32, 1>::new([2, 1].into(), vec![0.5, 0.0])?;
        // mse = 0.25, 10 * log10(1 / 0.25)
        assert_relative_eq!(
            psnr_with_max(&image1, &image2, 1.0)?,
            10.0 * 4.0f64.log10()
        );
        assert!(matches!(
            psnr_with_max(&image1, &image2, 0.0),
            Err(ImageError::InvalidParameter(_))
        ));
        Ok(())
    }

    #[test]
    fn test_shape_mismatch() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::from_rows(&[[0, 0], [0, 0]])?;
        let image2 = Image::<u8, 1>::from_rows(&[[0, 0]])?;
        assert_eq!(
            psnr(&image1, &image2),
            Err(ImageError::ShapeMismatch(
                ImageSize { width: 2, height: 2 },
                ImageSize { width: 2, height: 1 },
            ))
        );

        let empty = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        assert!(matches!(
            mse(&empty, &empty),
            Err(ImageError::InvalidShape(_))
        ));
        assert!(matches!(
            psnr(&empty, &empty),
            Err(ImageError::InvalidShape(_))
        ));
        assert!(matches!(
            psnr_with_max(&empty, &empty, 1.0),
            Err(ImageError::InvalidShape(_))
        ));

        Ok(())
    }
}
