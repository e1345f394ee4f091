use imsmooth_image::{Image, ImageError, ImageSize};

/// Maps a possibly out-of-range index to `[0, len)` by clamping to the nearest edge.
///
/// This is the replicate border rule: `...d c b a | a a a a...`
///
/// # Arguments
/// - `i`: The (possibly out-of-range) coordinate index.
/// - `len`: The valid length of the dimension. Must be greater than zero.
#[inline]
pub fn replicate_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// The same amount of padding on every side.
    pub fn uniform(pad: usize) -> Self {
        Self {
            top: pad,
            bottom: pad,
            left: pad,
            right: pad,
        }
    }

    /// The padding a square filter of `filter_size` needs to keep the image size.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidParameter`] when `filter_size` is zero or even.
    pub fn from_filter_size(filter_size: usize) -> Result<Self, ImageError> {
        Ok(Self::uniform(filter_radius(filter_size)?))
    }

    /// The image size after applying this padding to an image of `size`.
    ///
    /// Returns `None` if a dimension overflows `usize`.
    pub fn padded_size(&self, size: ImageSize) -> Option<ImageSize> {
        Some(ImageSize {
            width: size.width.checked_add(self.left)?.checked_add(self.right)?,
            height: size.height.checked_add(self.top)?.checked_add(self.bottom)?,
        })
    }

    /// Validates that a new image size correctly matches the expected dimensions
    /// after applying this padding to an existing image.
    ///
    /// # Example
    /// ```rust
    /// use imsmooth_image::ImageSize;
    /// use imsmooth_imgproc::padding::Padding2D;
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let old_size = ImageSize { width: 4, height: 4 };
    /// let new_size = ImageSize { width: 8, height: 6 };
    ///
    /// assert!(padding.validate_size(old_size, new_size));
    /// ```
    pub fn validate_size(&self, old_size: ImageSize, new_size: ImageSize) -> bool {
        self.padded_size(old_size) == Some(new_size)
    }
}

/// Returns `filter_size / 2` for a valid square filter size.
///
/// Only odd sizes have a central pixel, so zero and even sizes are rejected
/// instead of producing an asymmetric window.
pub(crate) fn filter_radius(filter_size: usize) -> Result<usize, ImageError> {
    if filter_size == 0 || filter_size % 2 == 0 {
        return Err(ImageError::InvalidParameter(format!(
            "filter size must be a positive odd number, got {filter_size}"
        )));
    }
    Ok(filter_size / 2)
}

/// Writes `src` into the center of `dst` and fills the border by replicating the
/// nearest edge pixel of `src`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image where the padded output will be stored.
/// * `padding` - The amount of padding (in pixels) for all four sides.
///
/// # Errors
///
/// Returns [`ImageError::InvalidShape`] if `src` is empty,
/// [`ImageError::InvalidParameter`] if the padded size overflows `usize` and
/// [`ImageError::ShapeMismatch`] if the size of `dst` does not match the size of
/// `src` after applying `padding`.
///
/// # Example
///
/// ```rust
/// use imsmooth_image::Image;
/// use imsmooth_imgproc::padding::{spatial_padding, Padding2D};
///
/// let src = Image::<u8, 1>::from_rows(&[[1, 2], [3, 4]]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val([4, 4].into(), 0).unwrap();
///
/// spatial_padding(&src, &mut dst, &Padding2D::uniform(1)).unwrap();
///
/// assert_eq!(
///     dst.to_rows(),
///     vec![
///         vec![1, 1, 2, 2],
///         vec![1, 1, 2, 2],
///         vec![3, 3, 4, 4],
///         vec![3, 3, 4, 4],
///     ]
/// );
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: &Padding2D,
) -> Result<(), ImageError>
where
    T: Copy,
{
    if src.is_empty() {
        return Err(ImageError::InvalidShape(format!(
            "cannot pad an empty image of {}",
            src.size()
        )));
    }

    let Some(expected_size) = padding.padded_size(src.size()) else {
        return Err(ImageError::InvalidParameter(format!(
            "padding {:?} overflows the size of {}",
            padding,
            src.size()
        )));
    };

    if dst.size() != expected_size {
        return Err(ImageError::ShapeMismatch(dst.size(), expected_size));
    }

    log::trace!("replicate padding {} by {:?}", src.size(), padding);

    let old_width = src.width();
    let new_width = dst.width();
    let new_height = dst.height();

    let old_stride = old_width * C;
    let new_stride = new_width * C;

    let old_data = src.as_slice();
    let new_data = dst.as_slice_mut();

    // copy old image data as center of new image data, replicating the first and
    // last column of every row into the left and right borders
    for (src_row, dst_row) in old_data
        .chunks_exact(old_stride)
        .zip(new_data[padding.top * new_stride..].chunks_exact_mut(new_stride))
    {
        let center = padding.left * C;
        dst_row[center..center + old_stride].copy_from_slice(src_row);

        for x in (0..padding.left).chain(padding.left + old_width..new_width) {
            let src_x = replicate_index(x as isize - padding.left as isize, old_width);
            let dst_idx = x * C;
            dst_row[dst_idx..dst_idx + C].copy_from_slice(&src_row[src_x * C..(src_x + 1) * C]);
        }
    }

    // top: every row is a copy of the first padded row
    {
        let (top_section, rest) = new_data.split_at_mut(padding.top * new_stride);
        let first_row = &rest[..new_stride];
        top_section
            .chunks_exact_mut(new_stride)
            .for_each(|dst_row| dst_row.copy_from_slice(first_row));
    }

    // bottom: every row is a copy of the last padded row
    {
        let split_point = (new_height - padding.bottom) * new_stride;
        let (rest, bottom_section) = new_data.split_at_mut(split_point);
        let last_row = &rest[rest.len() - new_stride..];
        bottom_section
            .chunks_exact_mut(new_stride)
            .for_each(|dst_row| dst_row.copy_from_slice(last_row));
    }

    Ok(())
}

/// Pads an image for a square filter of `filter_size` by replicating its edges.
///
/// With `p = filter_size / 2`, the result has size `(width + 2p, height + 2p)` and
/// pixel `(i, j)` of the result equals `src[clamp(i - p), clamp(j - p)]`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `filter_size` - The size of the square filter, a positive odd number.
///
/// # Errors
///
/// Returns [`ImageError::InvalidParameter`] for a zero or even `filter_size` or
/// one too large for the padded image to be allocated, and
/// [`ImageError::InvalidShape`] for an empty `src`.
///
/// # Example
///
/// ```rust
/// use imsmooth_image::Image;
/// use imsmooth_imgproc::padding::replicate_padding;
///
/// let src = Image::<u8, 1>::from_rows(&[[10; 3]; 3]).unwrap();
/// let padded = replicate_padding(&src, 3).unwrap();
///
/// assert_eq!(padded.width(), 5);
/// assert_eq!(padded.height(), 5);
/// assert!(padded.as_slice().iter().all(|&v| v == 10));
/// ```
pub fn replicate_padding<T, const C: usize>(
    src: &Image<T, C>,
    filter_size: usize,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy,
{
    let padding = Padding2D::from_filter_size(filter_size)?;

    let Some(&fill) = src.as_slice().first() else {
        return Err(ImageError::InvalidShape(format!(
            "cannot pad an empty image of {}",
            src.size()
        )));
    };

    let padded_size = padding
        .padded_size(src.size())
        .filter(|size| {
            size.width
                .checked_mul(size.height)
                .and_then(|area| area.checked_mul(C))
                .is_some()
        })
        .ok_or_else(|| {
            ImageError::InvalidParameter(format!(
                "filter size {} is too large for an image of {}",
                filter_size,
                src.size()
            ))
        })?;

    let mut dst = Image::from_size_val(padded_size, fill)?;
    spatial_padding(src, &mut dst, &padding)?;

    Ok(dst)
}
