use crate::image::ImageSize;

/// An error type for the image and image processing modules.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the sample grid is empty or its rows have different lengths.
    #[error("Invalid image shape: {0}")]
    InvalidShape(String),

    /// Error when an operation parameter is out of its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch: {0} vs {1}")]
    ShapeMismatch(ImageSize, ImageSize),

    /// Error when a pixel is out of bounds.
    #[error("Pixel coordinate ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the image data cannot be cast.
    #[error("Failed to cast image data")]
    CastError,

    /// Error when the worker pool for a parallel evaluation fails.
    #[error("Parallel execution failed. {0}")]
    Parallel(String),
}
