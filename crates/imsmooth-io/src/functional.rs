use std::path::Path;

use imsmooth_image::{Image, ImageSize};

use crate::error::IoError;

fn check_exists(file_path: &Path) -> Result<(), IoError> {
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }
    Ok(())
}

fn has_extension(file_path: &Path, extensions: &[&str]) -> bool {
    file_path.extension().is_some_and(|ext| {
        let ext = ext.to_ascii_lowercase();
        extensions.iter().any(|e| ext == *e)
    })
}

/// Reads an image from the given file path as 8-bit grayscale.
///
/// The method tries to read from any image format supported by the image crate.
/// Color images are converted to luma by the decoder.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A single channel image with the decoded samples.
pub fn read_image_any_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let file_path = file_path.as_ref();
    check_exists(file_path)?;

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} ({}x{}, {:?})",
        file_path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_luma8().into_raw())?)
}

/// Reads a PNG image with a single channel (mono8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Errors
///
/// Returns [`IoError::InvalidFileExtension`] if the file is not a `.png`.
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let file_path = file_path.as_ref();
    check_exists(file_path)?;

    if !has_extension(file_path, &["png"]) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    read_image_any_mono8(file_path)
}

/// Writes a single channel image to a PNG file.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
/// * `image` - The grayscale image to encode.
///
/// # Errors
///
/// Returns [`IoError::InvalidFileExtension`] if the file is not a `.png` and
/// [`IoError::ImageCodecError`] if the file cannot be created or encoded.
pub fn write_image_png_mono8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    if !has_extension(file_path, &["png"]) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::L8,
        image::ImageFormat::Png,
    )?;

    Ok(())
}
