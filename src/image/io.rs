//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Color images are
//! converted to luma; the sample type follows the decoded bit depth.

use crate::image::{AnyImage, ImageView, OwnedImage};
use crate::util::{ZnccError, ZnccResult};
use ::image::DynamicImage;
use std::path::Path;

/// Creates a borrowed view from an 8-bit grayscale image buffer.
pub fn view_from_gray_image(img: &::image::GrayImage) -> ZnccResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates a borrowed view from a 16-bit grayscale image buffer.
pub fn view_from_gray16_image(
    img: &::image::ImageBuffer<::image::Luma<u16>, Vec<u16>>,
) -> ZnccResult<ImageView<'_, u16>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Converts a decoded image into a single-channel tagged image.
///
/// 16-bit images become `u16`, floating-point images become `f32`, and
/// everything else becomes `u8`.
pub fn owned_from_dynamic_image(img: &DynamicImage) -> ZnccResult<AnyImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let owned = match img {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => {
            OwnedImage::new(img.to_luma16().into_raw(), width, height)?.into()
        }
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            OwnedImage::new(img.to_luma32f().into_raw(), width, height)?.into()
        }
        _ => OwnedImage::new(img.to_luma8().into_raw(), width, height)?.into(),
    };
    Ok(owned)
}

/// Loads an image from disk as a single-channel tagged image.
pub fn load_image<P: AsRef<Path>>(path: P) -> ZnccResult<AnyImage> {
    let img = ::image::open(path).map_err(|err| ZnccError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
