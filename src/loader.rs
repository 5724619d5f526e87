//! Source image decoding and bounded downsampling.
//!
//! All map synthesis runs on a working buffer whose larger dimension is
//! capped at [`MAX_SIZE`]. Smaller sources pass through at their original
//! resolution; nothing is ever upscaled.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{Error, Result};

/// Maximum working-buffer dimension in pixels.
pub const MAX_SIZE: u32 = 300;

/// Compute working-buffer dimensions for a source of `width` x `height`.
///
/// The larger dimension is capped at `max_size` and the smaller one is
/// scaled proportionally, rounded to the nearest pixel (minimum 1).
/// Sources already within bounds keep their original dimensions.
#[must_use]
pub fn fit_within(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    if width > height {
        if width > max_size {
            let scaled = f64::from(height) * f64::from(max_size) / f64::from(width);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return (max_size, (scaled.round() as u32).max(1));
        }
    } else if height > max_size {
        let scaled = f64::from(width) * f64::from(max_size) / f64::from(height);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return ((scaled.round() as u32).max(1), max_size);
    }
    (width, height)
}

/// Decode source bytes into a working buffer, downscaling to fit [`MAX_SIZE`].
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not a decodable image. No
/// partial buffer is produced on failure.
pub fn load_working_buffer(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(Error::Decode)?
        .to_rgba8();

    let (w, h) = img.dimensions();
    let (tw, th) = fit_within(w, h, MAX_SIZE);
    if (tw, th) == (w, h) {
        Ok(img)
    } else {
        Ok(imageops::resize(&img, tw, th, FilterType::Triangle))
    }
}

/// Read a file and decode it into a working buffer.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Decode`]
/// if its contents are not a decodable image.
pub fn load_working_buffer_from_path(path: &Path) -> Result<RgbaImage> {
    let bytes = std::fs::read(path)?;
    load_working_buffer(&bytes)
}
