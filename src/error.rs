//! Error types for the reference-maps crate.

use crate::synth::MapKind;

/// Errors that can occur during map synthesis and artifact handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source image bytes could not be decoded.
    #[error("failed to decode source image: {0}")]
    Decode(image::ImageError),

    /// A regeneration was requested but no source image is retained.
    #[error("no retained source image to regenerate the {kind} map")]
    MissingSource {
        /// The map kind the caller asked to regenerate.
        kind: MapKind,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output image format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (encode, save).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let unsupported = Error::UnsupportedFormat("tiff".to_string());
        assert!(unsupported.to_string().contains("tiff"));

        let missing = Error::MissingSource {
            kind: MapKind::Depth,
        };
        let msg = missing.to_string();
        assert!(msg.contains("depth"));
        assert!(msg.contains("no retained source"));
    }
}
