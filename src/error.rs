//! Contains the crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

/// A specialized result type with [`enum@Error`] as the error variant.
pub type Result<T> = std::result::Result<T, Error>;

/// The set of failures the plotting pipeline can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Every acquisition strategy failed to produce an image.
    #[error("no image available: copy an image to the clipboard or put an image file in the working directory")]
    NoImageAvailable,

    /// The clipboard could not be opened or held no usable content.
    #[error("clipboard: {0}")]
    Clipboard(String),

    /// An explicitly named image file could not be decoded.
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// The underlying decoder error.
        source: image::ImageError,
    },

    /// A rendered plot could not be written to disk.
    #[error("failed to export '{path}': {source}")]
    Export {
        /// The file that failed to write.
        path: PathBuf,
        /// The underlying encoder error.
        source: image::ImageError,
    },

    /// The ffmpeg invocation failed or returned a non-zero status.
    #[error("ffmpeg failed: {0}")]
    VideoEncoding(String),

    /// Any other I/O failure (directory creation, frame cleanup, prompts).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
