//! Contains the image acquisition strategies.
//!
//! Acquisition is an explicit ordered list of strategies, tried in sequence
//! until one produces an image: a bitmap on the clipboard, a file path in
//! the clipboard text, then the most recently modified readable image file
//! in the working directory. Each failure is logged at debug level and the
//! next strategy is tried; only when all fail does [`probe`] report
//! [`Error::NoImageAvailable`].

use std::{
    fmt::{self, Display},
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use image::RgbImage;
use log::{debug, info};

use crate::{Error, Result};

/// A decoded image together with a description of where it came from.
///
/// The description (a clipboard tag, path, or file name) is later sanitized
/// into the export file name.
#[derive(Debug, Clone)]
pub struct AcquiredImage {
    /// The decoded image.
    pub image: RgbImage,
    /// Human-readable source description.
    pub description: String,
}

/// One way of obtaining an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// A bitmap directly on the system clipboard.
    ClipboardBitmap,
    /// A file path held in the clipboard text.
    ClipboardPath,
    /// The most recently modified readable image file in the directory.
    NewestFile,
}

/// The order strategies are tried in.
const PROBE_ORDER: &[Strategy] = &[
    Strategy::ClipboardBitmap,
    Strategy::ClipboardPath,
    Strategy::NewestFile,
];

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::ClipboardBitmap => "image on clipboard",
            Strategy::ClipboardPath => "image file on clipboard",
            Strategy::NewestFile => "latest image in directory",
        })
    }
}

impl Strategy {
    /// Attempts this strategy, `search_dir` being the directory scanned by
    /// [`Strategy::NewestFile`].
    fn attempt(self, search_dir: &Path) -> Result<AcquiredImage> {
        match self {
            Strategy::ClipboardBitmap => clipboard_bitmap(),
            Strategy::ClipboardPath => clipboard_path(),
            Strategy::NewestFile => newest_file(search_dir),
        }
    }
}

/// Tries every acquisition strategy in order and returns the first image.
///
/// # Errors
/// [`Error::NoImageAvailable`] when no strategy produced an image.
pub fn probe(search_dir: &Path) -> Result<AcquiredImage> {
    for &strategy in PROBE_ORDER {
        match strategy.attempt(search_dir) {
            Ok(acquired) => {
                info!("{strategy}>>{}", acquired.description);
                return Ok(acquired);
            }
            Err(err) => debug!("{strategy}: {err}"),
        }
    }
    Err(Error::NoImageAvailable)
}

/// Decodes an explicitly named image file, bypassing the probing order.
pub fn from_path(path: &Path) -> Result<AcquiredImage> {
    let image = image::open(path)
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    Ok(AcquiredImage {
        image,
        description: path.display().to_string(),
    })
}

/// Grabs a bitmap from the system clipboard.
#[cfg(feature = "clipboard")]
fn clipboard_bitmap() -> Result<AcquiredImage> {
    let mut clipboard = open_clipboard()?;
    let data = clipboard
        .get_image()
        .map_err(|err| Error::Clipboard(err.to_string()))?;
    let (width, height) = clipboard_dimensions(&data)?;
    let rgba = image::RgbaImage::from_raw(width, height, data.bytes.into_owned())
        .ok_or_else(|| Error::Clipboard("clipboard bitmap size mismatch".to_owned()))?;
    Ok(AcquiredImage {
        image: image::DynamicImage::ImageRgba8(rgba).to_rgb8(),
        description: format!("clipboard-image-{width}x{height}"),
    })
}

/// Interprets the clipboard text as an image file path.
#[cfg(feature = "clipboard")]
fn clipboard_path() -> Result<AcquiredImage> {
    let mut clipboard = open_clipboard()?;
    let text = clipboard
        .get_text()
        .map_err(|err| Error::Clipboard(err.to_string()))?;
    let trimmed = text.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        return Err(Error::Clipboard("clipboard text is empty".to_owned()));
    }
    from_path(Path::new(trimmed))
}

/// Opens the system clipboard.
#[cfg(feature = "clipboard")]
fn open_clipboard() -> Result<arboard::Clipboard> {
    arboard::Clipboard::new().map_err(|err| Error::Clipboard(err.to_string()))
}

/// Validates and converts the clipboard bitmap dimensions.
#[cfg(feature = "clipboard")]
fn clipboard_dimensions(data: &arboard::ImageData<'_>) -> Result<(u32, u32)> {
    let too_big = |_| Error::Clipboard("clipboard bitmap too large".to_owned());
    Ok((
        u32::try_from(data.width).map_err(too_big)?,
        u32::try_from(data.height).map_err(too_big)?,
    ))
}

/// Stub used when clipboard support is compiled out.
#[cfg(not(feature = "clipboard"))]
fn clipboard_bitmap() -> Result<AcquiredImage> {
    Err(Error::Clipboard("clipboard support not compiled in".to_owned()))
}

/// Stub used when clipboard support is compiled out.
#[cfg(not(feature = "clipboard"))]
fn clipboard_path() -> Result<AcquiredImage> {
    Err(Error::Clipboard("clipboard support not compiled in".to_owned()))
}

/// Scans `dir` for the most recently modified file that decodes as an
/// image; undecodable files are skipped with a debug log.
fn newest_file(dir: &Path) -> Result<AcquiredImage> {
    let mut candidates: Vec<(PathBuf, SystemTime)> = fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let metadata = entry.metadata().ok()?;
            if !metadata.is_file() {
                return None;
            }
            Some((entry.path(), metadata.modified().ok()?))
        })
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in candidates {
        match image::open(&path) {
            Ok(image) => {
                let description = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |name| {
                        name.to_string_lossy().into_owned()
                    });
                return Ok(AcquiredImage {
                    image: image.into_rgb8(),
                    description,
                });
            }
            Err(err) => debug!("skipping {}: {err}", path.display()),
        }
    }
    Err(Error::NoImageAvailable)
}
