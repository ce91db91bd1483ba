//! Contains plot export: file naming, PNG writing, and the platform viewer.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use image::RgbImage;
use log::debug;

use crate::{Error, Result};

/// Prefix of every exported file name.
const FILENAME_PREFIX: &str = "hlsphere";

/// Replaces path separators and other filename-hostile characters with `-`
/// and drops newlines, so any source description becomes a safe file stem.
///
/// # Examples
/// ```
/// # use hlsphere::sanitize_description;
/// assert_eq!(sanitize_description("shots/night sky.png"), "shots-night-sky-png");
/// ```
#[must_use]
pub fn sanitize_description(description: &str) -> String {
    description
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .map(|c| match c {
            '\\' | '/' | ':' | '?' | '.' | '"' | '<' | '>' | '|' | '=' | ' ' => '-',
            c => c,
        })
        .collect()
}

/// Derives and writes the export files of one plotting run.
#[derive(Debug, Clone)]
pub struct Exporter {
    /// Directory all files are written into.
    directory: PathBuf,
    /// Shared file stem, `hlsphere_{sanitized description}`.
    stem: String,
}

impl Exporter {
    /// Creates the output directory (and parents) and fixes the file stem.
    pub fn new(directory: &Path, description: &str) -> Result<Self> {
        fs::create_dir_all(directory)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            stem: format!("{FILENAME_PREFIX}_{}", sanitize_description(description)),
        })
    }

    /// Path of the single still export.
    #[must_use]
    pub fn image_path(&self) -> PathBuf {
        self.directory.join(format!("{}.png", self.stem))
    }

    /// Path of animation frame `index`.
    #[must_use]
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.directory.join(format!("{}_{index:05}.png", self.stem))
    }

    /// The printf-style frame pattern ffmpeg consumes.
    #[must_use]
    pub fn frame_pattern(&self) -> PathBuf {
        self.directory.join(format!("{}_%05d.png", self.stem))
    }

    /// Path of the muxed video.
    #[must_use]
    pub fn video_path(&self) -> PathBuf {
        self.directory.join(format!("{}.mp4", self.stem))
    }

    /// Writes `image` as PNG to `path`.
    pub fn save_png(&self, image: &RgbImage, path: &Path) -> Result<()> {
        image.save(path).map_err(|source| Error::Export {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Opens `path` with the platform's default viewer, best effort.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut command = Command::new("open");
        command.arg(path);
        command
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    };
    #[cfg(all(unix, not(target_os = "macos")))]
    let mut command = {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    };

    debug!("opening {} in the platform viewer", path.display());
    command.spawn()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sanitizer_replaces_hostile_characters() {
        assert_eq!(
            sanitize_description(r#"C:\shots\night sky.png"#),
            "C--shots-night-sky-png"
        );
        assert_eq!(sanitize_description("a?b<c>d|e=f\"g"), "a-b-c-d-e-f-g");
    }

    #[test]
    fn sanitizer_drops_newlines() {
        assert_eq!(sanitize_description("one\ntwo\r\nthree"), "onetwothree");
    }

    #[test]
    fn derived_paths_share_the_stem() {
        let dir = std::env::temp_dir().join(format!("hlsphere-export-{}", std::process::id()));
        let exporter = Exporter::new(&dir, "shots/sky.png").unwrap();
        assert!(dir.is_dir());

        assert_eq!(
            exporter.image_path(),
            dir.join("hlsphere_shots-sky-png.png")
        );
        assert_eq!(
            exporter.frame_path(7),
            dir.join("hlsphere_shots-sky-png_00007.png")
        );
        assert_eq!(
            exporter.frame_pattern(),
            dir.join("hlsphere_shots-sky-png_%05d.png")
        );
        assert_eq!(exporter.video_path(), dir.join("hlsphere_shots-sky-png.mp4"));

        fs::remove_dir_all(dir).unwrap();
    }
}
