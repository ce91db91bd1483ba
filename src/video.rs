//! Contains PNG-sequence-to-video muxing by invoking `ffmpeg`.

use std::{ffi::OsString, path::Path};

use log::debug;

use crate::{Error, Result};

/// Muxes a numbered PNG frame sequence into `output`.
///
/// `pattern` is a printf-style path such as `dir/plot_%05d.png`. Frames are
/// encoded with `libx264` in `yuv420p` at the given frame rate, the widely
/// playable combination. The frame files themselves are left in place;
/// deleting them after a successful mux is the caller's business.
///
/// # Errors
/// [`Error::VideoEncoding`] with ffmpeg's combined output when the
/// invocation exits non-zero, [`Error::Io`] when ffmpeg cannot be run at
/// all (typically: not installed).
pub fn mux_frames(pattern: &Path, output: &Path, frame_rate: u32) -> Result<()> {
    let args: Vec<OsString> = vec![
        "-y".into(),
        "-framerate".into(),
        frame_rate.to_string().into(),
        "-i".into(),
        pattern.as_os_str().to_owned(),
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        output.as_os_str().to_owned(),
    ];

    let shown: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
    debug!("ffmpeg {}", shown.join(" "));
    let result = duct::cmd("ffmpeg", args)
        .stderr_to_stdout()
        .stdout_capture()
        .unchecked()
        .run()?;
    if result.status.success() {
        Ok(())
    } else {
        Err(Error::VideoEncoding(
            String::from_utf8_lossy(&result.stdout).into_owned(),
        ))
    }
}
