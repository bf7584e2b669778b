//! FFmpeg/FFprobe frame extraction.
//!
//! Decodes a video container through the `ffprobe`/`ffmpeg` binaries and
//! samples one frame every N decoded frames into an output directory.
//! Frame files are named `frame_<decoded index>.jpg`, so the sampled frame
//! at decode position 20 is `frame_20.jpg` regardless of how many frames
//! were saved before it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Error type for frame extraction.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("ffprobe/ffmpeg binary not found: {0}")]
    BinaryNotFound(std::io::Error),

    #[error("video file not found: {0}")]
    VideoNotFound(String),

    #[error("failed to open video container (exit code {exit_code:?}): {stderr}")]
    OpenFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// ffprobe JSON output structures
// ---------------------------------------------------------------------------

/// Top-level ffprobe JSON output (`-print_format json -show_format -show_streams`).
#[derive(Debug, Deserialize)]
pub struct FfprobeOutput {
    pub streams: Vec<FfprobeStream>,
    pub format: FfprobeFormat,
}

/// A single stream from ffprobe output.
#[derive(Debug, Deserialize)]
pub struct FfprobeStream {
    pub codec_type: Option<String>,
    /// e.g. "30/1" or "24000/1001"
    pub r_frame_rate: Option<String>,
    pub duration: Option<String>,
    pub nb_frames: Option<String>,
}

/// Format-level metadata from ffprobe.
#[derive(Debug, Deserialize)]
pub struct FfprobeFormat {
    pub duration: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run `ffprobe` on a video file and return the parsed JSON output.
///
/// A probe failure is the "cannot open container" case: corrupt file,
/// unsupported codec, or not a media file at all.
pub async fn probe_video(path: &Path) -> Result<FfprobeOutput, FrameError> {
    if !path.exists() {
        return Err(FrameError::VideoNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let output = tokio::process::Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .await
        .map_err(FrameError::BinaryNotFound)?;

    if !output.status.success() {
        return Err(FrameError::OpenFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str::<FfprobeOutput>(&stdout)
        .map_err(|e| FrameError::ParseError(format!("{e}: {stdout}")))
}

/// Extract the frame at a specific decode index as a JPEG file.
pub async fn extract_frame_at_index(
    video_path: &Path,
    output_path: &Path,
    decoded_index: i64,
) -> Result<(), FrameError> {
    let output = tokio::process::Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(video_path)
        .args([
            "-vf",
            &format!("select=eq(n\\,{decoded_index})"),
            "-vframes",
            "1",
            "-q:v",
            "2",
        ])
        .arg(output_path)
        .output()
        .await
        .map_err(FrameError::BinaryNotFound)?;

    if !output.status.success() {
        return Err(FrameError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}

/// Decode a video and save every `sampling_interval`-th frame into
/// `output_dir`, starting at decode index 0.
///
/// Returns the saved frame paths in decode order; every returned path exists
/// on disk. The output directory is created if absent. Files from earlier
/// extractions are left in place unless a new sampled index collides with
/// them.
pub async fn extract_frames(
    video_path: &Path,
    output_dir: &Path,
    sampling_interval: u32,
) -> Result<Vec<PathBuf>, FrameError> {
    let interval = sampling_interval.max(1) as i64;

    let probe = probe_video(video_path).await?;
    let total_frames = parse_total_frames(&probe);

    tokio::fs::create_dir_all(output_dir).await?;

    tracing::info!(
        video = %video_path.display(),
        total_frames,
        sampling_interval = interval,
        "Extracting frames"
    );

    let mut saved = Vec::new();
    for decoded_index in sampled_indices(total_frames, interval) {
        let frame_path = output_dir.join(format!("frame_{decoded_index}.jpg"));

        // The stream can run out earlier than the probe estimated: ffmpeg
        // then either exits cleanly without writing a file or reports an
        // empty output. Both mean end-of-stream, not a fatal decode error.
        match extract_frame_at_index(video_path, &frame_path, decoded_index).await {
            Ok(()) if frame_path.exists() => {
                tracing::debug!(frame = %frame_path.display(), "Saved frame");
                saved.push(frame_path);
            }
            Ok(()) => {
                tracing::debug!(decoded_index, "Stream ended before sampled index");
                break;
            }
            Err(FrameError::ExecutionFailed { exit_code, stderr }) => {
                tracing::debug!(
                    decoded_index,
                    ?exit_code,
                    stderr = %stderr,
                    "Decoder signalled end of stream"
                );
                break;
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(saved = saved.len(), "Frame extraction complete");
    Ok(saved)
}

/// Decode indices sampled by `interval`: `0, interval, 2*interval, …` below
/// `total_frames`.
fn sampled_indices(total_frames: i64, interval: i64) -> impl Iterator<Item = i64> {
    (0..total_frames.max(0)).step_by(interval as usize)
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Find the first video stream in the ffprobe output.
fn first_video_stream(probe: &FfprobeOutput) -> Option<&FfprobeStream> {
    probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
}

/// Parse the video duration in seconds from ffprobe output.
pub fn parse_duration(probe: &FfprobeOutput) -> f64 {
    // Try format-level duration first.
    if let Some(d) = &probe.format.duration {
        if let Ok(secs) = d.parse::<f64>() {
            return secs;
        }
    }
    // Fall back to the first video stream's duration.
    if let Some(stream) = first_video_stream(probe) {
        if let Some(d) = &stream.duration {
            if let Ok(secs) = d.parse::<f64>() {
                return secs;
            }
        }
    }
    0.0
}

/// Parse the video framerate from ffprobe output.
///
/// The `r_frame_rate` field is a fraction like `"30/1"` or `"24000/1001"`.
pub fn parse_framerate(probe: &FfprobeOutput) -> f64 {
    first_video_stream(probe)
        .and_then(|s| s.r_frame_rate.as_deref())
        .map(parse_fraction)
        .unwrap_or(0.0)
}

/// Parse a fraction string like `"30/1"` into a float.
fn parse_fraction(s: &str) -> f64 {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() == 2 {
        let num = parts[0].parse::<f64>().unwrap_or(0.0);
        let den = parts[1].parse::<f64>().unwrap_or(1.0);
        if den > 0.0 {
            return num / den;
        }
    }
    s.parse::<f64>().unwrap_or(0.0)
}

/// Count total decoded frames from ffprobe output.
pub fn parse_total_frames(probe: &FfprobeOutput) -> i64 {
    if let Some(stream) = first_video_stream(probe) {
        if let Some(nb) = &stream.nb_frames {
            if let Ok(n) = nb.parse::<i64>() {
                return n;
            }
        }
    }
    // Estimate from duration * framerate.
    let duration = parse_duration(probe);
    let fps = parse_framerate(probe);
    if duration > 0.0 && fps > 0.0 {
        return (duration * fps).round() as i64;
    }
    0
}
