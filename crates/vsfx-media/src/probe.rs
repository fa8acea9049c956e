//! FFprobe container information.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Container-level information about a media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Container format (e.g. "mov,mp4,m4a,3gp,3g2,mj2")
    pub format_name: String,
    /// File size in bytes
    pub size: u64,
    /// All streams in container order
    pub streams: Vec<StreamInfo>,
}

/// One stream of a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInfo {
    /// "video", "audio", "subtitle", "data"...
    pub codec_type: String,
    pub codec_name: Option<String>,
    /// Audio sample rate in Hz
    pub sample_rate: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl MediaInfo {
    /// Whether any audio stream is present.
    pub fn has_audio(&self) -> bool {
        self.streams.iter().any(|s| s.codec_type == "audio")
    }

    /// Whether any video stream is present.
    pub fn has_video(&self) -> bool {
        self.streams.iter().any(|s| s.codec_type == "video")
    }

    /// First audio stream, if any.
    pub fn audio_stream(&self) -> Option<&StreamInfo> {
        self.streams.iter().find(|s| s.codec_type == "audio")
    }
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
    format_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    sample_rate: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Probe a media file's container metadata (no decoding).
pub async fn probe_media(path: impl AsRef<Path>) -> MediaResult<MediaInfo> {
    probe_media_with_timeout(path, None).await
}

/// [`probe_media`], killing ffprobe after `timeout_secs` (`None` waits forever).
pub async fn probe_media_with_timeout(
    path: impl AsRef<Path>,
    timeout_secs: Option<u64>,
) -> MediaResult<MediaInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let probe = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();
    let output = within(timeout_secs, probe).await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            format!("FFprobe failed on {}", path.display()),
            Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
        ));
    }

    parse_probe_output(&output.stdout)
}

/// Parse FFprobe JSON into [`MediaInfo`].
///
/// A container without a readable duration is an error; callers compare it
/// against requested lengths and must not see a silent zero.
fn parse_probe_output(stdout: &[u8]) -> MediaResult<MediaInfo> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    let format = probe
        .format
        .ok_or_else(|| MediaError::InvalidMedia("FFprobe reported no container format".to_string()))?;

    let duration = format
        .duration
        .as_deref()
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| MediaError::InvalidMedia("Container has no readable duration".to_string()))?;

    let size = format
        .size
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let streams = probe
        .streams
        .into_iter()
        .map(|s| StreamInfo {
            codec_type: s.codec_type.unwrap_or_default(),
            codec_name: s.codec_name,
            sample_rate: s.sample_rate.as_deref().and_then(|r| r.parse().ok()),
            width: s.width,
            height: s.height,
        })
        .collect();

    Ok(MediaInfo {
        duration,
        format_name: format.format_name.unwrap_or_default(),
        size,
        streams,
    })
}

/// Await an I/O future, giving up after `timeout_secs`.
async fn within<T>(
    timeout_secs: Option<u64>,
    fut: impl Future<Output = std::io::Result<T>>,
) -> MediaResult<T> {
    match timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), fut)
            .await
            .map_err(|_| MediaError::Timeout(secs))?
            .map_err(MediaError::from),
        None => Ok(fut.await?),
    }
}

/// Get container duration in seconds.
pub async fn get_duration(path: impl AsRef<Path>, timeout_secs: Option<u64>) -> MediaResult<f64> {
    let info = probe_media_with_timeout(path, timeout_secs).await?;
    Ok(info.duration)
}

/// Check whether the container holds any audio stream.
pub async fn has_audio_stream(path: impl AsRef<Path>, timeout_secs: Option<u64>) -> MediaResult<bool> {
    let info = probe_media_with_timeout(path, timeout_secs).await?;
    Ok(info.has_audio())
}
