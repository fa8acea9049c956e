//! Media toolkit capability.
//!
//! The orchestrator only talks to [`MediaToolkit`], never to FFmpeg command
//! syntax directly, so tests can swap in a fake.

use async_trait::async_trait;
use std::path::Path;

use crate::command::{check_ffmpeg, check_ffprobe, FfmpegRunner};
use crate::error::MediaResult;
use crate::{audio, clip, frame, mux, probe};

/// Probe/trim/sample/strip/mux primitives over media files.
#[async_trait]
pub trait MediaToolkit: Send + Sync {
    /// Get the name of this toolkit for logging.
    fn name(&self) -> &'static str;

    /// Container duration in seconds.
    async fn duration(&self, media: &Path) -> MediaResult<f64>;

    /// Whether the container holds any audio stream.
    async fn has_audio_stream(&self, media: &Path) -> MediaResult<bool>;

    /// Stream-copy `[0, duration)` of `media` into `output`.
    async fn trim(&self, media: &Path, duration: f64, output: &Path) -> MediaResult<()>;

    /// Write the frame at `timestamp` seconds to `output`.
    async fn sample_frame(&self, media: &Path, timestamp: f64, output: &Path) -> MediaResult<()>;

    /// Write a video-only copy of `media` to `output`.
    async fn strip_audio(&self, media: &Path, output: &Path) -> MediaResult<()>;

    /// Combine `video` with `audio` (re-encoded) into `output`.
    async fn mux(&self, video: &Path, audio: &Path, output: &Path) -> MediaResult<()>;
}

/// [`MediaToolkit`] backed by the `ffmpeg` and `ffprobe` binaries.
#[derive(Debug, Clone, Default)]
pub struct FfmpegToolkit {
    /// Per-invocation timeout for FFmpeg and FFprobe, `None` for no limit
    timeout_secs: Option<u64>,
}

impl FfmpegToolkit {
    /// Create a toolkit without a timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill any FFmpeg or FFprobe invocation running longer than `secs`.
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Verify both binaries are on PATH.
    pub fn check(&self) -> MediaResult<()> {
        check_ffmpeg()?;
        check_ffprobe()?;
        Ok(())
    }

    fn runner(&self) -> FfmpegRunner {
        FfmpegRunner::new().with_timeout(self.timeout_secs)
    }
}

#[async_trait]
impl MediaToolkit for FfmpegToolkit {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    async fn duration(&self, media: &Path) -> MediaResult<f64> {
        probe::get_duration(media, self.timeout_secs).await
    }

    async fn has_audio_stream(&self, media: &Path) -> MediaResult<bool> {
        probe::has_audio_stream(media, self.timeout_secs).await
    }

    async fn trim(&self, media: &Path, duration: f64, output: &Path) -> MediaResult<()> {
        clip::trim_clip(&self.runner(), media, output, duration).await
    }

    async fn sample_frame(&self, media: &Path, timestamp: f64, output: &Path) -> MediaResult<()> {
        frame::sample_frame(&self.runner(), media, output, timestamp).await
    }

    async fn strip_audio(&self, media: &Path, output: &Path) -> MediaResult<()> {
        audio::strip_audio(&self.runner(), media, output).await
    }

    async fn mux(&self, video: &Path, audio: &Path, output: &Path) -> MediaResult<()> {
        mux::mux_audio(&self.runner(), video, audio, output).await
    }
}
