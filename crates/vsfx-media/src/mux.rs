//! Video + audio muxing.

use std::path::Path;
use tracing::{debug, info};

use vsfx_models::media::FINAL_AUDIO_CODEC;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the mux command: video copied from the first input, audio from the
/// second input re-encoded to AAC. Track lengths are left as they are.
pub fn mux_command(video: &Path, audio: &Path, output: &Path) -> FfmpegCommand {
    FfmpegCommand::new(video, output)
        .add_input(audio)
        .map("0:v:0")
        .map("1:a:0")
        .video_codec("copy")
        .audio_codec(FINAL_AUDIO_CODEC)
        .strict("experimental")
}

/// Combine a video-only file and a standalone audio file into `output`.
pub async fn mux_audio(
    runner: &FfmpegRunner,
    video: impl AsRef<Path>,
    audio: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let video = video.as_ref();
    let audio = audio.as_ref();
    let output = output.as_ref();

    info!(
        "Muxing {} + {} -> {}",
        video.display(),
        audio.display(),
        output.display()
    );

    runner
        .run_with_progress(&mux_command(video, audio, output), |p| {
            if p.finished {
                debug!("Mux wrote {:.2}s of output", p.position_secs);
            }
        })
        .await
}
