//! Audio stream removal.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the command that copies video and drops every audio stream.
pub fn strip_audio_command(input: &Path, output: &Path) -> FfmpegCommand {
    FfmpegCommand::new(input, output).codec_copy().no_audio()
}

/// Write a video-only copy of `input`.
pub async fn strip_audio(
    runner: &FfmpegRunner,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!("Stripping audio: {} -> {}", input.display(), output.display());

    runner.run(&strip_audio_command(input, output)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_command() {
        let args = strip_audio_command(Path::new("cut.mp4"), Path::new("mute.mp4")).build_args();
        assert!(args.join(" ").ends_with("-i cut.mp4 -c copy -an mute.mp4"));
    }
}
