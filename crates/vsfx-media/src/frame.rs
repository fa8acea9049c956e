//! Single-frame extraction.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Build the command that grabs one frame at `timestamp`.
pub fn frame_command(input: &Path, output: &Path, timestamp: f64) -> FfmpegCommand {
    FfmpegCommand::new(input, output)
        .seek(timestamp)
        .single_frame()
}

/// Extract exactly one frame at `timestamp` seconds as a still image.
///
/// Seeking past the end of the stream makes FFmpeg exit cleanly without
/// writing anything; that is reported as [`MediaError::MissingOutput`].
pub async fn sample_frame(
    runner: &FfmpegRunner,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    timestamp: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        "Sampling frame at {:.3}s: {} -> {}",
        timestamp,
        input.display(),
        output.display()
    );

    runner.run(&frame_command(input, output, timestamp)).await?;

    match tokio::fs::metadata(output).await {
        Ok(meta) if meta.len() > 0 => Ok(()),
        _ => Err(MediaError::MissingOutput(output.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_command() {
        let args = frame_command(Path::new("cut.mp4"), Path::new("frame.png"), 2.5).build_args();
        let joined = args.join(" ");
        assert!(joined.contains("-ss 2.500000 -i cut.mp4"));
        assert!(joined.ends_with("-vframes 1 frame.png"));
    }
}
