//! Clip trimming.

use std::path::Path;
use tracing::{debug, info};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the stream-copy cut of `[0, duration)`.
pub fn trim_command(input: &Path, output: &Path, duration: f64) -> FfmpegCommand {
    FfmpegCommand::new(input, output)
        .duration(duration)
        .codec_copy()
}

/// Cut a media file to its first `duration` seconds without re-encoding.
///
/// The caller is responsible for checking the source is long enough.
pub async fn trim_clip(
    runner: &FfmpegRunner,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    duration: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        "Trimming clip: {} -> {} (duration: {:.2}s)",
        input.display(),
        output.display(),
        duration
    );

    runner
        .run_with_progress(&trim_command(input, output, duration), move |p| {
            debug!("Trim progress: {:.0}%", p.fraction_of(duration) * 100.0);
        })
        .await?;

    info!("Clip trimmed: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsfx_models::EffectDuration;

    #[test]
    fn test_trim_is_stream_copy() {
        let args = trim_command(Path::new("in.mp4"), Path::new("cut.mp4"), 5.0).build_args();
        let joined = args.join(" ");
        assert!(joined.contains("-t 5.000000 -i in.mp4"));
        assert!(joined.ends_with("-c copy cut.mp4"));
        assert!(!args.contains(&"-c:v".to_string()));
    }

    #[test]
    fn test_sub_millisecond_duration_is_not_rounded_away() {
        let duration = EffectDuration::new(0.0004).unwrap();
        let args = trim_command(Path::new("in.mp4"), Path::new("cut.mp4"), duration.as_secs()).build_args();

        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "0.000400");
        assert!(!args.join(" ").contains("-t 0.000 "));
    }
}
