//! Reports emitted by `ffmpeg -progress pipe:2`.
//!
//! FFmpeg prints blocks of `key=value` lines, each closed by a
//! `progress=continue` or `progress=end` line.

use serde::{Deserialize, Serialize};

/// State accumulated from the progress blocks seen so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FfmpegProgress {
    pub frame: u64,
    /// Output position in seconds
    pub position_secs: f64,
    /// Multiple of realtime, `None` while FFmpeg reports `N/A`
    pub speed: Option<f64>,
    /// Set by the `progress=end` block
    pub finished: bool,
}

impl FfmpegProgress {
    /// Fold one progress line into the snapshot.
    ///
    /// Returns `true` when the line closes a block.
    pub fn apply_line(&mut self, line: &str) -> bool {
        let Some((key, value)) = line.trim().split_once('=') else {
            return false;
        };

        match key {
            // Both carry microseconds
            "out_time_us" | "out_time_ms" => {
                if let Ok(us) = value.parse::<i64>() {
                    self.position_secs = us.max(0) as f64 / 1_000_000.0;
                }
            }
            "frame" => {
                if let Ok(frame) = value.parse() {
                    self.frame = frame;
                }
            }
            "speed" => {
                self.speed = value.trim().strip_suffix('x').and_then(|s| s.trim().parse().ok());
            }
            "progress" => {
                self.finished = value == "end";
                return true;
            }
            _ => {}
        }
        false
    }

    /// Share of `target_secs` written so far, in `[0, 1]`.
    pub fn fraction_of(&self, target_secs: f64) -> f64 {
        if self.finished {
            return 1.0;
        }
        if target_secs.is_nan() || target_secs <= 0.0 {
            return 0.0;
        }
        (self.position_secs / target_secs).clamp(0.0, 1.0)
    }
}

/// Whether a stderr line is a `-progress` key/value pair rather than a diagnostic.
pub fn is_progress_line(line: &str) -> bool {
    match line.trim().split_once('=') {
        Some((key, _)) => {
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_accumulation() {
        let mut progress = FfmpegProgress::default();

        assert!(!progress.apply_line("frame=50"));
        assert!(!progress.apply_line("out_time_us=2500000"));
        assert!(!progress.apply_line("speed=N/A"));
        assert!(progress.apply_line("progress=continue"));

        assert_eq!(progress.frame, 50);
        assert!((progress.position_secs - 2.5).abs() < 1e-9);
        assert_eq!(progress.speed, None);
        assert!(!progress.finished);
        assert!((progress.fraction_of(5.0) - 0.5).abs() < 1e-9);

        progress.apply_line("speed=1.5x");
        assert_eq!(progress.speed, Some(1.5));
        assert!(progress.apply_line("progress=end"));
        assert!(progress.finished);
        assert_eq!(progress.fraction_of(5.0), 1.0);
    }

    #[test]
    fn test_fraction_bounds() {
        let progress = FfmpegProgress {
            position_secs: 7.0,
            ..Default::default()
        };
        assert_eq!(progress.fraction_of(5.0), 1.0);
        assert_eq!(progress.fraction_of(0.0), 0.0);
        assert_eq!(progress.fraction_of(f64::NAN), 0.0);
    }

    #[test]
    fn test_progress_line_detection() {
        assert!(is_progress_line("out_time_us=5000000"));
        assert!(is_progress_line("progress=continue"));
        assert!(!is_progress_line("[mp4 @ 0x55] Invalid data found when processing input"));
        assert!(!is_progress_line("Error opening input file x=1.mp4."));
        assert!(!is_progress_line(""));
    }
}
