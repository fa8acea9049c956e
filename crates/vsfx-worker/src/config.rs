//! Worker configuration.

use std::path::PathBuf;
use std::time::Duration;

use vsfx_models::media::{CAPTION_PROMPT, DEFAULT_OUTPUT_PATH};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Parent directory for per-run workspaces
    pub work_dir: PathBuf,
    /// Where the final video is written
    pub output_path: PathBuf,
    /// Scene captioning endpoint
    pub caption_url: String,
    /// Audio synthesis endpoint
    pub synth_url: String,
    /// Bearer token for both model services
    pub ml_api_key: Option<String>,
    /// Instruction sent along with the midpoint frame
    pub caption_prompt: String,
    /// Caption request timeout (`None` = wait forever)
    pub caption_timeout: Option<Duration>,
    /// Synthesis request timeout (`None` = wait forever)
    pub synth_timeout: Option<Duration>,
    /// Per-invocation FFmpeg timeout in seconds (`None` = wait forever)
    pub ffmpeg_timeout_secs: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: std::env::temp_dir().join("vsfx"),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            caption_url: "http://localhost:8000/v1/caption".to_string(),
            synth_url: "http://localhost:8000/v1/synthesize".to_string(),
            ml_api_key: None,
            caption_prompt: CAPTION_PROMPT.to_string(),
            caption_timeout: Some(Duration::from_secs(120)),
            synth_timeout: Some(Duration::from_secs(300)),
            ffmpeg_timeout_secs: Some(600),
        }
    }
}

/// Read a timeout in seconds; `0` disables it.
fn timeout_secs_from_env(name: &str, default: Option<u64>) -> Option<u64> {
    match std::env::var(name).ok().and_then(|s| s.trim().parse::<u64>().ok()) {
        Some(0) => None,
        Some(secs) => Some(secs),
        None => default,
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            work_dir: std::env::var("VSFX_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            output_path: std::env::var("VSFX_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            caption_url: std::env::var("VSFX_CAPTION_URL").unwrap_or(defaults.caption_url),
            synth_url: std::env::var("VSFX_SYNTH_URL").unwrap_or(defaults.synth_url),
            ml_api_key: std::env::var("VSFX_ML_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            caption_prompt: std::env::var("VSFX_CAPTION_PROMPT")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.caption_prompt),
            caption_timeout: timeout_secs_from_env(
                "VSFX_CAPTION_TIMEOUT_SECS",
                defaults.caption_timeout.map(|d| d.as_secs()),
            )
            .map(Duration::from_secs),
            synth_timeout: timeout_secs_from_env(
                "VSFX_SYNTH_TIMEOUT_SECS",
                defaults.synth_timeout.map(|d| d.as_secs()),
            )
            .map(Duration::from_secs),
            ffmpeg_timeout_secs: timeout_secs_from_env(
                "VSFX_FFMPEG_TIMEOUT_SECS",
                defaults.ffmpeg_timeout_secs,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.output_path, PathBuf::from("final_video.mp4"));
        assert_eq!(config.caption_prompt, CAPTION_PROMPT);
        assert_eq!(config.ffmpeg_timeout_secs, Some(600));
    }

    #[test]
    fn test_timeout_parsing() {
        // Unique names so parallel tests never share a variable
        std::env::set_var("VSFX_TEST_TIMEOUT_ZERO", "0");
        std::env::set_var("VSFX_TEST_TIMEOUT_SET", "42");
        std::env::set_var("VSFX_TEST_TIMEOUT_BAD", "soon");

        assert_eq!(timeout_secs_from_env("VSFX_TEST_TIMEOUT_ZERO", Some(10)), None);
        assert_eq!(timeout_secs_from_env("VSFX_TEST_TIMEOUT_SET", Some(10)), Some(42));
        assert_eq!(timeout_secs_from_env("VSFX_TEST_TIMEOUT_BAD", Some(10)), Some(10));
        assert_eq!(timeout_secs_from_env("VSFX_TEST_TIMEOUT_UNSET", None), None);
    }
}
