//! Sound effect request and result records.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::duration::EffectDuration;
use crate::stage::PipelineStage;

/// Unique identifier for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request to add a generated sound effect to a video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SoundEffectRequest {
    /// Source video
    pub video: PathBuf,
    /// Effect duration (defaults to 5 seconds)
    #[serde(default)]
    pub duration: EffectDuration,
}

impl SoundEffectRequest {
    /// Create a request with the default duration.
    pub fn new(video: impl Into<PathBuf>) -> Self {
        Self {
            video: video.into(),
            duration: EffectDuration::default(),
        }
    }

    /// Set the effect duration.
    pub fn with_duration(mut self, duration: EffectDuration) -> Self {
        self.duration = duration;
        self
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SoundEffectOutput {
    pub run_id: RunId,
    /// Final video (video track of the source + generated audio)
    pub output_path: PathBuf,
    /// Scene description the audio was generated from
    pub description: String,
    pub effect_duration: EffectDuration,
    /// Duration of the source before trimming
    pub source_duration: f64,
    /// Whether the trimmed clip had its original audio removed
    pub stripped_source_audio: bool,
    /// Stages visited, in order
    pub stages: Vec<PipelineStage>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SoundEffectOutput {
    /// Wall-clock time of the run in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_duration() {
        let req: SoundEffectRequest = serde_json::from_str(r#"{"video": "bee.mp4"}"#).unwrap();
        assert_eq!(req.video, PathBuf::from("bee.mp4"));
        assert_eq!(req.duration, EffectDuration::default());
    }

    #[test]
    fn test_request_rejects_out_of_range_duration() {
        let res = serde_json::from_str::<SoundEffectRequest>(r#"{"video": "a.mp4", "duration": 30}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_run_id_unique() {
        let id = RunId::new();
        assert_ne!(id, RunId::new());
        assert_eq!(id.as_str(), id.to_string());
    }
}
