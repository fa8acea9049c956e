//! Pipeline stages and their legal transitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a sound effect run.
///
/// Happy path:
/// `Validating → Probing → Trimming → Sampling → Captioning → Synthesizing →
/// AudioCheck → [Stripping] → Muxing → Done`.
/// `Failed` is reachable from every non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Checking the requested effect duration
    #[default]
    Validating,
    /// Measuring the source duration
    Probing,
    /// Stream-copy cut of the source
    Trimming,
    /// Extracting the midpoint frame
    Sampling,
    /// Waiting on the scene captioner
    Captioning,
    /// Waiting on the audio synthesizer
    Synthesizing,
    /// Looking for an audio stream on the trimmed clip
    AudioCheck,
    /// Removing the original audio
    Stripping,
    /// Combining video and generated audio
    Muxing,
    /// Final video produced
    Done,
    /// Run aborted
    Failed,
}

impl PipelineStage {
    /// Get string representation of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Validating => "validating",
            PipelineStage::Probing => "probing",
            PipelineStage::Trimming => "trimming",
            PipelineStage::Sampling => "sampling",
            PipelineStage::Captioning => "captioning",
            PipelineStage::Synthesizing => "synthesizing",
            PipelineStage::AudioCheck => "audio_check",
            PipelineStage::Stripping => "stripping",
            PipelineStage::Muxing => "muxing",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }

    /// Check if this is a terminal stage (no more transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }

    /// Whether `next` is a legal successor of this stage.
    pub fn can_transition_to(&self, next: PipelineStage) -> bool {
        use PipelineStage::*;

        if self.is_terminal() {
            return false;
        }
        if next == Failed {
            return true;
        }

        matches!(
            (self, next),
            (Validating, Probing)
                | (Probing, Trimming)
                | (Trimming, Sampling)
                | (Sampling, Captioning)
                | (Captioning, Synthesizing)
                | (Synthesizing, AudioCheck)
                | (AudioCheck, Stripping)
                | (AudioCheck, Muxing)
                | (Stripping, Muxing)
                | (Muxing, Done)
        )
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
