//! Pipeline error types.

use thiserror::Error;

use vsfx_media::MediaError;
use vsfx_ml_client::MlClientError;
use vsfx_models::{DurationError, PipelineStage};

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Why a run failed. Every variant is fatal to the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(#[from] DurationError),

    #[error("Video is {source_secs:.3}s long, shorter than the requested {requested_secs:.3}s")]
    SourceTooShort { source_secs: f64, requested_secs: f64 },

    #[error("Probe failed while {stage}: {source}")]
    Probe {
        stage: PipelineStage,
        #[source]
        source: MediaError,
    },

    #[error("Trim failed: {0}")]
    Trim(#[source] MediaError),

    #[error("Frame sampling failed: {0}")]
    Sample(#[source] MediaError),

    #[error("Audio strip failed: {0}")]
    Strip(#[source] MediaError),

    #[error("Mux failed: {0}")]
    Mux(#[source] MediaError),

    #[error("Could not place final video: {0}")]
    Output(#[source] MediaError),

    #[error("Caption service failed: {0}")]
    CaptionService(#[source] MlClientError),

    #[error("Synthesis service failed: {0}")]
    SynthesisService(#[source] MlClientError),

    #[error("Workspace error: {0}")]
    Workspace(#[from] std::io::Error),

    #[error("Illegal stage transition {from} -> {to}")]
    InvalidTransition {
        from: PipelineStage,
        to: PipelineStage,
    },
}

impl PipelineError {
    pub fn probe(stage: PipelineStage, source: MediaError) -> Self {
        Self::Probe { stage, source }
    }

    /// Stage the run was in when this error ended it.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::InvalidDuration(_) => PipelineStage::Validating,
            Self::SourceTooShort { .. } => PipelineStage::Probing,
            Self::Probe { stage, .. } => *stage,
            Self::Trim(_) | Self::Workspace(_) => PipelineStage::Trimming,
            Self::Sample(_) => PipelineStage::Sampling,
            Self::CaptionService(_) => PipelineStage::Captioning,
            Self::SynthesisService(_) => PipelineStage::Synthesizing,
            Self::Strip(_) => PipelineStage::Stripping,
            Self::Mux(_) | Self::Output(_) => PipelineStage::Muxing,
            Self::InvalidTransition { from, .. } => *from,
        }
    }

    /// Whether the caller's input was rejected (as opposed to a tool or service failing).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidDuration(_) | Self::SourceTooShort { .. })
    }
}
