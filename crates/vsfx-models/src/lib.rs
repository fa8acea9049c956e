//! Shared data models for the video sound effect pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Effect duration bounds and validation
//! - Pipeline stages and their legal transitions
//! - Run identifiers and result records
//! - Media constants shared by the toolkit and the orchestrator

pub mod duration;
pub mod effect;
pub mod media;
pub mod stage;

// Re-export common types
pub use duration::{
    DurationError, EffectDuration, DEFAULT_EFFECT_DURATION_SECS, MAX_EFFECT_DURATION_SECS,
};
pub use effect::{RunId, SoundEffectOutput, SoundEffectRequest};
pub use stage::PipelineStage;
