//! Sound effect pipeline orchestrator.
//!
//! This crate provides:
//! - The end-to-end pipeline (`SoundEffectPipeline`) as an explicit state machine
//! - A scoped per-run workspace for intermediate files
//! - Environment-driven configuration
//! - Structured run logging

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod workspace;

pub use config::WorkerConfig;
pub use error::{PipelineError, PipelineResult};
pub use logging::RunLogger;
pub use pipeline::{PipelineSettings, PipelineState, SoundEffectPipeline};
pub use workspace::Workspace;
