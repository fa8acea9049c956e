//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! tracing spans and contextual information.

use tracing::{error, info, Span};
use vsfx_models::{PipelineStage, RunId};

/// Run logger for structured logging with consistent formatting.
///
/// Every event carries the run ID and operation so interleaved runs can be
/// told apart.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    operation: String,
}

impl RunLogger {
    /// Create a new run logger for a specific run and operation.
    pub fn new(run_id: &RunId, operation: &str) -> Self {
        Self {
            run_id: run_id.as_str().to_string(),
            operation: operation.to_string(),
        }
    }

    /// Log the start of a run.
    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run started: {}", message
        );
    }

    /// Log entry into a pipeline stage.
    pub fn log_stage(&self, stage: PipelineStage, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            stage = %stage,
            "{}", message
        );
    }

    /// Log a run failure.
    pub fn log_error(&self, stage: PipelineStage, message: &str) {
        error!(
            run_id = %self.run_id,
            operation = %self.operation,
            stage = %stage,
            "Run failed: {}", message
        );
    }

    /// Log the completion of a run.
    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run completed: {}", message
        );
    }

    /// Get the run ID.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the operation type.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Create a tracing span for this run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "run",
            run_id = %self.run_id,
            operation = %self.operation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_logger_creation() {
        let run_id = RunId::new();
        let logger = RunLogger::new(&run_id, "sound_effect");

        assert_eq!(logger.run_id(), run_id.to_string());
        assert_eq!(logger.operation(), "sound_effect");
    }
}
