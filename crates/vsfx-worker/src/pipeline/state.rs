//! Run state tracking with guarded transitions.

use tracing::debug;

use vsfx_models::PipelineStage;

use crate::error::{PipelineError, PipelineResult};

/// Current stage of one run plus the stages it went through.
#[derive(Debug, Clone)]
pub struct PipelineState {
    current: PipelineStage,
    trail: Vec<PipelineStage>,
    failed_at: Option<PipelineStage>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineState {
    /// Start in `Validating`.
    pub fn new() -> Self {
        Self {
            current: PipelineStage::Validating,
            trail: vec![PipelineStage::Validating],
            failed_at: None,
        }
    }

    pub fn current(&self) -> PipelineStage {
        self.current
    }

    /// Stages visited so far, in order.
    pub fn trail(&self) -> &[PipelineStage] {
        &self.trail
    }

    /// Stage that was active when the run failed.
    pub fn failed_at(&self) -> Option<PipelineStage> {
        self.failed_at
    }

    /// Move to `next`, refusing edges the state machine does not have.
    pub fn advance(&mut self, next: PipelineStage) -> PipelineResult<()> {
        if !self.current.can_transition_to(next) {
            return Err(PipelineError::InvalidTransition {
                from: self.current,
                to: next,
            });
        }
        debug!(from = %self.current, to = %next, "Stage transition");
        self.current = next;
        self.trail.push(next);
        Ok(())
    }

    /// Enter `Failed`. No-op once terminal.
    pub fn fail(&mut self) {
        if self.current.is_terminal() {
            return;
        }
        self.failed_at = Some(self.current);
        self.current = PipelineStage::Failed;
        self.trail.push(PipelineStage::Failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PipelineStage::*;

    #[test]
    fn test_advance_records_trail() {
        let mut state = PipelineState::new();
        state.advance(Probing).unwrap();
        state.advance(Trimming).unwrap();
        assert_eq!(state.current(), Trimming);
        assert_eq!(state.trail(), &[Validating, Probing, Trimming]);
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let mut state = PipelineState::new();
        let err = state.advance(Muxing).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidTransition { from: Validating, to: Muxing }
        ));
        assert_eq!(state.current(), Validating);
    }

    #[test]
    fn test_fail_records_stage() {
        let mut state = PipelineState::new();
        state.advance(Probing).unwrap();
        state.fail();
        state.fail();

        assert_eq!(state.current(), Failed);
        assert_eq!(state.failed_at(), Some(Probing));
        assert_eq!(state.trail(), &[Validating, Probing, Failed]);
        assert!(state.advance(Trimming).is_err());
    }
}
