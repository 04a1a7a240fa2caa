//! Lifecycle of a single conversion run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear run lifecycle: `Idle → Running → {Succeeded, Failed}`.
///
/// A run that fails its preconditions goes straight from `Idle` to
/// `Failed`. Terminal states have no outgoing transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformState {
    /// Not yet started.
    #[default]
    Idle,
    /// The tool process is running.
    Running,
    /// The tool exited with status zero.
    Succeeded,
    /// Preconditions failed or the tool exited unsuccessfully.
    Failed,
}

impl TransformState {
    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(self, next: TransformState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Idle, Self::Failed)
                | (Self::Running, Self::Succeeded)
                | (Self::Running, Self::Failed)
        )
    }

    /// Move to `next`, logging the transition. Illegal moves are ignored
    /// and logged at warn level.
    pub fn advance(&mut self, next: TransformState) {
        if self.can_transition_to(next) {
            tracing::debug!(from = %self, to = %next, "Transform state change");
            *self = next;
        } else {
            tracing::warn!(from = %self, to = %next, "Ignoring illegal transform state change");
        }
    }
}

impl fmt::Display for TransformState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut state = TransformState::default();
        state.advance(TransformState::Running);
        state.advance(TransformState::Succeeded);
        assert_eq!(state, TransformState::Succeeded);
    }

    #[test]
    fn test_precondition_failure_skips_running() {
        let mut state = TransformState::Idle;
        state.advance(TransformState::Failed);
        assert_eq!(state, TransformState::Failed);
    }

    #[test]
    fn test_no_cycles_out_of_terminal_states() {
        for terminal in [TransformState::Succeeded, TransformState::Failed] {
            for next in [
                TransformState::Idle,
                TransformState::Running,
                TransformState::Succeeded,
                TransformState::Failed,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_illegal_advance_is_ignored() {
        let mut state = TransformState::Running;
        state.advance(TransformState::Idle);
        assert_eq!(state, TransformState::Running);
    }
}
