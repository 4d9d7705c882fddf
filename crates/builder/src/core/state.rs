//! Hook state machine
//!
//! `Idle -> Running(0) -> ... -> Running(n-1) -> Succeeded`, with a jump to
//! `Failed` from any `Running` state. Within a run nothing moves backwards,
//! so a failed step is never retried; the next run starts again from `Idle`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HookState {
    Idle,
    /// Step `step` (zero-based) has been spawned and not yet reported
    Running { step: usize },
    /// Step `step` did not succeed
    Failed { step: usize },
    Succeeded,
}

impl HookState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Succeeded)
    }

    /// Whether moving to `next` is allowed for a plan of `total_steps` steps
    #[must_use]
    pub fn can_transition_to(&self, next: &Self, total_steps: usize) -> bool {
        match (self, next) {
            (Self::Idle, Self::Running { step }) => *step == 0 && total_steps > 0,
            (Self::Running { step: current }, Self::Running { step }) => {
                *step == current + 1 && *step < total_steps
            }
            (Self::Running { step: current }, Self::Failed { step }) => step == current,
            (Self::Running { step }, Self::Succeeded) => step + 1 == total_steps,
            _ => false,
        }
    }
}

impl fmt::Display for HookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running { step } => write!(f, "running step {}", step + 1),
            Self::Failed { step } => write!(f, "failed at step {}", step + 1),
            Self::Succeeded => f.write_str("succeeded"),
        }
    }
}
