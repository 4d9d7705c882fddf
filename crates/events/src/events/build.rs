use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::FailureContext;

/// Events emitted by the `build_ext` hook while it walks its plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildEvent {
    /// Hook left `Idle` and is about to run its first step
    HookStarted {
        hook: String,
        total_steps: usize,
    },

    /// An external build step was spawned
    StepStarted {
        index: usize,
        command: String,
    },

    /// An external build step exited with status 0
    StepCompleted {
        index: usize,
        command: String,
        exit_code: i32,
        duration: Duration,
    },

    /// An external build step did not succeed; later steps are skipped
    StepFailed {
        index: usize,
        command: String,
        exit_code: Option<i32>,
        skipped: usize,
        failure: FailureContext,
    },

    /// Every step succeeded
    HookCompleted {
        hook: String,
        steps_run: usize,
        duration: Duration,
    },

    /// The hook ended in the failed state
    HookFailed {
        hook: String,
        failure: FailureContext,
    },

    /// A lifecycle phase handed control back to the packaging driver
    PhaseCompleted {
        phase: String,
        commands: Vec<String>,
    },
}
