//! Build hook error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// An external build step did not report success. Non-zero exits,
    /// signal terminations and spawn failures all land here.
    #[error("build step `{command}` failed: {detail}")]
    StepFailed {
        command: String,
        exit_code: Option<i32>,
        detail: String,
    },

    #[error("build plan has no steps")]
    EmptyPlan,

    /// A previous run was dropped before it reached a terminal state
    #[error("build hook run was interrupted ({state})")]
    RunInterrupted { state: String },

    #[error("unknown lifecycle command: {name}")]
    UnknownCommand { name: String },
}

impl BuildError {
    /// Failure of a step that ran to completion with a non-success status
    pub fn step_exited(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        let detail = match exit_code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        };
        Self::StepFailed {
            command: command.into(),
            exit_code,
            detail,
        }
    }

    /// Failure of a step that could not be started at all
    pub fn step_not_started(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepFailed {
            command: command.into(),
            exit_code: None,
            detail: message.into(),
        }
    }
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::StepFailed { .. } => {
                Some("See the build tool output above for the cause of the failure.")
            }
            Self::EmptyPlan => Some("Declare at least one target under [hook] in extbuild.toml."),
            Self::UnknownCommand { .. } => {
                Some("Run `extbuild --help` to list the available lifecycle commands.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::StepFailed { .. } => "build.step_failed",
            Self::EmptyPlan => "build.empty_plan",
            Self::RunInterrupted { .. } => "build.run_interrupted",
            Self::UnknownCommand { .. } => "build.unknown_command",
        };
        Some(code)
    }
}
