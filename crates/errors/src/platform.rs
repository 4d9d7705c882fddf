//! Platform-specific operation errors

use std::borrow::Cow;

use crate::{BuildError, UserFacingError};
use thiserror::Error;

/// Errors that can occur during platform-specific operations
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },

    #[error("command not found: {command}")]
    CommandNotFound { command: String },
}

impl From<PlatformError> for BuildError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::ProcessExecutionFailed { command, message } => {
                BuildError::step_not_started(command, message)
            }
            PlatformError::CommandNotFound { command } => {
                let message = format!("command not found: {command}");
                BuildError::step_not_started(command, message)
            }
        }
    }
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandNotFound { .. } => {
                Some("Install the build tool or make sure it is on PATH.")
            }
            Self::ProcessExecutionFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::ProcessExecutionFailed { .. } => "platform.process_execution_failed",
            Self::CommandNotFound { .. } => "platform.command_not_found",
        })
    }
}
