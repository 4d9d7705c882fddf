//! Host process operations implementation
//!
//! Children inherit stdin, stdout and stderr, so whatever the build tool
//! prints reaches the user directly; only the exit status comes back.

use async_trait::async_trait;
use extbuild_errors::{Error, PlatformError};
use extbuild_events::{AppEvent, GeneralEvent};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use crate::core::PlatformContext;
use crate::process::{PlatformCommand, ProcessOperations, StepStatus};

/// Process operations backed by `tokio::process`
#[derive(Debug, Clone, Copy)]
pub struct SystemProcessOperations;

impl SystemProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(cmd: &PlatformCommand) -> HashMap<String, String> {
    let mut context = HashMap::from([("command".to_string(), cmd.to_string())]);
    if let Some(dir) = cmd.get_current_dir() {
        context.insert("cwd".to_string(), dir.display().to_string());
    }
    context
}

#[async_trait]
impl ProcessOperations for SystemProcessOperations {
    async fn execute_status(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<StepStatus, Error> {
        let start = Instant::now();
        ctx.emit_event(AppEvent::General(GeneralEvent::debug_with_context(
            "spawning process",
            describe(&cmd),
        )));

        let mut command = Command::new(cmd.program());
        command.args(cmd.get_args());

        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .await
            .map_err(|e| PlatformError::ProcessExecutionFailed {
                command: cmd.to_string(),
                message: e.to_string(),
            })?;

        let status = StepStatus::from(status);
        debug!(
            command = %cmd,
            exit_code = ?status.exit_code,
            elapsed_ms = start.elapsed().as_millis(),
            "process exited"
        );
        Ok(status)
    }

    async fn which(&self, program: &str) -> Result<PathBuf, Error> {
        which::which(program).map_err(|_| {
            Error::from(PlatformError::CommandNotFound {
                command: program.to_string(),
            })
        })
    }
}
