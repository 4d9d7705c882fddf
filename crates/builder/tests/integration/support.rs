//! Scripted process executor for driving the hook without a build tool

use async_trait::async_trait;
use extbuild_errors::{Error, PlatformError};
use extbuild_platform::{Platform, PlatformCommand, PlatformContext, ProcessOperations, StepStatus};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// What the fake does when asked to run the next command
pub enum Scripted {
    Exit(i32),
    Signal,
    SpawnError(&'static str),
    /// Never finishes, like a build that is still running
    Hang,
}

/// Records every command it is asked to run and answers from a script
#[derive(Default)]
pub struct ScriptedProcess {
    script: Mutex<VecDeque<Scripted>>,
    invoked: Mutex<Vec<PlatformCommand>>,
}

impl ScriptedProcess {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            invoked: Mutex::new(Vec::new()),
        })
    }

    /// Commands run so far, rendered as "tool target"
    pub fn invoked(&self) -> Vec<String> {
        self.invoked
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn invoked_commands(&self) -> Vec<PlatformCommand> {
        self.invoked.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessOperations for ScriptedProcess {
    async fn execute_status(
        &self,
        _ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<StepStatus, Error> {
        let rendered = cmd.to_string();
        self.invoked.lock().unwrap().push(cmd);
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("command invoked beyond the script");

        match next {
            Scripted::Exit(code) => Ok(StepStatus::from_code(code)),
            Scripted::Signal => Ok(StepStatus::signaled()),
            Scripted::Hang => std::future::pending().await,
            Scripted::SpawnError(message) => Err(PlatformError::ProcessExecutionFailed {
                command: rendered,
                message: message.to_string(),
            }
            .into()),
        }
    }

    async fn which(&self, program: &str) -> Result<PathBuf, Error> {
        Ok(PathBuf::from("/usr/bin").join(program))
    }
}

pub fn platform_with(process: &Arc<ScriptedProcess>) -> Platform {
    Platform::new(process.clone())
}
