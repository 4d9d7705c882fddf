//! The `build_ext` hook: run every planned step in order, stop at the first failure

use async_trait::async_trait;
use extbuild_errors::{BuildError, Error};
use extbuild_events::{AppEvent, BuildEvent, FailureContext};
use extbuild_platform::{Platform, StepStatus};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::context::HookContext;
use super::state::HookState;
use crate::build_plan::{BuildPlan, BuildStep};
use crate::lifecycle::LifecycleCommand;

/// Outcome of one step that ran to a successful exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: BuildStep,
    pub status: StepStatus,
    pub duration: Duration,
}

/// What a successful hook run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookReport {
    pub command: String,
    pub records: Vec<StepRecord>,
    pub duration: Duration,
}

impl HookReport {
    /// Report for a command that had nothing to run
    #[must_use]
    pub fn empty(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }
}

/// Replacement for the default `build_ext` lifecycle step
///
/// Nothing is cached between runs; running the hook again re-executes every
/// step.
#[derive(Debug)]
pub struct BuildExtHook {
    plan: BuildPlan,
    platform: Platform,
    context: HookContext,
    state: HookState,
}

impl BuildExtHook {
    pub const COMMAND_NAME: &'static str = "build_ext";

    #[must_use]
    pub fn new(plan: BuildPlan, platform: Platform) -> Self {
        Self {
            plan,
            platform,
            context: HookContext::new(Self::COMMAND_NAME),
            state: HookState::Idle,
        }
    }

    /// Replace the context, e.g. to attach an event sender
    #[must_use]
    pub fn with_context(mut self, context: HookContext) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn plan(&self) -> &BuildPlan {
        &self.plan
    }

    #[must_use]
    pub fn state(&self) -> HookState {
        self.state
    }

    #[must_use]
    pub fn context(&self) -> &HookContext {
        &self.context
    }

    /// Run the plan
    ///
    /// Steps run strictly one after another. Step N+1 is never spawned
    /// unless step N exited with status 0. Every call is a fresh run under a
    /// new run id: a hook that already succeeded or failed starts over from
    /// the first step.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::StepFailed` for the first step that exits non-zero,
    /// is killed by a signal, or cannot be spawned. Returns
    /// `BuildError::RunInterrupted` if an earlier run was dropped while a
    /// step was still running.
    pub async fn run(&mut self) -> Result<HookReport, Error> {
        if self.state.is_terminal() {
            self.state = HookState::Idle;
            self.context.next_run();
        }
        if self.state != HookState::Idle {
            return Err(BuildError::RunInterrupted {
                state: self.state.to_string(),
            }
            .into());
        }

        let started = Instant::now();
        let total_steps = self.plan.len();
        info!(
            hook = %self.context.name,
            run_id = %self.context.run_id,
            steps = total_steps,
            "running build hook"
        );
        self.context
            .emit_event(AppEvent::Build(BuildEvent::HookStarted {
                hook: self.context.name.clone(),
                total_steps,
            }));

        let mut records = Vec::with_capacity(total_steps);
        for index in 0..total_steps {
            self.transition(HookState::Running { step: index })?;
            let step = self.plan.steps()[index].clone();

            match self.run_step(index, &step).await {
                Ok(record) => records.push(record),
                Err(err) => {
                    self.transition(HookState::Failed { step: index })?;
                    self.report_failure(index, &step, &err);
                    return Err(err);
                }
            }
        }

        self.transition(HookState::Succeeded)?;
        let duration = started.elapsed();
        self.context
            .emit_event(AppEvent::Build(BuildEvent::HookCompleted {
                hook: self.context.name.clone(),
                steps_run: records.len(),
                duration,
            }));

        Ok(HookReport {
            command: self.context.name.clone(),
            records,
            duration,
        })
    }

    async fn run_step(&self, index: usize, step: &BuildStep) -> Result<StepRecord, Error> {
        let command = step.to_string();
        let process = self.platform.process();

        let mut cmd = process.create_command(&step.tool);
        cmd.arg(&step.target);
        if let Some(dir) = self.plan.working_dir() {
            cmd.current_dir(dir);
        }

        debug!(index, command = %command, "starting build step");
        self.context
            .emit_event(AppEvent::Build(BuildEvent::StepStarted {
                index,
                command: command.clone(),
            }));

        let started = Instant::now();
        let status = process
            .execute_status(&self.context.platform_context(), cmd)
            .await
            .map_err(|err| match err {
                Error::Platform(platform_err) => BuildError::from(platform_err),
                other => BuildError::step_not_started(&command, other.to_string()),
            })?;
        let duration = started.elapsed();

        if !status.success() {
            return Err(BuildError::step_exited(&command, status.exit_code).into());
        }

        self.context
            .emit_event(AppEvent::Build(BuildEvent::StepCompleted {
                index,
                command,
                exit_code: 0,
                duration,
            }));

        Ok(StepRecord {
            step: step.clone(),
            status,
            duration,
        })
    }

    fn transition(&mut self, next: HookState) -> Result<(), Error> {
        if !self.state.can_transition_to(&next, self.plan.len()) {
            return Err(Error::internal(format!(
                "invalid hook transition: {} -> {next}",
                self.state
            )));
        }
        self.state = next;
        Ok(())
    }

    fn report_failure(&self, index: usize, step: &BuildStep, err: &Error) {
        let skipped = self.plan.len() - index - 1;
        let exit_code = match err {
            Error::Build(BuildError::StepFailed { exit_code, .. }) => *exit_code,
            _ => None,
        };
        debug!(
            index,
            command = %step,
            exit_code = ?exit_code,
            skipped,
            "build step failed"
        );

        let failure = FailureContext::from_error(err);
        self.context
            .emit_event(AppEvent::Build(BuildEvent::StepFailed {
                index,
                command: step.to_string(),
                exit_code,
                skipped,
                failure: failure.clone(),
            }));
        self.context
            .emit_event(AppEvent::Build(BuildEvent::HookFailed {
                hook: self.context.name.clone(),
                failure,
            }));
    }
}

#[async_trait]
impl LifecycleCommand for BuildExtHook {
    fn name(&self) -> &str {
        &self.context.name
    }

    async fn run(&mut self) -> Result<HookReport, Error> {
        BuildExtHook::run(self).await
    }
}
