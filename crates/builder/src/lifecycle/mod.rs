//! Packaging lifecycle driver
//!
//! The driver owns a table of lifecycle commands keyed by name. A project
//! swaps in its own implementation by registering a command under an
//! existing name, which is how [`BuildExtHook`](crate::BuildExtHook) takes
//! over `build_ext`.
//!
//! Commands only report failure; turning a failure into a process exit
//! status is left to the binary via [`exit_code_for`].

use async_trait::async_trait;
use extbuild_errors::{BuildError, Error};
use extbuild_events::{AppEvent, BuildEvent, EventEmitter, EventSender};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::core::hook::HookReport;

/// Exit status the packaging process ends with when a build step fails
pub const BUILD_FAILURE_EXIT_CODE: i32 = -1;

/// Exit status for any other error surfaced by the driver
pub const GENERAL_FAILURE_EXIT_CODE: i32 = 1;

/// Map a driver error to the status the process should exit with
#[must_use]
pub fn exit_code_for(err: &Error) -> i32 {
    if err.is_step_failure() {
        BUILD_FAILURE_EXIT_CODE
    } else {
        GENERAL_FAILURE_EXIT_CODE
    }
}

/// An option a lifecycle command accepts from the packaging framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOption {
    pub long: &'static str,
    pub short: Option<char>,
    pub help: &'static str,
}

/// Contract every lifecycle command fulfils
///
/// The framework calls `initialize_options`, then `finalize_options`, then
/// `run`, exactly once each per invocation.
#[async_trait]
pub trait LifecycleCommand: Send + Sync {
    /// Name the command is registered under
    fn name(&self) -> &str;

    /// Options this command declares; most declare none
    fn user_options(&self) -> &[UserOption] {
        &[]
    }

    fn initialize_options(&mut self) {}

    /// # Errors
    ///
    /// Returns an error if the option values cannot be used together.
    fn finalize_options(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the command did not complete.
    async fn run(&mut self) -> Result<HookReport, Error>;
}

/// Built-in `build_ext`: there are no in-tree extension modules, so it does
/// nothing. Projects that need real work register their own command.
#[derive(Debug, Default)]
pub struct DefaultBuildExt;

#[async_trait]
impl LifecycleCommand for DefaultBuildExt {
    fn name(&self) -> &str {
        "build_ext"
    }

    async fn run(&mut self) -> Result<HookReport, Error> {
        debug!("no extension modules to build");
        Ok(HookReport::empty("build_ext"))
    }
}

/// Lifecycle entry points the driver can be asked to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BuildExt,
    Build,
    Install,
}

impl Phase {
    /// Commands this driver runs for the phase, in order. Anything the
    /// packaging framework does afterwards happens outside the driver.
    #[must_use]
    pub fn commands(self) -> &'static [&'static str] {
        match self {
            Self::BuildExt | Self::Build | Self::Install => &["build_ext"],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BuildExt => "build_ext",
            Self::Build => "build",
            Self::Install => "install",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build_ext" | "build-ext" => Ok(Self::BuildExt),
            "build" => Ok(Self::Build),
            "install" => Ok(Self::Install),
            other => Err(BuildError::UnknownCommand {
                name: other.to_string(),
            }
            .into()),
        }
    }
}

/// Result of a completed phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub reports: Vec<HookReport>,
}

impl PhaseReport {
    /// Number of external invocations across all commands of the phase
    #[must_use]
    pub fn steps_run(&self) -> usize {
        self.reports.iter().map(|r| r.records.len()).sum()
    }
}

/// Packaging driver holding the command table
pub struct Lifecycle {
    commands: BTreeMap<String, Box<dyn LifecycleCommand>>,
    event_sender: Option<EventSender>,
}

impl EventEmitter for Lifecycle {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Driver with the built-in commands registered
    #[must_use]
    pub fn new() -> Self {
        let mut lifecycle = Self {
            commands: BTreeMap::new(),
            event_sender: None,
        };
        lifecycle.register(Box::new(DefaultBuildExt));
        lifecycle
    }

    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Register a command, replacing any command already registered under
    /// the same name
    pub fn register(&mut self, command: Box<dyn LifecycleCommand>) {
        let name = command.name().to_string();
        if self.commands.insert(name.clone(), command).is_some() {
            debug!(command = %name, "replaced lifecycle command");
        }
    }

    /// Names of all registered commands, sorted
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Options declared by a registered command
    ///
    /// # Errors
    ///
    /// Returns `BuildError::UnknownCommand` if nothing is registered under `name`.
    pub fn user_options(&self, name: &str) -> Result<&[UserOption], Error> {
        self.commands
            .get(name)
            .map(|command| command.user_options())
            .ok_or_else(|| {
                BuildError::UnknownCommand {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Run one command through the full option/run protocol
    ///
    /// # Errors
    ///
    /// Returns `BuildError::UnknownCommand` for an unregistered name, or
    /// whatever the command itself fails with.
    pub async fn run_command(&mut self, name: &str) -> Result<HookReport, Error> {
        let command = self
            .commands
            .get_mut(name)
            .ok_or_else(|| BuildError::UnknownCommand {
                name: name.to_string(),
            })?;

        info!(command = %name, "running lifecycle command");
        command.initialize_options();
        command.finalize_options()?;
        command.run().await
    }

    /// Run every command of a phase in order, stopping at the first error
    ///
    /// # Errors
    ///
    /// Propagates the first command error unchanged.
    pub async fn run_phase(&mut self, phase: Phase) -> Result<PhaseReport, Error> {
        let mut reports = Vec::new();
        for name in phase.commands() {
            reports.push(self.run_command(name).await?);
        }

        self.emit(AppEvent::Build(BuildEvent::PhaseCompleted {
            phase: phase.to_string(),
            commands: reports.iter().map(|r| r.command.clone()).collect(),
        }));

        Ok(PhaseReport { phase, reports })
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
