//! Structured logging integration for events
//!
//! Domain events arrive over the event channel; each one is turned into a
//! tracing record with structured fields so `--debug` output and JSON logs
//! carry the same information the hook reported. Failures are recorded at
//! debug level: the status line and the final `Error:` report are what the
//! user sees by default.

use extbuild_events::{AppEvent, BuildEvent, EventMessage, GeneralEvent};
use tracing::{debug, info};

/// Log an event using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    match &message.event {
        AppEvent::Build(build_event) => match build_event {
            BuildEvent::HookStarted { hook, total_steps } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    hook = %hook,
                    total_steps,
                    "Hook started"
                );
            }
            BuildEvent::StepStarted { index, command } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    index,
                    command = %command,
                    "Build step started"
                );
            }
            BuildEvent::StepCompleted {
                index,
                command,
                exit_code,
                duration,
            } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    index,
                    command = %command,
                    exit_code,
                    duration_ms = duration.as_millis(),
                    "Build step completed"
                );
            }
            BuildEvent::StepFailed {
                index,
                command,
                exit_code,
                skipped,
                failure,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    index,
                    command = %command,
                    exit_code = ?exit_code,
                    skipped,
                    code = ?failure.code,
                    message = %failure.message,
                    "Build step failed"
                );
            }
            BuildEvent::HookCompleted {
                hook,
                steps_run,
                duration,
            } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    hook = %hook,
                    steps_run,
                    duration_ms = duration.as_millis(),
                    "Hook completed"
                );
            }
            BuildEvent::HookFailed { hook, failure } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    hook = %hook,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Hook failed"
                );
            }
            BuildEvent::PhaseCompleted { phase, commands } => {
                info!(
                    source = meta.source.as_str(),
                    phase = %phase,
                    commands = ?commands,
                    "Lifecycle phase completed"
                );
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::DebugLog { message, context } => {
                debug!(source = meta.source.as_str(), context = ?context, "{message}");
            }
        },
    }
}
