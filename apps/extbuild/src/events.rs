//! Event handling and status display

use console::{Style, Term};
use extbuild_events::{AppEvent, BuildEvent, EventMessage};

use crate::logging::log_event_with_tracing;

/// Event handler for user feedback
///
/// Status lines go to stderr so they interleave with the build tool's own
/// output instead of mixing into anything a caller parses from stdout.
pub struct EventHandler {
    term: Term,
    /// Suppress status lines (JSON mode)
    quiet: bool,
    steps_total: usize,
}

impl EventHandler {
    pub fn new(quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            quiet,
            steps_total: 0,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        if self.quiet {
            return;
        }

        match message.event {
            AppEvent::Build(BuildEvent::HookStarted { total_steps, .. }) => {
                self.steps_total = total_steps;
            }
            AppEvent::Build(BuildEvent::StepStarted { index, command }) => {
                let line = format!("==> [{}/{}] {command}", index + 1, self.steps_total);
                self.show_status(&Style::new().bold().apply_to(line).to_string());
            }
            AppEvent::Build(BuildEvent::StepFailed {
                command,
                exit_code,
                skipped,
                ..
            }) => {
                let status = match exit_code {
                    Some(code) => format!("exit status {code}"),
                    None => "no exit status".to_string(),
                };
                let mut line = format!("{command} failed ({status})");
                if skipped > 0 {
                    line.push_str(&format!(", skipping {skipped} remaining step(s)"));
                }
                self.show_error(&line);
            }
            AppEvent::Build(BuildEvent::HookCompleted { steps_run, .. }) => {
                let line = format!("build_ext finished: {steps_run} step(s) succeeded");
                self.show_status(&Style::new().green().apply_to(line).to_string());
            }
            _ => {}
        }
    }

    fn show_status(&self, message: &str) {
        self.term.write_line(message).unwrap_or(());
    }

    fn show_error(&self, message: &str) {
        let styled = Style::new().red().apply_to(message).to_string();
        self.term.write_line(&styled).unwrap_or(());
    }
}
