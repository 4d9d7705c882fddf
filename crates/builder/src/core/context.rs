//! Context shared by one hook run

use extbuild_events::{AppEvent, EventEmitter, EventSender};
use extbuild_platform::PlatformContext;
use uuid::Uuid;

/// Identity and event channel of one hook run
#[derive(Clone, Debug)]
pub struct HookContext {
    /// Lifecycle command name the hook is registered under
    pub name: String,
    /// Correlates all events of one run
    pub run_id: String,
    /// Event sender for progress reporting
    pub event_sender: Option<EventSender>,
}

impl EventEmitter for HookContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl HookContext {
    /// Create new hook context
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run_id: Uuid::new_v4().to_string(),
            event_sender: None,
        }
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Start a new run: later events carry a fresh run id
    pub fn next_run(&mut self) {
        self.run_id = Uuid::new_v4().to_string();
    }

    /// Emit an event correlated with this run
    pub fn emit_event(&self, event: AppEvent) {
        self.emit_correlated(event, &self.run_id);
    }

    /// Platform context that reports into the same channel under the same run id
    #[must_use]
    pub fn platform_context(&self) -> PlatformContext {
        PlatformContext::new(self.event_sender.clone()).with_correlation_id(&self.run_id)
    }
}
