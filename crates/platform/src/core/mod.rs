//! Core platform abstractions and context management

use extbuild_events::{AppEvent, EventEmitter, EventSender};
use std::sync::Arc;

use crate::implementations::system::SystemProcessOperations;
use crate::process::ProcessOperations;

/// Context for platform operations, providing event emission
#[derive(Clone, Default)]
pub struct PlatformContext {
    event_sender: Option<EventSender>,
    correlation_id: Option<String>,
}

impl PlatformContext {
    /// Create a new platform context with event emission capabilities
    #[must_use]
    pub fn new(event_sender: Option<EventSender>) -> Self {
        Self {
            event_sender,
            correlation_id: None,
        }
    }

    /// Tag every event emitted through this context with a correlation id
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Emit a platform event if event sender is available
    pub fn emit_event(&self, event: AppEvent) {
        match &self.correlation_id {
            Some(id) => self.emit_correlated(event, id),
            None => self.emit(event),
        }
    }
}

impl EventEmitter for PlatformContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

/// Main platform abstraction providing access to platform operations
#[derive(Clone)]
pub struct Platform {
    process_ops: Arc<dyn ProcessOperations>,
}

impl Platform {
    /// Create a new platform instance with the specified implementation
    pub fn new(process_ops: Arc<dyn ProcessOperations>) -> Self {
        Self { process_ops }
    }

    /// Platform backed by real process spawning
    #[must_use]
    pub fn current() -> Self {
        Self::new(Arc::new(SystemProcessOperations::new()))
    }

    /// Get process operations
    pub fn process(&self) -> &dyn ProcessOperations {
        self.process_ops.as_ref()
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
