//! Platform abstraction for spawning external build tools.
//!
//! This crate provides:
//! - A command builder (`PlatformCommand`) describing one invocation
//! - The `ProcessOperations` capability the build hook runs commands through
//! - The system implementation backed by `tokio::process`
//!
//! Tests swap the system implementation for a scripted one, so nothing above
//! this layer ever needs a real build tool.

pub mod core;
pub mod implementations;
pub mod process;

pub use crate::core::{Platform, PlatformContext};
pub use implementations::system::SystemProcessOperations;

/// Re-export commonly used types
pub use process::{PlatformCommand, ProcessOperations, StepStatus};
