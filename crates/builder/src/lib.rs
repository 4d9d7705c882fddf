#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]
//! The `build_ext` hook for extbuild
//!
//! Instead of compiling extensions itself, the hook hands each configured
//! target to an external build tool, one after the other, and stops at the
//! first target that does not build. The packaging driver in [`lifecycle`]
//! decides what a failure means for the process.

mod build_plan;
mod core;
pub mod lifecycle;

pub use build_plan::{BuildPlan, BuildStep};
pub use crate::core::context::HookContext;
pub use crate::core::hook::{BuildExtHook, HookReport, StepRecord};
pub use crate::core::state::HookState;
pub use lifecycle::{
    exit_code_for, Lifecycle, LifecycleCommand, Phase, PhaseReport, UserOption,
    BUILD_FAILURE_EXIT_CODE,
};
