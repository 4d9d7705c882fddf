//! Core hook types: context, state machine and the hook itself

pub mod context;
pub mod hook;
pub mod state;
