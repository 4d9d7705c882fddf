//! Implementation on top of the host operating system

pub mod process;

pub use process::SystemProcessOperations;
