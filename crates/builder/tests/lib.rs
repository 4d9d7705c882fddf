//! Integration tests for the build hook
//!
//! Organized by functional area; every test drives the hook through a
//! scripted process executor instead of a real build tool.

mod integration;
