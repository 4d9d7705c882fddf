//! Built-in defaults that apply when no configuration file overrides them

/// Configuration file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "extbuild.toml";

/// External build tool, resolved through PATH
pub const DEFAULT_TOOL: &str = "make";

/// Targets built by the `build_ext` hook, in order. `compiler-api` links
/// against the `compiler` artifact, so the order matters.
pub const DEFAULT_TARGETS: &[&str] = &["compiler", "compiler-api"];

pub const ENV_TOOL: &str = "EXTBUILD_TOOL";
pub const ENV_WORKING_DIR: &str = "EXTBUILD_WORKING_DIR";
