//! Configuration of the `build_ext` hook

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_TARGETS, DEFAULT_TOOL};

/// Which external tool the hook drives and which targets it builds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HookConfig {
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
    /// Directory the tool runs in; the current directory when unset
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            targets: default_targets(),
            working_dir: None,
        }
    }
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

fn default_targets() -> Vec<String> {
    DEFAULT_TARGETS.iter().map(|t| (*t).to_string()).collect()
}
