//! Build plan representation for sequential execution

use extbuild_config::HookConfig;
use extbuild_errors::{BuildError, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One external invocation: the build tool and the target handed to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    pub tool: String,
    pub target: String,
}

impl BuildStep {
    pub fn new(tool: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            target: target.into(),
        }
    }

    /// Command tokens in order: tool name, then target name
    #[must_use]
    pub fn argv(&self) -> [&str; 2] {
        [self.tool.as_str(), self.target.as_str()]
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tool, self.target)
    }
}

/// Ordered list of steps; step N+1 depends on step N
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    steps: Vec<BuildStep>,
    working_dir: Option<PathBuf>,
}

impl BuildPlan {
    /// Create a plan from explicit steps
    ///
    /// # Errors
    ///
    /// Returns `BuildError::EmptyPlan` if `steps` is empty.
    pub fn new(steps: Vec<BuildStep>) -> Result<Self, Error> {
        if steps.is_empty() {
            return Err(BuildError::EmptyPlan.into());
        }
        Ok(Self {
            steps,
            working_dir: None,
        })
    }

    /// Create the plan declared by the hook configuration: every target,
    /// in order, built by the configured tool
    ///
    /// # Errors
    ///
    /// Returns `BuildError::EmptyPlan` if the configuration lists no targets.
    pub fn from_config(config: &HookConfig) -> Result<Self, Error> {
        let steps = config
            .targets
            .iter()
            .map(|target| BuildStep::new(&config.tool, target))
            .collect();
        let mut plan = Self::new(steps)?;
        plan.working_dir.clone_from(&config.working_dir);
        Ok(plan)
    }

    /// Run every step in `dir` instead of the current directory
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a plan cannot be constructed without steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}
