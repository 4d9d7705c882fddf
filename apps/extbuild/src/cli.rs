//! Command line interface definition

use clap::{Parser, Subcommand};
use extbuild_builder::Phase;
use std::path::PathBuf;

/// extbuild - build native targets during packaging
#[derive(Parser)]
#[command(name = "extbuild")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Packaging lifecycle hook that builds native targets with an external build tool")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the build_ext hook: every configured target, in order
    #[command(name = "build-ext", alias = "build_ext")]
    BuildExt,

    /// Run the build phase (build_ext first)
    Build,

    /// Run the install phase (build_ext first)
    Install,

    /// Show the steps build_ext would run, without running them
    Plan,

    /// Check that the configured build tool is on PATH
    Check,

    /// Show package metadata
    Info,
}

impl Commands {
    /// Lifecycle phase this command runs, if it runs one
    pub fn phase(self) -> Option<Phase> {
        match self {
            Commands::BuildExt => Some(Phase::BuildExt),
            Commands::Build => Some(Phase::Build),
            Commands::Install => Some(Phase::Install),
            Commands::Plan | Commands::Check | Commands::Info => None,
        }
    }
}
