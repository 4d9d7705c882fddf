//! extbuild - packaging driver for the `build_ext` hook
//!
//! Loads configuration, installs the hook in place of the default
//! `build_ext` command, runs the requested lifecycle phase and turns a hook
//! failure into process exit status -1.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands};
use crate::display::{OperationResult, OutputRenderer, ToolCheck};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use extbuild_builder::{BuildExtHook, BuildPlan, HookContext, Lifecycle, Phase, PhaseReport};
use extbuild_config::Config;
use extbuild_errors::PlatformError;
use extbuild_events::EventReceiver;
use extbuild_platform::Platform;
use std::future::Future;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const DEBUG_FILTER: &str = "info,extbuild=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.json, cli.global.debug);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting extbuild v{}", env!("CARGO_PKG_VERSION"));

    // Defaults, then the config file, then environment overrides
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;

    let json = cli.global.json;
    let renderer = OutputRenderer::new(json);

    let result = match cli.command {
        Commands::BuildExt | Commands::Build | Commands::Install => {
            let phase = cli.command.phase().unwrap_or(Phase::BuildExt);
            OperationResult::Phase(run_phase(phase, &config, json).await?)
        }
        Commands::Plan => OperationResult::Plan(BuildPlan::from_config(&config.hook)?),
        Commands::Check => {
            let check = check_tool(&config).await;
            renderer.render_result(&OperationResult::Check(check.clone()))?;
            if !check.found() {
                let err = PlatformError::CommandNotFound {
                    command: check.tool,
                };
                return Err(CliError::Ops(err.into()));
            }
            return Ok(());
        }
        Commands::Info => OperationResult::Info(config.package.clone()),
    };

    renderer.render_result(&result)?;
    Ok(())
}

/// Run a lifecycle phase with the configured hook registered as `build_ext`
async fn run_phase(phase: Phase, config: &Config, json: bool) -> Result<PhaseReport, CliError> {
    let plan = BuildPlan::from_config(&config.hook)?;
    let (event_sender, event_receiver) = extbuild_events::channel();

    let context =
        HookContext::new(BuildExtHook::COMMAND_NAME).with_event_sender(event_sender.clone());
    let hook = BuildExtHook::new(plan, Platform::current()).with_context(context);

    let mut lifecycle = Lifecycle::new().with_event_sender(event_sender);
    lifecycle.register(Box::new(hook));

    let handler = EventHandler::new(json);
    execute_with_events(lifecycle.run_phase(phase), event_receiver, handler)
        .await
        .map_err(CliError::from)
}

/// Drive a future while forwarding every event it emits to the handler
async fn execute_with_events<F, T>(
    future: F,
    mut event_receiver: EventReceiver,
    mut handler: EventHandler,
) -> T
where
    F: Future<Output = T>,
{
    tokio::pin!(future);

    // Pending events are handled before the future is polled again, so a
    // step's banner is out before that step's result is processed.
    loop {
        tokio::select! {
            biased;

            Some(message) = event_receiver.recv() => {
                handler.handle_event(message);
            }
            result = &mut future => {
                // Drain whatever was emitted right before completion
                while let Ok(message) = event_receiver.try_recv() {
                    handler.handle_event(message);
                }
                return result;
            }
        }
    }
}

async fn check_tool(config: &Config) -> ToolCheck {
    let platform = Platform::current();
    let path = platform.process().which(&config.hook.tool).await.ok();
    ToolCheck {
        tool: config.hook.tool.clone(),
        path,
    }
}

/// Initialize tracing/logging; every log record goes to stderr
fn init_tracing(json_mode: bool, debug_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_flag;

    let filter = || {
        if debug_enabled {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEBUG_FILTER))
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    };

    if json_mode {
        if debug_enabled {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter())
                .init();
        } else {
            // Keep the console clean for JSON output
            tracing_subscriber::fmt()
                .with_writer(std::io::sink)
                .with_env_filter("off")
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter())
            .with_target(debug_enabled)
            .init();
    }
}
