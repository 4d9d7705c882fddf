//! The packaging driver with the hook registered as `build_ext`

use super::support::{platform_with, Scripted, ScriptedProcess};
use extbuild_builder::*;
use extbuild_config::HookConfig;
use extbuild_events::{AppEvent, BuildEvent};

fn lifecycle_with(process: &std::sync::Arc<ScriptedProcess>) -> Lifecycle {
    let plan = BuildPlan::from_config(&HookConfig::default()).unwrap();
    let mut lifecycle = Lifecycle::new();
    lifecycle.register(Box::new(BuildExtHook::new(plan, platform_with(process))));
    lifecycle
}

#[tokio::test]
async fn test_install_runs_hook_then_continues() {
    let process = ScriptedProcess::new([Scripted::Exit(0), Scripted::Exit(0)]);
    let (tx, mut rx) = extbuild_events::channel();
    let mut lifecycle = lifecycle_with(&process).with_event_sender(tx);

    let report = lifecycle.run_phase(Phase::Install).await.unwrap();

    assert_eq!(report.phase, Phase::Install);
    assert_eq!(report.steps_run(), 2);
    assert_eq!(process.invoked(), vec!["make compiler", "make compiler-api"]);

    let message = rx.recv().await.unwrap();
    assert!(matches!(
        message.event,
        AppEvent::Build(BuildEvent::PhaseCompleted { ref phase, .. }) if phase == "install"
    ));
}

#[tokio::test]
async fn test_registered_hook_replaces_default() {
    let process = ScriptedProcess::new([Scripted::Exit(0), Scripted::Exit(0)]);
    let mut lifecycle = lifecycle_with(&process);

    assert_eq!(lifecycle.command_names().collect::<Vec<_>>(), vec!["build_ext"]);
    assert!(lifecycle.user_options("build_ext").unwrap().is_empty());

    let report = lifecycle.run_command("build_ext").await.unwrap();
    assert_eq!(report.records.len(), 2);
}

#[tokio::test]
async fn test_phase_failure_maps_to_exit_minus_one() {
    let process = ScriptedProcess::new([Scripted::Exit(2)]);
    let mut lifecycle = lifecycle_with(&process);

    let err = lifecycle.run_phase(Phase::Install).await.unwrap_err();

    assert_eq!(exit_code_for(&err), BUILD_FAILURE_EXIT_CODE);
    assert_eq!(process.invoked(), vec!["make compiler"]);
}

#[tokio::test]
async fn test_each_phase_reruns_the_hook() {
    let process = ScriptedProcess::new([
        Scripted::Exit(0),
        Scripted::Exit(0),
        Scripted::Exit(0),
        Scripted::Exit(0),
    ]);
    let mut lifecycle = lifecycle_with(&process);

    lifecycle.run_phase(Phase::Build).await.unwrap();
    let report = lifecycle.run_phase(Phase::Install).await.unwrap();

    assert_eq!(report.steps_run(), 2);
    assert_eq!(
        process.invoked(),
        vec![
            "make compiler",
            "make compiler-api",
            "make compiler",
            "make compiler-api"
        ]
    );
}
