//! Ordering and short-circuit behavior of the `build_ext` hook

use super::support::{platform_with, Scripted, ScriptedProcess};
use extbuild_builder::*;
use extbuild_config::HookConfig;
use extbuild_errors::{BuildError, Error};
use extbuild_events::{AppEvent, BuildEvent};
use std::path::Path;
use std::time::Duration;

fn default_plan() -> BuildPlan {
    BuildPlan::from_config(&HookConfig::default()).unwrap()
}

#[tokio::test]
async fn test_both_steps_succeed() {
    let process = ScriptedProcess::new([Scripted::Exit(0), Scripted::Exit(0)]);
    let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));

    let report = hook.run().await.unwrap();

    assert_eq!(process.invoked(), vec!["make compiler", "make compiler-api"]);
    assert_eq!(report.command, "build_ext");
    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| r.status.success()));
    assert_eq!(hook.state(), HookState::Succeeded);
}

#[tokio::test]
async fn test_first_step_failure_skips_second() {
    let process = ScriptedProcess::new([Scripted::Exit(2)]);
    let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));

    let err = hook.run().await.unwrap_err();

    assert_eq!(process.invoked(), vec!["make compiler"]);
    match &err {
        Error::Build(BuildError::StepFailed {
            command, exit_code, ..
        }) => {
            assert_eq!(command, "make compiler");
            assert_eq!(*exit_code, Some(2));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(exit_code_for(&err), -1);
    assert_eq!(hook.state(), HookState::Failed { step: 0 });
}

#[tokio::test]
async fn test_second_step_failure() {
    let process = ScriptedProcess::new([Scripted::Exit(0), Scripted::Exit(1)]);
    let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));

    let err = hook.run().await.unwrap_err();

    assert_eq!(process.invoked(), vec!["make compiler", "make compiler-api"]);
    assert!(matches!(
        err,
        Error::Build(BuildError::StepFailed {
            exit_code: Some(1),
            ..
        })
    ));
    assert_eq!(exit_code_for(&err), -1);
    assert_eq!(hook.state(), HookState::Failed { step: 1 });
}

#[tokio::test]
async fn test_missing_tool_is_a_step_failure() {
    let process = ScriptedProcess::new([Scripted::SpawnError("No such file or directory")]);
    let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));

    let err = hook.run().await.unwrap_err();

    assert_eq!(process.invoked(), vec!["make compiler"]);
    match &err {
        Error::Build(BuildError::StepFailed {
            command,
            exit_code,
            detail,
        }) => {
            assert_eq!(command, "make compiler");
            assert_eq!(*exit_code, None);
            assert_eq!(detail, "No such file or directory");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(exit_code_for(&err), -1);
}

#[tokio::test]
async fn test_signal_termination_is_a_step_failure() {
    let process = ScriptedProcess::new([Scripted::Signal]);
    let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));

    let err = hook.run().await.unwrap_err();
    assert!(err.is_step_failure());
    assert_eq!(process.invoked().len(), 1);
}

#[tokio::test]
async fn test_same_hook_reruns_every_step() {
    let process = ScriptedProcess::new([
        Scripted::Exit(0),
        Scripted::Exit(0),
        Scripted::Exit(0),
        Scripted::Exit(0),
    ]);
    let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));

    hook.run().await.unwrap();
    let first_run = hook.context().run_id.clone();
    assert_eq!(hook.state(), HookState::Succeeded);

    let report = hook.run().await.unwrap();
    assert_eq!(report.records.len(), 2);
    assert_ne!(hook.context().run_id, first_run);
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

#[tokio::test]
async fn test_rerun_after_failure_starts_from_first_step() {
    let process = ScriptedProcess::new([
        Scripted::Exit(0),
        Scripted::Exit(1),
        Scripted::Exit(0),
        Scripted::Exit(0),
    ]);
    let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));

    hook.run().await.unwrap_err();
    assert_eq!(hook.state(), HookState::Failed { step: 1 });

    hook.run().await.unwrap();
    assert_eq!(hook.state(), HookState::Succeeded);
    assert_eq!(process.invoked().len(), 4);
    assert_eq!(process.invoked()[2], "make compiler");
}

#[tokio::test]
async fn test_interrupted_run_is_rejected() {
    let process = ScriptedProcess::new([Scripted::Hang]);
    let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));

    let outcome = tokio::time::timeout(Duration::from_millis(20), hook.run()).await;
    assert!(outcome.is_err());
    assert_eq!(hook.state(), HookState::Running { step: 0 });

    let err = hook.run().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Build(BuildError::RunInterrupted { .. })
    ));
    assert!(!err.is_step_failure());
    assert_eq!(process.invoked(), vec!["make compiler"]);
}

#[tokio::test]
async fn test_new_hook_rebuilds_everything() {
    let process = ScriptedProcess::new([
        Scripted::Exit(0),
        Scripted::Exit(0),
        Scripted::Exit(0),
        Scripted::Exit(0),
    ]);

    for _ in 0..2 {
        let mut hook = BuildExtHook::new(default_plan(), platform_with(&process));
        hook.run().await.unwrap();
    }

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

#[tokio::test]
async fn test_longer_plan_stops_at_first_failure() {
    let config = HookConfig {
        tool: "gmake".into(),
        targets: vec!["compiler".into(), "compiler-api".into(), "kernel".into()],
        working_dir: Some("/src/yask".into()),
    };
    let plan = BuildPlan::from_config(&config).unwrap();
    let process = ScriptedProcess::new([Scripted::Exit(0), Scripted::Exit(3)]);
    let mut hook = BuildExtHook::new(plan, platform_with(&process));

    let err = hook.run().await.unwrap_err();

    assert!(err.is_step_failure());
    assert_eq!(process.invoked(), vec!["gmake compiler", "gmake compiler-api"]);
    for cmd in process.invoked_commands() {
        assert_eq!(
            cmd.get_current_dir().map(|p| p.as_path()),
            Some(Path::new("/src/yask"))
        );
    }
}

#[tokio::test]
async fn test_events_follow_the_run() {
    let (tx, mut rx) = extbuild_events::channel();
    let process = ScriptedProcess::new([Scripted::Exit(0), Scripted::Exit(1)]);
    let context = HookContext::new("build_ext").with_event_sender(tx);
    let run_id = context.run_id.clone();
    let mut hook =
        BuildExtHook::new(default_plan(), platform_with(&process)).with_context(context);

    hook.run().await.unwrap_err();
    drop(hook);

    let mut kinds = Vec::new();
    while let Some(message) = rx.recv().await {
        assert_eq!(message.meta.correlation_id.as_deref(), Some(run_id.as_str()));
        if let AppEvent::Build(event) = message.event {
            kinds.push(match event {
                BuildEvent::HookStarted { total_steps, .. } => {
                    assert_eq!(total_steps, 2);
                    "hook_started"
                }
                BuildEvent::StepStarted { .. } => "step_started",
                BuildEvent::StepCompleted { .. } => "step_completed",
                BuildEvent::StepFailed {
                    index,
                    exit_code,
                    skipped,
                    ..
                } => {
                    assert_eq!(index, 1);
                    assert_eq!(exit_code, Some(1));
                    assert_eq!(skipped, 0);
                    "step_failed"
                }
                BuildEvent::HookFailed { .. } => "hook_failed",
                BuildEvent::HookCompleted { .. } => "hook_completed",
                BuildEvent::PhaseCompleted { .. } => "phase_completed",
            });
        }
    }

    assert_eq!(
        kinds,
        vec![
            "hook_started",
            "step_started",
            "step_completed",
            "step_started",
            "step_failed",
            "hook_failed",
        ]
    );
}
