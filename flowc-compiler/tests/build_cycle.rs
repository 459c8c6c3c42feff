//! Full build cycles: failure isolation and fail-closed parsing.

use std::time::{Duration, Instant};

use flowc_compiler::{
    BuildOrchestrator, BuildRequest, CycleError, CycleReport, Environment, GeneratorKind,
    Pipeline, Stage, Target, WatchScheduler, run_cycle,
    testing::{FailingGenerator, Recorder, TestProject},
};

fn orchestrator(recorder: &Recorder) -> BuildOrchestrator {
    recorder
        .generators()
        .into_iter()
        .fold(BuildOrchestrator::new(), BuildOrchestrator::register)
}

fn build(project: &TestProject, orchestrator: &BuildOrchestrator) -> Result<CycleReport, CycleError> {
    run_cycle(
        &project.project(),
        &Pipeline::new(),
        orchestrator,
        BuildRequest::default(),
    )
}

#[test]
fn malformed_file_skips_generation_entirely() {
    let project = TestProject::new("todo")
        .flow("a.flow", "model:\n  name: Todo\n")
        .flow("b.flow", "model: [unterminated\n")
        .flow("c.flow", "- just\n- a list\n");
    let recorder = Recorder::new();

    let err = build(&project, &orchestrator(&recorder)).unwrap_err();

    assert!(recorder.calls().is_empty());
    match &err {
        CycleError::Parse { errors, .. } => assert_eq!(errors.len(), 2),
        other => panic!("expected a parse failure, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "2 specification file(s) failed to parse; generation skipped"
    );

    let parse_lines: Vec<_> = err
        .status()
        .iter()
        .filter(|s| s.stage == Stage::Parse)
        .map(|s| (s.subject.clone(), s.outcome.is_failed()))
        .collect();
    assert_eq!(
        parse_lines,
        vec![
            ("src/flows/a.flow".to_string(), false),
            ("src/flows/b.flow".to_string(), true),
            ("src/flows/c.flow".to_string(), true),
        ]
    );
    assert!(
        err.status()
            .iter()
            .all(|s| s.stage != Stage::Generate)
    );
}

#[test]
fn failed_cycle_preserves_previous_output() {
    let project = TestProject::new("todo").flow("todo.flow", "model:\n  name: Todo\n");
    let recorder = Recorder::new();
    let orchestrator = orchestrator(&recorder);

    build(&project, &orchestrator).expect("first build");
    let before = project.read_output("backend.txt").expect("backend output");
    assert_eq!(before, "Todo");

    project.write("todo.flow", "model:\n  name: Task\nbroken: [\n");
    build(&project, &orchestrator).unwrap_err();
    assert_eq!(project.read_output("backend.txt").as_deref(), Some("Todo"));

    project.write("todo.flow", "model:\n  name: Task\n");
    build(&project, &orchestrator).expect("recovered build");
    assert_eq!(project.read_output("backend.txt").as_deref(), Some("Task"));
}

#[test]
fn broken_generator_does_not_stop_siblings() {
    let project = TestProject::new("todo").flow("todo.flow", "model:\n  name: Todo\n");
    let recorder = Recorder::new();
    let orchestrator =
        orchestrator(&recorder).register(FailingGenerator::new(GeneratorKind::Backend));

    let report = build(&project, &orchestrator).expect("cycle runs");

    assert!(!report.is_success());
    let failed: Vec<_> = report.failed_targets().map(|o| o.kind).collect();
    assert_eq!(failed, vec![GeneratorKind::Backend]);
    assert!(project.read_output("frontend.txt").is_some());
    assert!(project.read_output("mobile-ios.txt").is_some());
    // No rollback of the failed target's partial output.
    assert!(project.read_output("backend.partial").is_some());

    let generate: Vec<_> = report
        .status
        .iter()
        .filter(|s| s.stage == Stage::Generate)
        .map(ToString::to_string)
        .collect();
    insta::assert_snapshot!(generate.join("\n"), @r"
    [generate] backend: failed (backend generator exploded)
    [generate] frontend: ok
    [generate] mobile-ios: ok
    [generate] mobile-android: ok
    [generate] desktop: ok
    ");
}

#[test]
fn each_cycle_starts_from_a_fresh_ir() {
    let project = TestProject::new("todo")
        .flow("a.flow", "model:\n  name: Todo\n")
        .flow("b.flow", "model:\n  name: User\n");
    let recorder = Recorder::new();
    let orchestrator = orchestrator(&recorder);

    build(&project, &orchestrator).expect("first build");
    project.remove("b.flow");
    recorder.clear();
    build(&project, &orchestrator).expect("second build");

    let log = recorder.log();
    assert_eq!(log.len(), GeneratorKind::ALL.len());
    let models: Vec<_> = log[0].ir.models.keys().cloned().collect();
    assert_eq!(models, vec!["Todo"]);
}

#[test]
fn selector_and_environment_reach_generators() {
    let project = TestProject::new("todo").flow("todo.flow", "model:\n  name: Todo\n");
    let recorder = Recorder::new();

    let report = run_cycle(
        &project.project(),
        &Pipeline::new(),
        &orchestrator(&recorder),
        BuildRequest {
            target: Target::Windows,
            env: Environment::Production,
        },
    )
    .expect("cycle runs");

    assert!(report.is_success());
    let log = recorder.log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, GeneratorKind::Desktop);
    assert_eq!(log[0].env, Environment::Production);
}

#[test]
fn debounced_watch_rebuilds_once_per_burst() {
    let project = TestProject::new("todo").flow("todo.flow", "model:\n  name: Todo\n");
    let recorder = Recorder::new();
    let orchestrator = orchestrator(&recorder);
    let mut scheduler = WatchScheduler::new(Duration::from_secs(1));
    let t0 = Instant::now();

    for offset in [0, 200] {
        scheduler.trigger(t0 + Duration::from_millis(offset), || {
            build(&project, &orchestrator)?;
            Ok(())
        });
    }

    assert_eq!(scheduler.cycles(), 1);
    assert_eq!(recorder.calls().len(), GeneratorKind::ALL.len());
}

#[test]
fn watch_survives_a_failed_cycle() {
    let project = TestProject::new("todo").flow("todo.flow", "model: [\n");
    let orchestrator = orchestrator(&Recorder::new());
    let mut scheduler = WatchScheduler::new(Duration::from_secs(1));
    let t0 = Instant::now();

    let first = scheduler
        .trigger(t0, || {
            build(&project, &orchestrator)?;
            Ok(())
        })
        .expect("accepted");
    assert!(first.is_failed());

    project.write("todo.flow", "model:\n  name: Todo\n");
    let second = scheduler
        .trigger(t0 + Duration::from_secs(1), || {
            build(&project, &orchestrator)?;
            Ok(())
        })
        .expect("accepted");
    assert!(!second.is_failed());
    assert!(matches!(
        scheduler.state(),
        flowc_compiler::watch::WatchState::Idle
    ));
}
