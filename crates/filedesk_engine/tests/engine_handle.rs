use std::time::{Duration, Instant};

use filedesk_engine::{EngineEvent, EngineHandle, SimulationSettings};

fn fast_settings() -> SimulationSettings {
    SimulationSettings::with_timing(Duration::from_millis(1), Duration::from_millis(1))
}

fn collect_until<F>(engine: &EngineHandle, mut done: F) -> Vec<EngineEvent>
where
    F: FnMut(&EngineEvent) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut events = Vec::new();
    while Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            let stop = done(&event);
            events.push(event);
            if stop {
                return events;
            }
        }
    }
    panic!("engine did not finish in time; saw {} events", events.len());
}

#[test]
fn runs_an_action_and_reports_finish() {
    filedesk_logging::initialize_for_tests();
    let engine = EngineHandle::new(fast_settings());

    engine.run_action(1, 0, vec![7, 8]);
    let events = collect_until(&engine, |event| {
        matches!(event, EngineEvent::ActionFinished { .. })
    });

    let completed = events
        .iter()
        .filter(|event| matches!(event, EngineEvent::FileFinished { result: Ok(()), .. }))
        .count();
    assert_eq!(completed, 2);
    match events.last() {
        Some(EngineEvent::ActionFinished {
            run_id,
            action_index,
            report,
        }) => {
            assert_eq!((*run_id, *action_index), (1, 0));
            assert_eq!(report.completed, 2);
        }
        other => panic!("unexpected last event {other:?}"),
    }
}

#[test]
fn cancel_always_reports_run_cancelled() {
    let settings = SimulationSettings::with_timing(Duration::from_millis(50), Duration::from_secs(5));
    let engine = EngineHandle::new(settings);

    engine.run_action(3, 0, vec![1]);
    engine.cancel(3);
    let events = collect_until(&engine, |event| {
        matches!(event, EngineEvent::RunCancelled { .. })
    });
    assert!(matches!(
        events.last(),
        Some(EngineEvent::RunCancelled { run_id: 3 })
    ));

    // A run without an active action still gets an acknowledgement.
    engine.cancel(99);
    collect_until(&engine, |event| {
        matches!(event, EngineEvent::RunCancelled { run_id: 99 })
    });

    std::thread::sleep(Duration::from_millis(200));
    while let Some(event) = engine.try_recv() {
        assert!(
            !matches!(event, EngineEvent::ActionFinished { run_id: 3, .. }),
            "cancelled run must not finish"
        );
    }
}
