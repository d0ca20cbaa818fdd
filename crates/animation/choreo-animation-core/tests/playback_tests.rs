use approx::assert_relative_eq;
use choreo_animation_core::{
    config::Config,
    inputs::{LoopMode, PlaybackCommand},
    outputs::CoreEvent,
    playback::{PlaybackController, PlaybackState},
    time::{Clock, ManualClock, Timestamp},
};

fn ts(ms: f64) -> Timestamp {
    Timestamp::from_millis(ms)
}

fn looped_count(events: &[CoreEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CoreEvent::Looped { .. }))
        .count()
}

#[test]
fn count_loop_wraps_once_per_tick() {
    let mut p = PlaybackController::default();
    p.start(1000.0, LoopMode::Count(2), 1.0, ts(0.0)).unwrap();
    p.drain_events();

    let elapsed = p.tick(ts(2500.0));
    assert_relative_eq!(elapsed, 500.0);
    assert_eq!(p.remaining_loops(), Some(0));
    let events = p.drain_events();
    assert_eq!(looped_count(&events), 1);
    assert_eq!(
        events,
        vec![
            CoreEvent::Looped { remaining: Some(0) },
            CoreEvent::Completed
        ]
    );
    assert_eq!(p.state(), PlaybackState::Stopped);
}

#[test]
fn count_loop_keeps_running_while_loops_remain() {
    let mut p = PlaybackController::default();
    p.start(1000.0, LoopMode::Count(3), 1.0, ts(0.0)).unwrap();
    assert_relative_eq!(p.tick(ts(1200.0)), 200.0);
    assert_eq!(p.remaining_loops(), Some(2));
    assert!(p.state().is_running());
    assert_relative_eq!(p.tick(ts(1700.0)), 700.0);
}

#[test]
fn once_clamps_and_completes() {
    let mut p = PlaybackController::default();
    p.start(1000.0, LoopMode::Once, 1.0, ts(0.0)).unwrap();
    assert_eq!(p.tick(ts(1500.0)), 1000.0);
    assert_eq!(p.progress(), 1.0);
    assert_eq!(p.state(), PlaybackState::Stopped);
    let events = p.drain_events();
    assert_eq!(events.last(), Some(&CoreEvent::Completed));
    // Stopped without reset keeps the clamped position.
    assert_eq!(p.tick(ts(9000.0)), 1000.0);
}

#[test]
fn infinite_loop_never_stops() {
    let mut p = PlaybackController::default();
    p.start(100.0, LoopMode::Infinite, 1.0, ts(0.0)).unwrap();
    for i in 1..50 {
        p.tick(ts(i as f64 * 130.0));
        assert!(p.state().is_running());
    }
    assert_eq!(p.remaining_loops(), None);
    assert!(looped_count(&p.drain_events()) > 0);
}

#[test]
fn pause_interval_is_excluded() {
    let clock = ManualClock::new(ts(0.0));
    let mut p = PlaybackController::default();
    p.start(10_000.0, LoopMode::Once, 1.0, clock.now()).unwrap();
    clock.advance(400.0);
    p.pause(clock.now());
    assert_eq!(p.state(), PlaybackState::Paused);
    clock.advance(3000.0);
    assert_eq!(p.tick(clock.now()), 400.0);
    p.resume(clock.now());
    clock.advance(100.0);
    assert_eq!(p.tick(clock.now()), 500.0);

    let names: Vec<&str> = p.drain_events().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["started", "paused", "resumed"]);
}

#[test]
fn pause_and_resume_are_guarded() {
    let mut p = PlaybackController::default();
    p.pause(ts(10.0));
    p.resume(ts(20.0));
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert!(p.drain_events().is_empty());

    p.start(1000.0, LoopMode::Once, 1.0, ts(0.0)).unwrap();
    p.resume(ts(50.0));
    assert_eq!(p.tick(ts(100.0)), 100.0);
}

#[test]
fn speed_scales_elapsed_and_is_clamped() {
    let mut p = PlaybackController::new(&Config {
        min_speed: 0.5,
        ..Default::default()
    });
    p.start(10_000.0, LoopMode::Once, 2.0, ts(0.0)).unwrap();
    assert_eq!(p.tick(ts(100.0)), 200.0);
    p.set_speed(0.0, ts(100.0));
    assert_eq!(p.speed(), 0.5);
    assert_eq!(p.tick(ts(300.0)), 300.0);
}

#[test]
fn stop_with_reset_clears_progress() {
    let mut p = PlaybackController::default();
    p.start(1000.0, LoopMode::Count(4), 1.0, ts(0.0)).unwrap();
    p.tick(ts(1500.0));
    p.stop(false);
    assert_eq!(p.elapsed(), 500.0);
    p.stop(true);
    assert_eq!(p.elapsed(), 0.0);
    assert_eq!(p.progress(), 0.0);
    assert_eq!(p.remaining_loops(), Some(4));
}

#[test]
fn zero_duration_counts_as_complete() {
    let mut p = PlaybackController::default();
    p.start(0.0, LoopMode::Infinite, 1.0, ts(0.0)).unwrap();
    p.tick(ts(100.0));
    assert_eq!(p.progress(), 1.0);
    assert_eq!(looped_count(&p.drain_events()), 0);
}

#[test]
fn commands_drive_the_controller() {
    let mut p = PlaybackController::default();
    let cmds: Vec<PlaybackCommand> = serde_json::from_str(
        r#"[
            { "cmd": "start", "duration_ms": 1000, "loop_mode": "infinite" },
            { "cmd": "set_speed", "speed": 2.0 },
            { "cmd": "pause" }
        ]"#,
    )
    .unwrap();
    for cmd in cmds {
        p.apply(cmd, ts(0.0)).unwrap();
    }
    assert_eq!(p.state(), PlaybackState::Paused);
    assert_eq!(p.speed(), 2.0);
    assert_eq!(p.loop_mode(), LoopMode::Infinite);
    p.apply(PlaybackCommand::Resume, ts(1000.0)).unwrap();
    assert_eq!(p.tick(ts(1100.0)), 200.0);
    assert!(p
        .apply(PlaybackCommand::SetDuration { duration_ms: f64::NAN }, ts(1100.0))
        .is_err());
}

#[test]
fn zero_loop_count_plays_once() {
    let mut p = PlaybackController::default();
    p.start(1000.0, LoopMode::Count(0), 1.0, ts(0.0)).unwrap();
    p.drain_events();
    assert_eq!(p.tick(ts(1700.0)), 1000.0);
    assert_eq!(p.drain_events(), vec![CoreEvent::Completed]);
    assert_eq!(p.state(), PlaybackState::Stopped);
}

#[test]
fn zero_min_speed_in_config_cannot_stall() {
    let mut p = PlaybackController::new(&Config {
        min_speed: 0.0,
        ..Default::default()
    });
    p.start(1000.0, LoopMode::Once, 0.0, ts(0.0)).unwrap();
    assert!(p.speed() > 0.0);
    assert!(p.tick(ts(5000.0)) > 0.0);
}
