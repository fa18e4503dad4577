use super::*;

const EPS: f64 = 1e-9;

#[test]
fn four_x_speed_with_sixteen_ms_ticks() {
    let mut c = PlaybackClock::new(10.0);
    c.set_speed(4.0).unwrap();
    c.play();
    assert_eq!(c.tick(0.0), TickOutcome::Continue);
    assert_eq!(c.current_time(), 0.0);
    assert_eq!(c.tick(16.0), TickOutcome::Continue);
    assert!((c.current_time() - 0.064).abs() < EPS);
    assert_eq!(c.tick(32.0), TickOutcome::Continue);
    assert!((c.current_time() - 0.128).abs() < EPS);
}

#[test]
fn first_tick_after_resume_contributes_nothing() {
    let mut c = PlaybackClock::new(100.0);
    c.play();
    c.tick(1_000.0);
    c.tick(2_000.0);
    assert!((c.current_time() - 1.0).abs() < EPS);

    c.pause();
    assert!(!c.wants_tick());
    assert_eq!(c.tick(50_000.0), TickOutcome::Idle);

    c.play();
    assert!(c.wants_tick());
    c.tick(60_000.0);
    assert!((c.current_time() - 1.0).abs() < EPS);
    c.tick(60_500.0);
    assert!((c.current_time() - 1.5).abs() < EPS);
}

#[test]
fn advance_is_elapsed_times_speed() {
    for &speed in &SPEED_PRESETS {
        let mut c = PlaybackClock::new(1_000.0);
        c.set_speed(speed).unwrap();
        c.play();
        c.tick(100.0);
        let before = c.current_time();
        c.tick(350.0);
        assert!((c.current_time() - before - 0.25 * speed).abs() < EPS);
    }
}

#[test]
fn speed_change_does_not_rescale_elapsed_time() {
    let mut c = PlaybackClock::new(100.0);
    c.play();
    c.tick(0.0);
    c.tick(1_000.0);
    c.set_speed(2.0).unwrap();
    assert!((c.current_time() - 1.0).abs() < EPS);
    c.tick(2_000.0);
    assert!((c.current_time() - 3.0).abs() < EPS);
}

#[test]
fn ticks_terminate_exactly_at_max_duration() {
    let mut c = PlaybackClock::new(1.0);
    c.play();
    let mut ts = 0.0;
    let mut outcome = c.tick(ts);
    let mut guard = 0;
    while outcome == TickOutcome::Continue {
        ts += 16.7;
        outcome = c.tick(ts);
        guard += 1;
        assert!(guard < 1_000);
    }
    assert_eq!(outcome, TickOutcome::Finished);
    assert_eq!(c.current_time(), 1.0);
    assert!(!c.is_playing());
    assert!(!c.wants_tick());
    assert_eq!(c.progress(), 1.0);
}

#[test]
fn playing_at_the_end_finishes_on_first_tick() {
    let mut c = PlaybackClock::new(2.0);
    c.seek(2.0);
    assert!(c.toggle());
    assert_eq!(c.tick(5.0), TickOutcome::Finished);
    assert!(!c.is_playing());
}

#[test]
fn seek_clamps_and_keeps_play_state() {
    let mut c = PlaybackClock::new(80.0);
    c.seek(-4.0);
    assert_eq!(c.current_time(), 0.0);
    c.seek(1e9);
    assert_eq!(c.current_time(), 80.0);
    c.seek(f64::NAN);
    assert_eq!(c.current_time(), 0.0);
    c.seek_fraction(0.25);
    assert_eq!(c.current_time(), 20.0);
    c.seek_fraction(1.7);
    assert_eq!(c.current_time(), 80.0);
    c.seek_fraction(-0.3);
    assert_eq!(c.current_time(), 0.0);
    assert!(!c.is_playing());

    c.play();
    c.seek(40.0);
    assert!(c.is_playing());
}

#[test]
fn backwards_host_time_is_ignored() {
    let mut c = PlaybackClock::new(10.0);
    c.play();
    c.tick(500.0);
    c.tick(400.0);
    assert_eq!(c.current_time(), 0.0);
    c.tick(900.0);
    assert!((c.current_time() - 0.5).abs() < EPS);
}

#[test]
fn invalid_speeds_are_rejected() {
    let mut c = PlaybackClock::new(10.0);
    assert!(c.set_speed(0.0).is_err());
    assert!(c.set_speed(-1.0).is_err());
    assert!(c.set_speed(f64::INFINITY).is_err());
    assert!(c.set_speed(3.3).is_ok());
    assert_eq!(c.speed(), 3.3);
}

#[test]
fn reset_rewinds_but_keeps_speed() {
    let mut c = PlaybackClock::new(10.0);
    c.set_speed(2.0).unwrap();
    c.seek(5.0);
    c.play();
    c.reset(30.0);
    let s = c.state();
    assert_eq!(s.current_time, 0.0);
    assert!(!s.playing);
    assert_eq!(s.speed, 2.0);
    assert_eq!(c.max_duration(), 30.0);
    assert_eq!(PlaybackClock::new(f64::NAN).max_duration(), 0.0);
    assert_eq!(PlaybackClock::new(0.0).progress(), 0.0);
}
