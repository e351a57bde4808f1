use std::cell::Cell;
use std::rc::Rc;
use visual_core::constants::*;
use visual_core::*;

struct SharedClock(Rc<Cell<u32>>);

impl Clock for SharedClock {
    fn local_hour(&self) -> u32 {
        self.0.get()
    }
}

#[test]
fn time_of_day_refreshes_on_interval_only() {
    let hour = Rc::new(Cell::new(9));
    let mut s = StateEstimator::new("hero", Box::new(SharedClock(hour.clone())));
    assert_eq!(s.time_of_day(), TimeOfDay::Morning);

    hour.set(18);
    s.tick(REFERENCE_FRAME_MS);
    assert_eq!(s.time_of_day(), TimeOfDay::Morning);

    s.tick(TIME_OF_DAY_REFRESH_MS);
    assert_eq!(s.time_of_day(), TimeOfDay::Evening);
}

#[test]
fn session_time_accumulates_seconds() {
    let mut s = StateEstimator::new("hero", Box::new(FixedClock(10)));
    for _ in 0..100 {
        s.tick(10.0);
    }
    assert!((s.session_time() - 1.0).abs() < 1e-4);
    s.tick(-5.0);
    s.tick(f32::NAN);
    assert!((s.session_time() - 1.0).abs() < 1e-4);
}

#[test]
fn pointer_velocity_is_absolute_delta() {
    let mut s = StateEstimator::new("hero", Box::new(FixedClock(10)));
    s.on_pointer_move(0.7, 0.2);
    let v = s.pointer_velocity();
    assert!((v.x - 0.2).abs() < 1e-6);
    assert!((v.y - 0.3).abs() < 1e-6);
}

#[test]
fn pointer_velocity_clears_once_idle() {
    let mut s = StateEstimator::new("hero", Box::new(FixedClock(10)));
    s.on_pointer_move(0.9, 0.9);
    let frames = (ACTIVITY_IDLE_AFTER_MS / REFERENCE_FRAME_MS).ceil() as usize + 1;
    for _ in 0..frames {
        s.tick(REFERENCE_FRAME_MS);
    }
    assert_eq!(s.pointer_velocity(), glam::Vec2::ZERO);
}

#[test]
fn scroll_velocity_decays_after_scrolling_stops() {
    let mut s = StateEstimator::new("hero", Box::new(FixedClock(10)));
    s.on_scroll(0.0, 5000.0);
    s.on_scroll(80.0, 5000.0);
    let peak = s.scroll_velocity();
    assert!((peak - 0.8).abs() < 1e-5);
    for _ in 0..120 {
        s.tick(REFERENCE_FRAME_MS);
    }
    assert!(s.scroll_velocity() < 1e-3);
}

#[test]
fn scroll_velocity_rises_across_consecutive_events() {
    let mut s = StateEstimator::new("hero", Box::new(FixedClock(10)));
    s.on_scroll(0.0, 5000.0);
    s.on_scroll(50.0, 5000.0);
    s.on_scroll(100.0, 5000.0);
    s.on_scroll(150.0, 5000.0);
    assert!((s.scroll_velocity() - 1.5).abs() < 1e-5);

    // a burst of large deltas saturates instead of growing without bound
    for i in 0..20 {
        s.on_scroll(1000.0 * (i + 1) as f32, 50_000.0);
    }
    assert_eq!(s.scroll_velocity(), SCROLL_VELOCITY_MAX);
}

#[test]
fn activity_decays_slowly_while_active_then_fast_when_idle() {
    let mut s = StateEstimator::new("hero", Box::new(FixedClock(10)));
    s.on_pointer_move(0.6, 0.5);
    s.tick(REFERENCE_FRAME_MS);
    let active = s.pointer_activity();
    assert!((active - ACTIVITY_STEP * ACTIVITY_DECAY_PER_FRAME).abs() < 1e-6);
    for _ in 0..10 {
        s.tick(REFERENCE_FRAME_MS);
    }
    let a = s.pointer_activity();
    s.tick(REFERENCE_FRAME_MS);
    assert!((s.pointer_activity() - a * ACTIVITY_IDLE_DECAY_PER_FRAME).abs() < 1e-6);
}

#[test]
fn teardown_clears_hover_and_disarms_timers() {
    let mut s = StateEstimator::new("hero", Box::new(FixedClock(10)));
    s.on_hover_change("card", true);
    s.on_pointer_move(0.1, 0.1);
    s.teardown();
    assert_eq!(s.hovered_count(), 0);
    let a = s.pointer_activity();
    s.tick(REFERENCE_FRAME_MS);
    assert!((s.pointer_activity() - a * ACTIVITY_IDLE_DECAY_PER_FRAME).abs() < 1e-6);
}
