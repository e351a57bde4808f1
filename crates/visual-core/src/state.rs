//! Interaction-state estimation.
//!
//! The [`StateEstimator`] owns the [`InteractionState`] record. Signal sources
//! mutate it through the `on_*` methods; the orchestrator calls
//! [`StateEstimator::tick`] once per animation frame to apply decay.

use crate::constants::*;
use crate::signal::{DecayParams, DecayingSignal};
use fnv::FnvHashSet;
use glam::Vec2;

/// Coarse wall-clock bucket used to bias overall intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket edges: morning [5,12), afternoon [12,17), evening [17,21), night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn multiplier(self) -> f32 {
        match self {
            TimeOfDay::Morning => TIME_MULT_MORNING,
            TimeOfDay::Afternoon => TIME_MULT_AFTERNOON,
            TimeOfDay::Evening => TIME_MULT_EVENING,
            TimeOfDay::Night => TIME_MULT_NIGHT,
        }
    }
}

/// Source of the local wall-clock hour (0..=23).
pub trait Clock {
    fn local_hour(&self) -> u32;
}

/// Clock pinned to a single hour. Used by tests and headless hosts.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn local_hour(&self) -> u32 {
        self.0
    }
}

/// Read-only view of the estimator's state.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState {
    /// Normalized to [0,1] x [0,1].
    pub pointer_position: Vec2,
    /// Absolute per-update delta of the normalized pointer position.
    pub pointer_velocity: Vec2,
    pub pointer_activity: f32,
    pub scroll_progress: f32,
    pub scroll_velocity: f32,
    pub hovered_count: usize,
    pub user_energy: f32,
    pub current_section_id: String,
    /// Seconds since the orchestrator started.
    pub session_time: f32,
    pub time_of_day: TimeOfDay,
}

pub struct StateEstimator {
    pointer_position: Vec2,
    pointer_velocity: Vec2,
    pointer_activity: DecayingSignal,
    scroll_offset: Option<f32>,
    scroll_progress: f32,
    scroll_velocity: DecayingSignal,
    user_energy: DecayingSignal,
    hovered: FnvHashSet<String>,
    current_section_id: String,
    session_time: f32,
    time_of_day: TimeOfDay,
    since_time_of_day_ms: f32,
    clock: Box<dyn Clock>,
}

impl StateEstimator {
    pub fn new(initial_section: impl Into<String>, clock: Box<dyn Clock>) -> Self {
        let time_of_day = TimeOfDay::from_hour(clock.local_hour());
        Self {
            pointer_position: Vec2::splat(0.5),
            pointer_velocity: Vec2::ZERO,
            pointer_activity: DecayingSignal::new(
                0.0,
                DecayParams {
                    max: 1.0,
                    active_decay: ACTIVITY_DECAY_PER_FRAME,
                    idle_decay: ACTIVITY_IDLE_DECAY_PER_FRAME,
                    idle_after_ms: ACTIVITY_IDLE_AFTER_MS,
                },
            ),
            scroll_offset: None,
            scroll_progress: 0.0,
            scroll_velocity: DecayingSignal::new(
                0.0,
                DecayParams {
                    max: SCROLL_VELOCITY_MAX,
                    active_decay: SCROLL_DECAY_PER_FRAME,
                    idle_decay: SCROLL_IDLE_DECAY_PER_FRAME,
                    idle_after_ms: SCROLL_IDLE_AFTER_MS,
                },
            ),
            user_energy: DecayingSignal::new(
                INITIAL_USER_ENERGY,
                DecayParams {
                    max: 1.0,
                    active_decay: ENERGY_DECAY_PER_FRAME,
                    idle_decay: ENERGY_IDLE_DECAY_PER_FRAME,
                    idle_after_ms: ENERGY_IDLE_AFTER_MS,
                },
            ),
            hovered: FnvHashSet::default(),
            current_section_id: initial_section.into(),
            session_time: 0.0,
            time_of_day,
            since_time_of_day_ms: 0.0,
            clock,
        }
    }

    pub fn snapshot(&self) -> InteractionState {
        InteractionState {
            pointer_position: self.pointer_position,
            pointer_velocity: self.pointer_velocity,
            pointer_activity: self.pointer_activity.value(),
            scroll_progress: self.scroll_progress,
            scroll_velocity: self.scroll_velocity.value(),
            hovered_count: self.hovered.len(),
            user_energy: self.user_energy.value(),
            current_section_id: self.current_section_id.clone(),
            session_time: self.session_time,
            time_of_day: self.time_of_day,
        }
    }

    #[inline]
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }

    #[inline]
    pub fn pointer_velocity(&self) -> Vec2 {
        self.pointer_velocity
    }

    #[inline]
    pub fn pointer_activity(&self) -> f32 {
        self.pointer_activity.value()
    }

    #[inline]
    pub fn scroll_velocity(&self) -> f32 {
        self.scroll_velocity.value()
    }

    #[inline]
    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    #[inline]
    pub fn user_energy(&self) -> f32 {
        self.user_energy.value()
    }

    #[inline]
    pub fn hovered_count(&self) -> usize {
        self.hovered.len()
    }

    #[inline]
    pub fn current_section_id(&self) -> &str {
        &self.current_section_id
    }

    #[inline]
    pub fn session_time(&self) -> f32 {
        self.session_time
    }

    #[inline]
    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// Pointer moved to normalized `(x, y)`. Callers normalize against the viewport.
    ///
    /// A non-finite coordinate leaves that axis untouched; if neither axis is
    /// usable the event is dropped entirely.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !x.is_finite() && !y.is_finite() {
            log::debug!("[state] dropped pointer move ({x}, {y})");
            return;
        }
        let prev = self.pointer_position;
        let mut next = prev;
        if x.is_finite() {
            next.x = x.clamp(0.0, 1.0);
        }
        if y.is_finite() {
            next.y = y.clamp(0.0, 1.0);
        }
        self.pointer_velocity = (next - prev).abs();
        self.pointer_position = next;
        self.pointer_activity.bump(ACTIVITY_STEP);
        self.user_energy.bump(ENERGY_POINTER_STEP);
    }

    /// Document scrolled to `offset` out of `max_range` scrollable pixels.
    pub fn on_scroll(&mut self, offset: f32, max_range: f32) {
        if !offset.is_finite() {
            log::debug!("[state] dropped scroll offset {offset}");
            return;
        }
        let delta = match self.scroll_offset {
            Some(prev) => (offset - prev).abs(),
            None => 0.0,
        };
        self.scroll_offset = Some(offset);
        self.scroll_progress = if max_range.is_finite() && max_range > 0.0 {
            (offset / max_range).clamp(0.0, 1.0)
        } else {
            0.0
        };
        // consecutive events accumulate; the signal clamps at its max
        self.scroll_velocity.bump(delta * SCROLL_VELOCITY_SCALE);
        self.user_energy.bump(ENERGY_SCROLL_STEP);
    }

    /// Element entered (`true`) or left (`false`) hover.
    pub fn on_hover_change(&mut self, element_id: &str, entering: bool) {
        if entering {
            self.hovered.insert(element_id.to_owned());
        } else {
            self.hovered.remove(element_id);
        }
    }

    /// Record the active section. Resolution against the profile table is the
    /// caller's job; the estimator stores whatever id it is handed.
    pub fn set_section(&mut self, section_id: &str) {
        if self.current_section_id != section_id {
            self.current_section_id = section_id.to_owned();
        }
    }

    /// Per-frame decay and clock bookkeeping.
    pub fn tick(&mut self, dt_ms: f32) {
        if !(dt_ms.is_finite() && dt_ms > 0.0) {
            return;
        }
        self.session_time += dt_ms / 1000.0;
        self.pointer_activity.decay(dt_ms);
        self.scroll_velocity.decay(dt_ms);
        self.user_energy.decay(dt_ms);
        if self.pointer_activity.is_idle() {
            self.pointer_velocity = Vec2::ZERO;
        }

        self.since_time_of_day_ms += dt_ms;
        if self.since_time_of_day_ms >= TIME_OF_DAY_REFRESH_MS {
            self.since_time_of_day_ms = 0.0;
            let next = TimeOfDay::from_hour(self.clock.local_hour());
            if next != self.time_of_day {
                log::info!("[state] time of day {:?} -> {:?}", self.time_of_day, next);
                self.time_of_day = next;
            }
        }
    }

    /// Disarm idle timers and forget hover state.
    pub fn teardown(&mut self) {
        self.pointer_activity.cancel();
        self.scroll_velocity.cancel();
        self.user_energy.cancel();
        self.hovered.clear();
    }
}
