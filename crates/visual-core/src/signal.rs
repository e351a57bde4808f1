//! Decaying scalar signals with idle detection.
//!
//! A [`DecayingSignal`] rises when an event bumps it and decays multiplicatively
//! every frame. While events keep arriving within the idle window it decays at
//! its active rate; once the window elapses without an event it switches to the
//! faster idle rate. Bumping re-arms the idle window, and [`DecayingSignal::cancel`]
//! disarms it without touching the value.

use crate::constants::REFERENCE_FRAME_MS;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayParams {
    /// Upper bound; the value is clamped to `[0, max]` after every mutation.
    pub max: f32,
    /// Per-reference-frame factor while recently active.
    pub active_decay: f32,
    /// Per-reference-frame factor after the idle window has elapsed.
    pub idle_decay: f32,
    /// Milliseconds without an event before idle decay kicks in.
    pub idle_after_ms: f32,
}

#[derive(Clone, Debug)]
pub struct DecayingSignal {
    value: f32,
    params: DecayParams,
    // Time since the last event; `None` when no idle timer is armed.
    since_event_ms: Option<f32>,
}

impl DecayingSignal {
    pub fn new(initial: f32, params: DecayParams) -> Self {
        let mut s = Self {
            value: 0.0,
            params,
            since_event_ms: None,
        };
        s.set(initial);
        s
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn params(&self) -> &DecayParams {
        &self.params
    }

    /// True once the idle window has elapsed (or no event was ever seen).
    pub fn is_idle(&self) -> bool {
        match self.since_event_ms {
            Some(ms) => ms >= self.params.idle_after_ms,
            None => true,
        }
    }

    /// Add `amount` and re-arm the idle timer. Non-finite amounts are ignored.
    pub fn bump(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.set(self.value + amount);
        self.since_event_ms = Some(0.0);
    }

    /// Overwrite the value without touching the idle timer.
    pub fn set(&mut self, value: f32) {
        if value.is_finite() {
            self.value = value.clamp(0.0, self.params.max);
        }
    }

    /// Disarm the idle timer; the signal is treated as idle from now on.
    pub fn cancel(&mut self) {
        self.since_event_ms = None;
    }

    /// Advance by one frame of `dt_ms`.
    pub fn decay(&mut self, dt_ms: f32) {
        if !(dt_ms.is_finite() && dt_ms > 0.0) {
            return;
        }
        let factor = if self.is_idle() {
            self.params.idle_decay
        } else {
            self.params.active_decay
        };
        self.set(self.value * factor.powf(dt_ms / REFERENCE_FRAME_MS));
        if let Some(ms) = self.since_event_ms.as_mut() {
            *ms += dt_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> DecayParams {
        DecayParams {
            max: 1.0,
            active_decay: 0.99,
            idle_decay: 0.5,
            idle_after_ms: 50.0,
        }
    }

    #[test]
    fn bump_clamps_to_max() {
        let mut s = DecayingSignal::new(0.0, params());
        for _ in 0..50 {
            s.bump(0.3);
        }
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn switches_to_idle_rate_after_window() {
        let mut s = DecayingSignal::new(0.0, params());
        s.bump(1.0);
        assert!(!s.is_idle());
        s.decay(REFERENCE_FRAME_MS);
        assert!((s.value() - 0.99).abs() < 1e-5);
        for _ in 0..3 {
            s.decay(REFERENCE_FRAME_MS);
        }
        assert!(s.is_idle());
        let before = s.value();
        s.decay(REFERENCE_FRAME_MS);
        assert!((s.value() - before * 0.5).abs() < 1e-5);
    }

    #[test]
    fn bump_rearms_idle_timer() {
        let mut s = DecayingSignal::new(0.0, params());
        s.bump(0.5);
        for _ in 0..10 {
            s.decay(REFERENCE_FRAME_MS);
        }
        assert!(s.is_idle());
        s.bump(0.1);
        assert!(!s.is_idle());
        s.cancel();
        assert!(s.is_idle());
    }

    #[test]
    fn non_finite_inputs_are_ignored() {
        let mut s = DecayingSignal::new(0.4, params());
        s.bump(f32::NAN);
        s.bump(f32::INFINITY);
        s.set(f32::NEG_INFINITY);
        s.decay(f32::NAN);
        assert!((s.value() - 0.4).abs() < 1e-6);
    }
}
