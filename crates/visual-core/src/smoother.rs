//! Per-frame easing of the current vector toward the target vector.
//!
//! For every field: `current += diff * rate * (3 - 2 * min(|diff|, 1))` with
//! `rate = base_rate * dt_ms`. The ease factor grows as the gap closes, so
//! fields settle with a cubic ease-out instead of a linear crawl. Hue uses the
//! shorter arc.

use crate::constants::*;
use crate::params::{shortest_arc, wrap_degrees, Param, VisualParameterVector};

/// Per-millisecond base rates, one per field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingRates {
    pub intensity: f32,
    pub chaos: f32,
    pub speed: f32,
    pub hue: f32,
    pub rgb_offset: f32,
    pub moire_intensity: f32,
    pub rotation_pulse: f32,
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            intensity: RATE_INTENSITY,
            chaos: RATE_CHAOS,
            speed: RATE_SPEED,
            hue: RATE_HUE,
            rgb_offset: RATE_RGB_OFFSET,
            moire_intensity: RATE_MOIRE,
            rotation_pulse: RATE_ROTATION_PULSE,
        }
    }
}

impl SmoothingRates {
    pub fn get(&self, p: Param) -> f32 {
        match p {
            Param::Intensity => self.intensity,
            Param::Chaos => self.chaos,
            Param::Speed => self.speed,
            Param::Hue => self.hue,
            Param::RgbOffset => self.rgb_offset,
            Param::MoireIntensity => self.moire_intensity,
            Param::RotationPulse => self.rotation_pulse,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Smoother {
    rates: SmoothingRates,
}

impl Smoother {
    pub fn new(rates: SmoothingRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &SmoothingRates {
        &self.rates
    }

    /// Advance `current` one frame toward `target`.
    pub fn step(&self, current: &mut VisualParameterVector, target: &VisualParameterVector, dt_ms: f32) {
        if !(dt_ms.is_finite() && dt_ms > 0.0) {
            return;
        }
        let dt_ms = dt_ms.min(MAX_FRAME_DT_MS);
        for p in Param::ALL {
            let from = current.get(p);
            let to = target.get(p);
            let diff = if p.is_circular() {
                shortest_arc(from, to)
            } else {
                to - from
            };
            let rate = self.rates.get(p) * dt_ms;
            // capped at 1 so a long frame lands on the target instead of overshooting
            let factor = (rate * (3.0 - 2.0 * diff.abs().min(1.0))).clamp(0.0, 1.0);
            let next = from + diff * factor;
            *current.get_mut(p) = if p.is_circular() {
                wrap_degrees(next)
            } else {
                next.clamp(0.0, p.max())
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_frame_lands_without_overshoot() {
        let s = Smoother::default();
        let mut cur = VisualParameterVector::default();
        let target = VisualParameterVector {
            intensity: 0.9,
            hue: 90.0,
            ..Default::default()
        };
        s.step(&mut cur, &target, 10_000.0);
        assert!(cur.intensity <= 0.9 + 1e-6);
        assert!(cur.hue <= 90.0 + 1e-4);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let s = Smoother::default();
        let mut cur = VisualParameterVector::default();
        let target = VisualParameterVector {
            intensity: 1.0,
            ..Default::default()
        };
        s.step(&mut cur, &target, 0.0);
        s.step(&mut cur, &target, f32::NAN);
        assert_eq!(cur, VisualParameterVector::default());
    }
}
