//! Target synthesis: interaction state x section profile -> target vector.
//!
//! Each interaction signal maps to one bounded multiplier. Intensity scales
//! with the mean of all five; other fields couple to a single signal.

use crate::constants::*;
use crate::params::{wrap_degrees, VisualParameterVector};
use crate::state::StateEstimator;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Multipliers {
    /// [0.8, 1.5]
    pub pointer_activity: f32,
    /// [0.9, 1.3]
    pub scroll_velocity: f32,
    /// [1.0, 1.0 + 0.4 * HOVER_MULT_MAX_COUNT]
    pub hover: f32,
    pub time_of_day: f32,
    /// [0.5, 1.5]
    pub user_energy: f32,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            pointer_activity: 1.0,
            scroll_velocity: 1.0,
            hover: 1.0,
            time_of_day: 1.0,
            user_energy: 1.0,
        }
    }
}

impl Multipliers {
    pub fn from_state(state: &StateEstimator) -> Self {
        let hovered = state.hovered_count().min(HOVER_MULT_MAX_COUNT) as f32;
        Self {
            pointer_activity: POINTER_MULT_BASE
                + state.pointer_activity().clamp(0.0, 1.0) * POINTER_MULT_SPAN,
            scroll_velocity: SCROLL_MULT_BASE
                + state.scroll_velocity().clamp(0.0, 1.0) * SCROLL_MULT_SPAN,
            hover: HOVER_MULT_BASE + hovered * HOVER_MULT_STEP,
            time_of_day: state.time_of_day().multiplier(),
            user_energy: ENERGY_MULT_BASE + state.user_energy().clamp(0.0, 1.0),
        }
    }

    pub fn average(&self) -> f32 {
        (self.pointer_activity
            + self.scroll_velocity
            + self.hover
            + self.time_of_day
            + self.user_energy)
            / 5.0
    }
}

/// Compose the frame's target from a profile base and the current multipliers.
pub fn synthesize_target(
    base: &VisualParameterVector,
    state: &StateEstimator,
    m: &Multipliers,
) -> VisualParameterVector {
    let pointer_x = state.pointer_position().x;
    let pointer_speed = state.pointer_velocity().length();
    let mut target = VisualParameterVector {
        intensity: (base.intensity * m.average()).clamp(0.0, INTENSITY_MAX),
        chaos: (base.chaos * m.user_energy).clamp(0.0, CHAOS_MAX),
        speed: (base.speed * m.pointer_activity).clamp(0.0, SPEED_MAX),
        hue: wrap_degrees(base.hue + (pointer_x - 0.5) * HUE_POINTER_SPAN_DEG + HUE_PERIOD_DEG),
        rgb_offset: (base.rgb_offset + pointer_speed * RGB_OFFSET_POINTER_GAIN)
            .clamp(0.0, RGB_OFFSET_MAX),
        moire_intensity: (base.moire_intensity + state.scroll_velocity() * MOIRE_SCROLL_GAIN)
            .clamp(0.0, MOIRE_MAX),
        rotation_pulse: (base.rotation_pulse * m.hover).clamp(0.0, ROTATION_PULSE_MAX),
    };
    target.sanitize(base);
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FixedClock;

    fn base() -> VisualParameterVector {
        VisualParameterVector {
            intensity: 0.5,
            chaos: 0.4,
            speed: 1.0,
            hue: 200.0,
            rgb_offset: 0.002,
            moire_intensity: 0.1,
            rotation_pulse: 0.2,
        }
    }

    #[test]
    fn resting_multipliers_match_formulas() {
        // noon, no input, initial energy 0.5
        let s = StateEstimator::new("hero", Box::new(FixedClock(13)));
        let m = Multipliers::from_state(&s);
        assert!((m.pointer_activity - 0.8).abs() < 1e-6);
        assert!((m.scroll_velocity - 0.9).abs() < 1e-6);
        assert!((m.hover - 1.0).abs() < 1e-6);
        assert!((m.time_of_day - 1.0).abs() < 1e-6);
        assert!((m.user_energy - 1.0).abs() < 1e-6);
        assert!((m.average() - 0.94).abs() < 1e-6);
    }

    #[test]
    fn centered_pointer_keeps_profile_hue() {
        let s = StateEstimator::new("hero", Box::new(FixedClock(13)));
        let m = Multipliers::from_state(&s);
        let t = synthesize_target(&base(), &s, &m);
        assert!((t.hue - 200.0).abs() < 1e-4);
        assert!((t.intensity - 0.5 * 0.94).abs() < 1e-5);
        assert!((t.chaos - 0.4).abs() < 1e-6);
        assert!((t.speed - 0.8).abs() < 1e-6);
    }

    #[test]
    fn pointer_x_biases_hue_across_wrap() {
        let mut s = StateEstimator::new("hero", Box::new(FixedClock(13)));
        s.on_pointer_move(0.0, 0.5);
        let mut b = base();
        b.hue = 10.0;
        let t = synthesize_target(&b, &s, &Multipliers::from_state(&s));
        assert!((t.hue - 350.0).abs() < 1e-3);
    }

    #[test]
    fn hover_multiplier_is_capped() {
        let mut s = StateEstimator::new("hero", Box::new(FixedClock(13)));
        for i in 0..20 {
            s.on_hover_change(&format!("card-{i}"), true);
        }
        let m = Multipliers::from_state(&s);
        assert!((m.hover - (1.0 + 0.4 * HOVER_MULT_MAX_COUNT as f32)).abs() < 1e-6);
    }
}
