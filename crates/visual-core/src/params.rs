//! The visual-parameter vector shared by the target and current slots.

use crate::constants::*;
use serde::Serialize;

/// Identifies one numeric field of a [`VisualParameterVector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    Intensity,
    Chaos,
    Speed,
    Hue,
    RgbOffset,
    MoireIntensity,
    RotationPulse,
}

impl Param {
    pub const ALL: [Param; 7] = [
        Param::Intensity,
        Param::Chaos,
        Param::Speed,
        Param::Hue,
        Param::RgbOffset,
        Param::MoireIntensity,
        Param::RotationPulse,
    ];

    /// Upper bound of the field's range; every field starts at 0.
    pub fn max(self) -> f32 {
        match self {
            Param::Intensity => INTENSITY_MAX,
            Param::Chaos => CHAOS_MAX,
            Param::Speed => SPEED_MAX,
            Param::Hue => HUE_PERIOD_DEG,
            Param::RgbOffset => RGB_OFFSET_MAX,
            Param::MoireIntensity => MOIRE_MAX,
            Param::RotationPulse => ROTATION_PULSE_MAX,
        }
    }

    #[inline]
    pub fn is_circular(self) -> bool {
        matches!(self, Param::Hue)
    }

    /// Key used on the declarative style channel.
    pub fn style_key(self) -> &'static str {
        match self {
            Param::Intensity => "visual-intensity",
            Param::Chaos => "visual-chaos",
            Param::Speed => "visual-speed",
            Param::Hue => "visual-hue",
            Param::RgbOffset => "visual-rgb-offset",
            Param::MoireIntensity => "visual-moire-intensity",
            Param::RotationPulse => "visual-rotation-pulse",
        }
    }

    pub fn style_decimals(self) -> usize {
        if self.is_circular() {
            STYLE_ANGLE_DECIMALS
        } else {
            STYLE_UNIT_DECIMALS
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualParameterVector {
    pub intensity: f32,
    pub chaos: f32,
    pub speed: f32,
    /// Degrees in [0, 360).
    pub hue: f32,
    pub rgb_offset: f32,
    pub moire_intensity: f32,
    pub rotation_pulse: f32,
}

impl VisualParameterVector {
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

    pub fn get_mut(&mut self, p: Param) -> &mut f32 {
        match p {
            Param::Intensity => &mut self.intensity,
            Param::Chaos => &mut self.chaos,
            Param::Speed => &mut self.speed,
            Param::Hue => &mut self.hue,
            Param::RgbOffset => &mut self.rgb_offset,
            Param::MoireIntensity => &mut self.moire_intensity,
            Param::RotationPulse => &mut self.rotation_pulse,
        }
    }

    /// Bring every field back into its documented range. Non-finite fields
    /// fall back to `fallback`'s value for that field.
    pub fn sanitize(&mut self, fallback: &VisualParameterVector) {
        for p in Param::ALL {
            let v = self.get(p);
            let v = if v.is_finite() { v } else { fallback.get(p) };
            *self.get_mut(p) = if p.is_circular() {
                wrap_degrees(v)
            } else {
                v.clamp(0.0, p.max())
            };
        }
    }

    /// Distance to `other` on field `p`, using the shorter arc for hue.
    pub fn distance(&self, other: &VisualParameterVector, p: Param) -> f32 {
        if p.is_circular() {
            shortest_arc(self.get(p), other.get(p)).abs()
        } else {
            (other.get(p) - self.get(p)).abs()
        }
    }

    /// Blend towards `other` by `t` in [0,1]; hue takes the shorter arc.
    pub fn lerp(&self, other: &VisualParameterVector, t: f32) -> VisualParameterVector {
        let t = t.clamp(0.0, 1.0);
        let mut out = *self;
        for p in Param::ALL {
            let a = self.get(p);
            *out.get_mut(p) = if p.is_circular() {
                wrap_degrees(a + shortest_arc(a, other.get(p)) * t)
            } else {
                a + (other.get(p) - a) * t
            };
        }
        out
    }
}

/// Wrap an angle into [0, 360).
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let w = deg.rem_euclid(HUE_PERIOD_DEG);
    // rem_euclid can round up to exactly the period for tiny negative inputs
    if w >= HUE_PERIOD_DEG {
        0.0
    } else {
        w
    }
}

/// Signed difference `to - from` along the shorter arc, in [-180, 180).
#[inline]
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let half = HUE_PERIOD_DEG * 0.5;
    (to - from + half).rem_euclid(HUE_PERIOD_DEG) - half
}
