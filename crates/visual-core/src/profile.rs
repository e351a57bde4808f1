//! Static per-section visual profiles.
//!
//! A [`ProfileTable`] is configuration data: built in via
//! [`ProfileTable::default`] or loaded from JSON. Profiles never change after
//! construction.

use crate::constants::*;
use crate::error::{OrchestratorError, Result};
use crate::params::{wrap_degrees, VisualParameterVector};
use fnv::FnvHashMap;
use serde::Deserialize;

/// Baseline visual parameters for one page section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualProfile {
    pub id: String,
    /// Renderer preset name (e.g. the polytope a shader background draws).
    pub preset: String,
    #[serde(default)]
    pub form: Option<String>,
    pub intensity: f32,
    #[serde(default)]
    pub chaos: f32,
    pub speed: f32,
    pub hue: f32,
    pub rgb_offset: f32,
    #[serde(default)]
    pub moire_intensity: f32,
    #[serde(default)]
    pub rotation_pulse: f32,
    /// Pinned sections are scrubbed by the scroll timeline.
    #[serde(default)]
    pub pinned: bool,
}

impl VisualProfile {
    /// The profile's values as a parameter vector.
    pub fn base_vector(&self) -> VisualParameterVector {
        VisualParameterVector {
            intensity: self.intensity,
            chaos: self.chaos,
            speed: self.speed,
            hue: wrap_degrees(self.hue),
            rgb_offset: self.rgb_offset,
            moire_intensity: self.moire_intensity,
            rotation_pulse: self.rotation_pulse,
        }
    }

    fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f32, f32); 7] = [
            ("intensity", self.intensity, INTENSITY_MAX),
            ("chaos", self.chaos, CHAOS_MAX),
            ("speed", self.speed, SPEED_MAX),
            ("hue", self.hue, f32::MAX),
            ("rgbOffset", self.rgb_offset, RGB_OFFSET_MAX),
            ("moireIntensity", self.moire_intensity, MOIRE_MAX),
            ("rotationPulse", self.rotation_pulse, ROTATION_PULSE_MAX),
        ];
        for (field, value, max) in checks {
            let in_range = if field == "hue" {
                value.is_finite()
            } else {
                value.is_finite() && (0.0..=max).contains(&value)
            };
            if !in_range {
                return Err(OrchestratorError::InvalidProfile {
                    section: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ProfileTableFile {
    #[serde(default)]
    default: Option<String>,
    sections: Vec<VisualProfile>,
}

/// Ordered section profiles plus the fallback section.
#[derive(Clone, Debug)]
pub struct ProfileTable {
    profiles: Vec<VisualProfile>,
    index: FnvHashMap<String, usize>,
    default_index: usize,
}

impl ProfileTable {
    /// Build a table from ordered profiles. `default_id` falls back to the first
    /// section when `None`.
    pub fn new(profiles: Vec<VisualProfile>, default_id: Option<&str>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(OrchestratorError::EmptyProfileTable);
        }
        let mut index = FnvHashMap::default();
        for (i, p) in profiles.iter().enumerate() {
            p.validate()?;
            if index.insert(p.id.clone(), i).is_some() {
                return Err(OrchestratorError::DuplicateSection(p.id.clone()));
            }
        }
        let default_index = match default_id {
            Some(id) => *index
                .get(id)
                .ok_or_else(|| OrchestratorError::UnknownDefault(id.to_owned()))?,
            None => 0,
        };
        Ok(Self {
            profiles,
            index,
            default_index,
        })
    }

    /// Parse `{ "default": "...", "sections": [ ... ] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ProfileTableFile = serde_json::from_str(json)?;
        Self::new(file.sections, file.default.as_deref())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&VisualProfile> {
        self.index.get(id).map(|&i| &self.profiles[i])
    }

    pub fn default_profile(&self) -> &VisualProfile {
        &self.profiles[self.default_index]
    }

    /// Profile for `id`, or the default profile when `id` is unknown.
    pub fn resolve(&self, id: &str) -> &VisualProfile {
        self.get(id).unwrap_or_else(|| self.default_profile())
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Sections immediately before and after `id` in page order.
    pub fn neighbors(&self, id: &str) -> (Option<&VisualProfile>, Option<&VisualProfile>) {
        match self.position(id) {
            Some(i) => (
                i.checked_sub(1).and_then(|p| self.profiles.get(p)),
                self.profiles.get(i + 1),
            ),
            None => (None, None),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualProfile> {
        self.profiles.iter()
    }
}

fn profile(
    id: &str,
    preset: &str,
    form: &str,
    [intensity, chaos, speed, hue]: [f32; 4],
    [rgb_offset, moire_intensity, rotation_pulse]: [f32; 3],
    pinned: bool,
) -> VisualProfile {
    VisualProfile {
        id: id.to_owned(),
        preset: preset.to_owned(),
        form: Some(form.to_owned()),
        intensity,
        chaos,
        speed,
        hue,
        rgb_offset,
        moire_intensity,
        rotation_pulse,
        pinned,
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        let profiles = vec![
            profile("hero", "tesseract", "8-cell", [0.5, 0.2, 1.0, 200.0], [0.002, 0.1, 0.2], false),
            profile("capabilities", "24-cell", "icositetrachoron", [0.6, 0.3, 0.9, 170.0], [0.004, 0.2, 0.3], true),
            profile("research", "600-cell", "hexacosichoron", [0.7, 0.5, 1.2, 280.0], [0.006, 0.35, 0.4], true),
            profile("technology", "120-cell", "hecatonicosachoron", [0.65, 0.4, 1.1, 320.0], [0.005, 0.3, 0.35], true),
            profile("partners", "16-cell", "hexadecachoron", [0.45, 0.15, 0.8, 40.0], [0.003, 0.15, 0.15], false),
            profile("contact", "5-cell", "pentachoron", [0.35, 0.1, 0.6, 140.0], [0.001, 0.05, 0.1], false),
        ];
        let index = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            profiles,
            index,
            default_index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_table_is_valid() {
        let table = ProfileTable::default();
        for p in table.iter() {
            p.validate().unwrap();
        }
        assert_eq!(table.default_profile().id, "hero");
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let table = ProfileTable::default();
        assert_eq!(table.resolve("research").id, "research");
        assert_eq!(table.resolve("nonexistent").id, "hero");
    }

    #[test]
    fn neighbors_follow_page_order() {
        let table = ProfileTable::default();
        let (prev, next) = table.neighbors("hero");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().id, "capabilities");
        let (prev, next) = table.neighbors("contact");
        assert_eq!(prev.unwrap().id, "partners");
        assert!(next.is_none());
    }
}
