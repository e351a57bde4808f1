//! Scroll choreography for pinned sections.
//!
//! An external timeline engine reports per-section scroll progress in [0,1].
//! Progress is split into entering / mid / exiting sub-phases and mapped
//! directly (no frame-time smoothing) onto a blended profile vector, which
//! then stands in for the static profile as the synthesis base.

use crate::broadcast::ChoreographyContext;
use crate::constants::*;
use crate::params::VisualParameterVector;
use crate::profile::ProfileTable;
use fnv::FnvHashMap;
use serde::Serialize;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollPhase {
    Entering,
    Mid,
    Exiting,
}

impl ScrollPhase {
    pub fn from_progress(progress: f32) -> Self {
        if progress < CHOREO_ENTER_END {
            ScrollPhase::Entering
        } else if progress < CHOREO_EXIT_START {
            ScrollPhase::Mid
        } else {
            ScrollPhase::Exiting
        }
    }
}

/// Sub-phase change for one section. `None` means the timeline is inactive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseChange {
    pub section: String,
    pub from: Option<ScrollPhase>,
    pub to: Option<ScrollPhase>,
}

#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Pin progress of a section from its viewport-relative bounding box.
///
/// `top` is the section's top edge relative to the viewport top. Returns
/// `None` while the section does not intersect the viewport. Sections taller
/// than the viewport progress over their overflow; shorter ones progress over
/// their full pass through the viewport.
pub fn section_progress(top: f32, height: f32, viewport: f32) -> Option<f32> {
    if !(top.is_finite() && height.is_finite() && viewport.is_finite()) {
        return None;
    }
    if height <= 0.0 || viewport <= 0.0 || top >= viewport || top + height <= 0.0 {
        return None;
    }
    let overflow = height - viewport;
    let p = if overflow > 0.0 {
        -top / overflow
    } else {
        (viewport - top) / (viewport + height)
    };
    Some(p.clamp(0.0, 1.0))
}

/// Blended profile vector for `section` at `progress`, or `None` if the
/// section is unknown.
pub fn choreograph(table: &ProfileTable, section: &str, progress: f32) -> Option<VisualParameterVector> {
    let base = table.get(section)?.base_vector();
    let (prev, next) = table.neighbors(section);
    let p = progress.clamp(0.0, 1.0);
    let v = match ScrollPhase::from_progress(p) {
        ScrollPhase::Entering => {
            let from = prev.map(|pr| pr.base_vector()).unwrap_or(base);
            from.lerp(&base, smoothstep(p / CHOREO_ENTER_END))
        }
        ScrollPhase::Mid => {
            let t = (p - CHOREO_ENTER_END) / (CHOREO_EXIT_START - CHOREO_ENTER_END);
            let mut v = base;
            v.rotation_pulse =
                (v.rotation_pulse + (PI * t).sin() * CHOREO_MID_PULSE).clamp(0.0, ROTATION_PULSE_MAX);
            v
        }
        ScrollPhase::Exiting => {
            let to = next.map(|nx| nx.base_vector()).unwrap_or(base);
            base.lerp(&to, smoothstep((p - CHOREO_EXIT_START) / (1.0 - CHOREO_EXIT_START)))
        }
    };
    Some(v)
}

#[derive(Clone, Debug)]
struct ActiveTrack {
    progress: f32,
    phase: ScrollPhase,
    vector: VisualParameterVector,
}

/// Running timelines, one per pinned section. Adjacent pinned sections share
/// the viewport while scrolling, so several tracks can be live at once; only
/// the current section's track feeds synthesis.
#[derive(Clone, Debug, Default)]
pub struct Choreographer {
    tracks: FnvHashMap<String, ActiveTrack>,
}

impl Choreographer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline callback. Unknown or unpinned sections and non-finite progress
    /// are ignored. Returns a change when this section's phase moved.
    pub fn on_progress(
        &mut self,
        table: &ProfileTable,
        section: &str,
        progress: f32,
    ) -> Option<PhaseChange> {
        if !progress.is_finite() {
            log::debug!("[timeline] dropped progress {progress} for `{section}`");
            return None;
        }
        match table.get(section) {
            Some(p) if p.pinned => {}
            _ => {
                log::debug!("[timeline] `{section}` is not a pinned section");
                return None;
            }
        }
        let progress = progress.clamp(0.0, 1.0);
        let vector = choreograph(table, section, progress)?;
        let phase = ScrollPhase::from_progress(progress);
        let track = ActiveTrack {
            progress,
            phase,
            vector,
        };
        let previous = match self.tracks.get_mut(section) {
            Some(existing) => Some(std::mem::replace(existing, track).phase),
            None => {
                self.tracks.insert(section.to_owned(), track);
                None
            }
        };
        (previous != Some(phase)).then(|| PhaseChange {
            section: section.to_owned(),
            from: previous,
            to: Some(phase),
        })
    }

    /// The timeline for `section` stopped (scrolled out of its pin range).
    pub fn leave(&mut self, section: &str) -> Option<PhaseChange> {
        let track = self.tracks.remove(section)?;
        Some(PhaseChange {
            section: section.to_owned(),
            from: Some(track.phase),
            to: None,
        })
    }

    /// Choreographed base for `section`, if its timeline is running.
    pub fn base_for(&self, section: &str) -> Option<&VisualParameterVector> {
        self.tracks.get(section).map(|t| &t.vector)
    }

    pub fn context_for(&self, section: &str) -> Option<ChoreographyContext> {
        self.tracks.get(section).map(|t| ChoreographyContext {
            phase: t.phase,
            progress: t.progress,
        })
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.tracks.contains_key(section)
    }

    pub fn active_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
